use serde::{Deserialize, Serialize};

/// 저항 식 R = ρ·L/A 에서 다루는 물리량 종류를 나타낸다.
///
/// 계산 시 이 중 하나가 미지수(unknown)가 되고 나머지 둘은 입력값이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Quantity {
    /// 저항 R [Ω]
    #[default]
    Resistance,
    /// 길이 L [cm]
    Length,
    /// 단면적 A [cm²]
    Area,
}

impl Quantity {
    pub const ALL: [Quantity; 3] = [Quantity::Resistance, Quantity::Length, Quantity::Area];

    pub fn symbol(&self) -> &'static str {
        match self {
            Quantity::Resistance => "R",
            Quantity::Length => "L",
            Quantity::Area => "A",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Quantity::Resistance => "Ω",
            Quantity::Length => "cm",
            Quantity::Area => "cm²",
        }
    }

    /// 영문 표시명. 번역된 이름은 i18n 모듈에서 가져온다.
    pub fn name(&self) -> &'static str {
        match self {
            Quantity::Resistance => "Resistance",
            Quantity::Length => "Length",
            Quantity::Area => "Area",
        }
    }

    /// CLI 인자 등에서 받은 문자열을 해석한다. 대소문자는 구분하지 않는다.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "r" | "resistance" => Some(Quantity::Resistance),
            "l" | "length" => Some(Quantity::Length),
            "a" | "area" => Some(Quantity::Area),
            _ => None,
        }
    }

    /// 이 양을 구할 때 필요한 나머지 두 입력.
    pub fn required_inputs(&self) -> [Quantity; 2] {
        match self {
            Quantity::Resistance => [Quantity::Length, Quantity::Area],
            Quantity::Length => [Quantity::Resistance, Quantity::Area],
            Quantity::Area => [Quantity::Resistance, Quantity::Length],
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.symbol())
    }
}
