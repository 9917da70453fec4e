//! 출력 방향별 전도성 필라멘트(Protopasta) 비저항 프리셋.
//! 값은 제조사 공개 자료 기준의 참고값이다.

use serde::{Deserialize, Serialize};

/// 출력 레이어 방향에 따른 비저항 ρ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resistivity {
    /// 레이어 평면(X/Y) 방향, 30 Ω·cm
    #[default]
    XY,
    /// 적층(Z) 방향, 115 Ω·cm
    Z,
}

impl Resistivity {
    pub const ALL: [Resistivity; 2] = [Resistivity::XY, Resistivity::Z];

    /// 비저항 값 [Ω·cm]. 항상 0보다 크다.
    pub const fn ohm_cm(&self) -> f64 {
        match self {
            Resistivity::XY => 30.0,
            Resistivity::Z => 115.0,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Resistivity::XY => "xy",
            Resistivity::Z => "z",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resistivity::XY => "X/Y Resistivity (30 Ω·cm)",
            Resistivity::Z => "Z Resistivity (115 Ω·cm)",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "xy" | "x/y" | "x" | "y" => Some(Resistivity::XY),
            "z" => Some(Resistivity::Z),
            _ => None,
        }
    }
}

impl std::fmt::Display for Resistivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_values() {
        assert_eq!(Resistivity::XY.ohm_cm(), 30.0);
        assert_eq!(Resistivity::Z.ohm_cm(), 115.0);
    }

    #[test]
    fn from_code_roundtrips_codes() {
        for r in Resistivity::ALL {
            assert_eq!(Resistivity::from_code(r.code()), Some(r));
        }
        assert_eq!(Resistivity::from_code("X/Y"), Some(Resistivity::XY));
        assert_eq!(Resistivity::from_code("w"), None);
    }
}
