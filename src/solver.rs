//! 저항 식 R = ρ·L/A 를 세 가지 형태로 변형해 미지수 하나를 구한다.
//!
//! 단위는 저항 Ω, 길이 cm, 면적 cm², 비저항 Ω·cm 로 고정한다.

use crate::quantity::Quantity;
use crate::resistivity::Resistivity;

/// 계산 시 발생 가능한 오류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// 필요한 입력이 없거나 숫자가 아니거나 음수/무한대
    InvalidInput(Quantity),
    /// 식의 분모가 정확히 0
    DivisionByZero,
    /// 결과가 f64로 표현할 수 없을 만큼 큼
    Overflow,
    /// 미지수가 선택되지 않음
    NoSelection,
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::InvalidInput(q) => write!(f, "invalid input for {q}"),
            SolveError::DivisionByZero => write!(f, "division by zero"),
            SolveError::Overflow => write!(f, "result is too large to represent"),
            SolveError::NoSelection => write!(f, "no unknown variable selected"),
        }
    }
}

impl std::error::Error for SolveError {}

/// 미지수가 아닌 두 양의 입력값. 비어 있거나 해석할 수 없는 칸은 None.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KnownValues {
    pub resistance: Option<f64>,
    pub length: Option<f64>,
    pub area: Option<f64>,
}

impl KnownValues {
    /// 텍스트 입력 세 칸을 해석한다. 범위 검사는 `solve`에서 한다.
    pub fn parse(resistance: &str, length: &str, area: &str) -> Self {
        Self {
            resistance: parse_field(resistance),
            length: parse_field(length),
            area: parse_field(area),
        }
    }

    pub fn get(&self, quantity: Quantity) -> Option<f64> {
        match quantity {
            Quantity::Resistance => self.resistance,
            Quantity::Length => self.length,
            Quantity::Area => self.area,
        }
    }

    pub fn with(mut self, quantity: Quantity, value: f64) -> Self {
        match quantity {
            Quantity::Resistance => self.resistance = Some(value),
            Quantity::Length => self.length = Some(value),
            Quantity::Area => self.area = Some(value),
        }
        self
    }

    fn require(&self, quantity: Quantity) -> Result<f64, SolveError> {
        match self.get(quantity) {
            Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
            _ => Err(SolveError::InvalidInput(quantity)),
        }
    }
}

/// 한 칸의 텍스트를 숫자로 해석한다. 공백만 있으면 None.
pub fn parse_field(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok()
}

/// 계산 결과. 어떤 양을 구했는지와 그 값을 함께 담는다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub quantity: Quantity,
    pub value: f64,
}

impl Solution {
    /// 지정한 소수 자릿수로 `Resistance (R) = 150.0000 Ω` 형태 문자열을 만든다.
    pub fn format(&self, precision: usize) -> String {
        format!(
            "{} = {:.*} {}",
            self.quantity,
            precision,
            self.value,
            self.quantity.unit()
        )
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format(4))
    }
}

/// 미지수 하나를 계산한다.
///
/// - R = ρ·L / A
/// - L = R·A / ρ
/// - A = ρ·L / R
///
/// 미지수 칸에 들어 있는 값은 무시한다.
pub fn solve(
    resistivity: Resistivity,
    unknown: Option<Quantity>,
    known: &KnownValues,
) -> Result<Solution, SolveError> {
    let unknown = unknown.ok_or(SolveError::NoSelection)?;
    let rho = resistivity.ohm_cm();
    let value = match unknown {
        Quantity::Resistance => {
            let length = known.require(Quantity::Length)?;
            let area = known.require(Quantity::Area)?;
            divide(rho * length, area)?
        }
        Quantity::Length => {
            let resistance = known.require(Quantity::Resistance)?;
            let area = known.require(Quantity::Area)?;
            divide(resistance * area, rho)?
        }
        Quantity::Area => {
            let resistance = known.require(Quantity::Resistance)?;
            let length = known.require(Quantity::Length)?;
            divide(rho * length, resistance)?
        }
    };
    log::debug!("solved {unknown} = {value} (rho={rho} Ω·cm)");
    Ok(Solution {
        quantity: unknown,
        value,
    })
}

/// 텍스트 입력을 그대로 받아 해석 후 계산한다. GUI와 CLI가 공통으로 사용한다.
pub fn solve_text(
    resistivity: Resistivity,
    unknown: Option<Quantity>,
    resistance: &str,
    length: &str,
    area: &str,
) -> Result<Solution, SolveError> {
    let known = KnownValues::parse(resistance, length, area);
    solve(resistivity, unknown, &known)
}

fn divide(numerator: f64, denominator: f64) -> Result<f64, SolveError> {
    if denominator == 0.0 {
        return Err(SolveError::DivisionByZero);
    }
    let value = numerator / denominator;
    if !value.is_finite() {
        return Err(SolveError::Overflow);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field_trims_and_rejects_text() {
        assert_eq!(parse_field(" 2.5 "), Some(2.5));
        assert_eq!(parse_field("1e3"), Some(1000.0));
        assert_eq!(parse_field(""), None);
        assert_eq!(parse_field("   "), None);
        assert_eq!(parse_field("abc"), None);
    }

    #[test]
    fn value_in_unknown_field_is_ignored() {
        let known = KnownValues::parse("999", "10", "2");
        let s = solve(Resistivity::XY, Some(Quantity::Resistance), &known).unwrap();
        assert!((s.value - 150.0).abs() < 1e-12);
    }

    #[test]
    fn negative_and_non_finite_inputs_are_invalid() {
        let known = KnownValues::default()
            .with(Quantity::Length, -1.0)
            .with(Quantity::Area, 2.0);
        assert_eq!(
            solve(Resistivity::XY, Some(Quantity::Resistance), &known),
            Err(SolveError::InvalidInput(Quantity::Length))
        );
        let known = KnownValues::parse("", "inf", "2");
        assert_eq!(
            solve(Resistivity::XY, Some(Quantity::Resistance), &known),
            Err(SolveError::InvalidInput(Quantity::Length))
        );
    }

    #[test]
    fn large_inputs_are_accepted() {
        let known = KnownValues::parse("", "10", "2e9");
        let s = solve(Resistivity::Z, Some(Quantity::Resistance), &known).unwrap();
        assert!((s.value - 115.0 * 10.0 / 2e9).abs() < 1e-18);
    }

    #[test]
    fn subnormal_area_overflows_instead_of_returning_inf() {
        let known = KnownValues::parse("", "10", "1e-320");
        assert_eq!(
            solve(Resistivity::XY, Some(Quantity::Resistance), &known),
            Err(SolveError::Overflow)
        );
    }

    #[test]
    fn huge_numerator_overflows() {
        let known = KnownValues::parse("1e308", "", "1e308");
        assert_eq!(
            solve(Resistivity::XY, Some(Quantity::Length), &known),
            Err(SolveError::Overflow)
        );
    }

    #[test]
    fn zero_area_when_solving_resistance() {
        let known = KnownValues::parse("", "10", "0");
        assert_eq!(
            solve(Resistivity::XY, Some(Quantity::Resistance), &known),
            Err(SolveError::DivisionByZero)
        );
    }

    #[test]
    fn solution_format_uses_precision() {
        let s = Solution {
            quantity: Quantity::Area,
            value: 1.0 / 3.0,
        };
        assert_eq!(s.format(2), "Area (A) = 0.33 cm²");
        assert_eq!(s.to_string(), "Area (A) = 0.3333 cm²");
    }
}
