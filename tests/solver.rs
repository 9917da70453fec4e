//! 저항 식 계산 회귀 테스트.
use filament_resistance::{solve, solve_text, KnownValues, Quantity, Resistivity, SolveError};

#[test]
fn resistance_from_length_and_area() {
    // 30 Ω·cm × 10 cm / 2 cm² = 150 Ω
    let s = solve_text(Resistivity::XY, Some(Quantity::Resistance), "", "10", "2")
        .expect("resistance calc");
    assert_eq!(s.quantity, Quantity::Resistance);
    assert!((s.value - 150.0).abs() < 1e-9, "R={}", s.value);
}

#[test]
fn length_from_resistance_and_area() {
    // 57.5 Ω × 2 cm² / 115 Ω·cm = 1 cm
    let s = solve_text(Resistivity::Z, Some(Quantity::Length), "57.5", "", "2")
        .expect("length calc");
    assert_eq!(s.quantity, Quantity::Length);
    assert!((s.value - 1.0).abs() < 1e-9, "L={}", s.value);
}

#[test]
fn area_with_zero_resistance_is_division_by_zero() {
    let err = solve_text(Resistivity::XY, Some(Quantity::Area), "0", "5", "").unwrap_err();
    assert_eq!(err, SolveError::DivisionByZero);
}

#[test]
fn non_numeric_length_is_invalid_input() {
    let err = solve_text(Resistivity::XY, Some(Quantity::Resistance), "", "abc", "2").unwrap_err();
    assert_eq!(err, SolveError::InvalidInput(Quantity::Length));
}

#[test]
fn missing_required_value_is_invalid_input() {
    let err = solve_text(Resistivity::Z, Some(Quantity::Area), "12", "", "").unwrap_err();
    assert_eq!(err, SolveError::InvalidInput(Quantity::Length));
}

#[test]
fn no_unknown_selected() {
    let known = KnownValues::parse("1", "2", "3");
    assert_eq!(
        solve(Resistivity::XY, None, &known),
        Err(SolveError::NoSelection)
    );
}

#[test]
fn resistance_then_area_round_trip() {
    let lengths = [0.1, 1.0, 7.25, 42.0, 1e4, 1e6, 3.5e9];
    let areas = [1e-4, 0.01, 0.5, 2.0, 3.3, 250.0, 1e7];
    for rho in Resistivity::ALL {
        for &l in &lengths {
            for &a in &areas {
                let known = KnownValues::default()
                    .with(Quantity::Length, l)
                    .with(Quantity::Area, a);
                let r = solve(rho, Some(Quantity::Resistance), &known).unwrap().value;
                let back = KnownValues::default()
                    .with(Quantity::Resistance, r)
                    .with(Quantity::Length, l);
                let a2 = solve(rho, Some(Quantity::Area), &back).unwrap().value;
                assert!((a2 - a).abs() <= 1e-9 * a.max(1.0), "rho={rho} L={l} A={a} got {a2}");
            }
        }
    }
}

#[test]
fn repeated_calls_are_identical_and_leave_inputs_untouched() {
    let known = KnownValues::parse("", "10", "2");
    let snapshot = known;
    let first = solve(Resistivity::XY, Some(Quantity::Resistance), &known);
    for _ in 0..100 {
        assert_eq!(solve(Resistivity::XY, Some(Quantity::Resistance), &known), first);
    }
    assert_eq!(known, snapshot);
}

#[test]
fn large_resistance_round_trips_back_to_area() {
    // 30 Ω·cm × 1e6 cm / 1e-4 cm² = 3e11 Ω
    let r = solve_text(Resistivity::XY, Some(Quantity::Resistance), "", "1e6", "1e-4")
        .expect("resistance calc")
        .value;
    assert!((r - 3e11).abs() < 1.0, "R={r}");
    let a = solve(
        Resistivity::XY,
        Some(Quantity::Area),
        &KnownValues::default()
            .with(Quantity::Resistance, r)
            .with(Quantity::Length, 1e6),
    )
    .expect("area calc")
    .value;
    assert!((a - 1e-4).abs() < 1e-15, "A={a}");
}

#[test]
fn tiny_area_is_overflow_not_infinity() {
    let err = solve_text(Resistivity::XY, Some(Quantity::Resistance), "", "10", "1e-320")
        .unwrap_err();
    assert_eq!(err, SolveError::Overflow);
}
