// Numeric evaluation of parsed formulas: promotion, constants, domain errors
use crate::{Bindings, MathError, Number, parse};
use num_complex::Complex64;
use std::f64::consts::PI;

fn eval(formula: &str) -> Result<Number, MathError> {
    parse(formula)?.evaluate(&Bindings::new())
}

fn eval_at(formula: &str, x: impl Into<crate::Value>) -> Result<Number, MathError> {
    parse(formula)?.evaluate(&Bindings::new().with("x", x))
}

#[test]
fn test_integer_arithmetic_stays_exact() {
    assert_eq!(eval("2 + 3 * 4"), Ok(Number::Integer(14)));
    assert_eq!(eval("(2 + 3) * 4"), Ok(Number::Integer(20)));
    assert_eq!(eval("2^10"), Ok(Number::Integer(1024)));
    assert_eq!(eval("6 / 3"), Ok(Number::Integer(2)));
    assert_eq!(eval("5!"), Ok(Number::Integer(120)));
    assert_eq!(eval("|-3|"), Ok(Number::Integer(3)));
}

#[test]
fn test_promotion_to_real() {
    assert_eq!(eval("7 / 2"), Ok(Number::Real(3.5)));
    assert_eq!(eval("1 + 0.5"), Ok(Number::Real(1.5)));
    assert_eq!(eval("50%"), Ok(Number::Real(0.5)));
    assert_eq!(eval("2^-1"), Ok(Number::Real(0.5)));

    // i64 overflow falls back to a real instead of wrapping
    let big = eval("9223372036854775807 + 1").unwrap();
    assert_eq!(big.kind(), crate::NumericKind::Real);
}

#[test]
fn test_promotion_to_complex() {
    let root = eval("sqrt(-4)").unwrap();
    assert!(root.approx_eq(&Number::Complex(Complex64::new(0.0, 2.0))));

    let log = eval("ln(-1)").unwrap();
    assert!(log.approx_eq(&Number::Complex(Complex64::new(0.0, PI))));
}

#[test]
fn test_named_constants() {
    assert!(eval("2pi").unwrap().approx_eq(&Number::Real(2.0 * PI)));
    assert!(eval("ln(e)").unwrap().approx_eq(&Number::Real(1.0)));
    assert!(eval("sin(π / 2)").unwrap().approx_eq(&Number::Real(1.0)));
}

#[test]
fn test_transcendental_functions() {
    let cases = [
        ("cos(0)", 1.0),
        ("exp(0)", 1.0),
        ("atan(1) * 4", PI),
        ("log(100)", 2.0),
        ("log(8, 2)", 3.0),
        ("sec(0)", 1.0),
    ];
    for (formula, expected) in cases {
        let value = eval(formula).unwrap();
        assert!(
            value.approx_eq(&Number::Real(expected)),
            "{} evaluated to {}",
            formula,
            value
        );
    }
}

#[test]
fn test_division_by_zero() {
    assert_eq!(eval_at("x / 0", 5), Err(MathError::DivisionByZero));
    assert_eq!(eval("1 / (2 - 2)"), Err(MathError::DivisionByZero));
}

#[test]
fn test_poles_and_domain_errors() {
    assert!(matches!(eval("csc(0)"), Err(MathError::UndefinedValue { .. })));
    assert!(matches!(eval("cot(0)"), Err(MathError::UndefinedValue { .. })));
    assert!(matches!(eval("asin(2)"), Err(MathError::DomainError { .. })));
    assert!(matches!(eval("ln(0)"), Err(MathError::DomainError { .. })));
    assert!(matches!(eval("(-1)!"), Err(MathError::DomainError { .. })));
}

#[test]
fn test_unbound_variable() {
    assert_eq!(
        eval("x + 1"),
        Err(MathError::UnboundVariable("x".to_string()))
    );
}

#[test]
fn test_bound_variables() {
    assert_eq!(eval_at("x^2 + 1", 3), Ok(Number::Integer(10)));
    assert_eq!(eval_at("2x", 1.25), Ok(Number::Real(2.5)));

    let b = Bindings::new().with("x", 2).with("y", 0.5);
    assert_eq!(
        parse("x * y + x").unwrap().evaluate(&b),
        Ok(Number::Real(3.0))
    );
}
