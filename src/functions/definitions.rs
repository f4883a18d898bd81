//! Function definitions for the function registry
//!
//! Contains evaluation, symbolic differentiation and antiderivative rules for all
//! supported one-operand functions.
//!
//! # Derivative References
//!
//! Derivative and integral formulas follow standard calculus and DLMF:
//! - Trigonometric: DLMF §4.21-4.26
//! - Inverse trigonometric: DLMF §4.24, §4.26
//! - Logarithm and exponential: DLMF §4.10

use super::registry::FunctionDefinition;
use super::{Func, neg};
use crate::Expr;
use crate::error::MathError;
use crate::number::Number;
use num_complex::Complex64;

fn sin_n(x: Number) -> Number {
    x.map(f64::sin, Complex64::sin)
}

fn cos_n(x: Number) -> Number {
    x.map(f64::cos, Complex64::cos)
}

/// Real value of a non-complex number
fn real_part(x: Number) -> Option<f64> {
    match x {
        Number::Complex(_) => None,
        other => other.to_f64(),
    }
}

/// Reciprocal of `denom`, or an undefined-value error when `denom` vanishes
fn reciprocal_or_pole(name: &'static str, x: Number, denom: Number) -> Result<Number, MathError> {
    if denom.approx_zero() {
        Err(MathError::undefined(name, x))
    } else {
        Ok(Number::from(1.0) / denom)
    }
}

fn check_unit_interval(name: &'static str, x: Number) -> Result<(), MathError> {
    match real_part(x) {
        Some(r) if !(-1.0..=1.0).contains(&r) => Err(MathError::domain(name, x)),
        _ => Ok(()),
    }
}

/// `√(1 - u²)`
fn unit_root(u: &Expr) -> Expr {
    Expr::sub(Expr::int(1), Expr::pow(u.clone(), Expr::int(2))).sqrt()
}

/// `ln|u|`
fn ln_abs(u: Expr) -> Expr {
    u.abs().ln()
}

/// Return all function definitions for populating the registry
pub(crate) fn all_definitions() -> Vec<FunctionDefinition> {
    vec![
        // Trigonometric
        FunctionDefinition {
            func: Func::Sin,
            name: "sin",
            eval: |x| Ok(sin_n(x)),
            // d/dx sin(u) = cos(u) * u'
            derivative: |u| u.clone().cos(),
            antiderivative: |u| neg(u.clone().cos()),
        },
        FunctionDefinition {
            func: Func::Cos,
            name: "cos",
            eval: |x| Ok(cos_n(x)),
            // d/dx cos(u) = -sin(u) * u'
            derivative: |u| neg(u.clone().sin()),
            antiderivative: |u| u.clone().sin(),
        },
        FunctionDefinition {
            func: Func::Tan,
            name: "tan",
            eval: |x| {
                let cos = cos_n(x);
                if cos.approx_zero() {
                    return Err(MathError::undefined("tan", x));
                }
                Ok(sin_n(x) / cos)
            },
            // d/dx tan(u) = sec^2(u) * u'
            derivative: |u| Expr::pow(u.clone().sec(), Expr::int(2)),
            antiderivative: |u| neg(ln_abs(u.clone().cos())),
        },
        FunctionDefinition {
            func: Func::Csc,
            name: "csc",
            eval: |x| reciprocal_or_pole("csc", x, sin_n(x)),
            // d/dx csc(u) = -csc(u)cot(u) * u'
            derivative: |u| neg(Expr::mul(u.clone().csc(), u.clone().cot())),
            antiderivative: |u| neg(ln_abs(Expr::add(u.clone().csc(), u.clone().cot()))),
        },
        FunctionDefinition {
            func: Func::Sec,
            name: "sec",
            eval: |x| reciprocal_or_pole("sec", x, cos_n(x)),
            // d/dx sec(u) = sec(u)tan(u) * u'
            derivative: |u| Expr::mul(u.clone().sec(), u.clone().tan()),
            antiderivative: |u| ln_abs(Expr::add(u.clone().sec(), u.clone().tan())),
        },
        FunctionDefinition {
            func: Func::Cot,
            name: "cot",
            eval: |x| {
                let sin = sin_n(x);
                if sin.approx_zero() {
                    return Err(MathError::undefined("cot", x));
                }
                Ok(cos_n(x) / sin)
            },
            // d/dx cot(u) = -csc^2(u) * u'
            derivative: |u| neg(Expr::pow(u.clone().csc(), Expr::int(2))),
            antiderivative: |u| ln_abs(u.clone().sin()),
        },
        // Inverse Trigonometric
        FunctionDefinition {
            func: Func::Asin,
            name: "asin",
            eval: |x| {
                check_unit_interval("asin", x)?;
                Ok(x.map(f64::asin, Complex64::asin))
            },
            // d/dx asin(u) = u' / sqrt(1 - u^2)
            derivative: |u| Expr::div(Expr::int(1), unit_root(u)),
            antiderivative: |u| Expr::add(Expr::mul(u.clone(), u.clone().asin()), unit_root(u)),
        },
        FunctionDefinition {
            func: Func::Acos,
            name: "acos",
            eval: |x| {
                check_unit_interval("acos", x)?;
                Ok(x.map(f64::acos, Complex64::acos))
            },
            // d/dx acos(u) = -u' / sqrt(1 - u^2)
            derivative: |u| neg(Expr::div(Expr::int(1), unit_root(u))),
            antiderivative: |u| Expr::sub(Expr::mul(u.clone(), u.clone().acos()), unit_root(u)),
        },
        FunctionDefinition {
            func: Func::Atan,
            name: "atan",
            eval: |x| Ok(x.map(f64::atan, Complex64::atan)),
            // d/dx atan(u) = u' / (1 + u^2)
            derivative: |u| {
                Expr::div(
                    Expr::int(1),
                    Expr::add(Expr::int(1), Expr::pow(u.clone(), Expr::int(2))),
                )
            },
            antiderivative: |u| {
                Expr::sub(
                    Expr::mul(u.clone(), u.clone().atan()),
                    Expr::div(
                        Expr::add(Expr::int(1), Expr::pow(u.clone(), Expr::int(2))).ln(),
                        Expr::int(2),
                    ),
                )
            },
        },
        // Exponential and logarithmic
        FunctionDefinition {
            func: Func::Ln,
            name: "ln",
            eval: |x| {
                if x.approx_zero() {
                    return Err(MathError::domain("ln", x));
                }
                Ok(x.ln())
            },
            // d/dx ln(u) = u' / u
            derivative: |u| Expr::div(Expr::int(1), u.clone()),
            antiderivative: |u| Expr::sub(Expr::mul(u.clone(), u.clone().ln()), u.clone()),
        },
        FunctionDefinition {
            func: Func::Exp,
            name: "exp",
            eval: |x| Ok(x.map(f64::exp, Complex64::exp)),
            // d/dx exp(u) = exp(u) * u'
            derivative: |u| u.clone().exp(),
            antiderivative: |u| u.clone().exp(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn eval(f: Func, x: f64) -> Result<Number, MathError> {
        f.eval(Number::from(x))
    }

    #[test]
    fn test_inverse_trig_domain() {
        assert!(matches!(eval(Func::Asin, 2.0), Err(MathError::DomainError { .. })));
        assert!(matches!(eval(Func::Acos, -1.5), Err(MathError::DomainError { .. })));
        let half_pi = eval(Func::Asin, 1.0).unwrap();
        assert!(half_pi.approx_eq(&Number::from(PI / 2.0)));
    }

    #[test]
    fn test_reciprocal_poles() {
        assert!(matches!(eval(Func::Csc, 0.0), Err(MathError::UndefinedValue { .. })));
        assert!(matches!(eval(Func::Cot, PI), Err(MathError::UndefinedValue { .. })));
        assert!(matches!(eval(Func::Sec, PI / 2.0), Err(MathError::UndefinedValue { .. })));
        assert!(matches!(eval(Func::Tan, PI / 2.0), Err(MathError::UndefinedValue { .. })));
        let sec0 = eval(Func::Sec, 0.0).unwrap();
        assert!(sec0.approx_one());
    }

    #[test]
    fn test_log_domain() {
        assert!(matches!(eval(Func::Ln, 0.0), Err(MathError::DomainError { .. })));
        let ln_neg = eval(Func::Ln, -1.0).unwrap();
        assert!(ln_neg.approx_eq(&Number::from(Complex64::new(0.0, PI))));
    }

    #[test]
    fn test_complex_input() {
        let z = Number::from(Complex64::new(0.0, 1.0));
        let exp = Func::Exp.eval(z).unwrap();
        assert!(exp.approx_eq(&Number::from(Complex64::new(1f64.cos(), 1f64.sin()))));
        // complex operands skip the real-line domain check
        assert!(Func::Asin.eval(Number::from(Complex64::new(2.0, 0.5))).is_ok());
    }
}
