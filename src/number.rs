//! Tagged numeric values with integer → real → complex promotion
//!
//! Every arithmetic entry point resolves both operands to the widest tag present
//! before computing. Integer overflow and inexact integer division fall back to
//! `Real`; operations that leave the real line (square root or logarithm of a
//! negative real, a negative base raised to a fractional power) produce `Complex`.

use num_complex::Complex64;
use num_traits::{One, Zero};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::traits::FLOAT_TOLERANCE;

/// A numeric value: the leaf type of the whole engine
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integer(i64),
    Real(f64),
    Complex(Complex64),
}

/// Numeric tag, ordered from narrowest to widest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericKind {
    Integer,
    Real,
    Complex,
}

impl Number {
    pub fn kind(&self) -> NumericKind {
        match self {
            Number::Integer(_) => NumericKind::Integer,
            Number::Real(_) => NumericKind::Real,
            Number::Complex(_) => NumericKind::Complex,
        }
    }

    /// Convert to the given tag; never narrows
    pub fn promote(self, kind: NumericKind) -> Number {
        match (self, kind) {
            (Number::Integer(n), NumericKind::Real) => Number::Real(n as f64),
            (Number::Integer(_) | Number::Real(_), NumericKind::Complex) => {
                Number::Complex(self.to_complex())
            }
            _ => self,
        }
    }

    /// Real-line value, `None` for a complex number with a non-zero imaginary part
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Number::Integer(n) => Some(*n as f64),
            Number::Real(r) => Some(*r),
            Number::Complex(z) if z.im == 0.0 => Some(z.re),
            Number::Complex(_) => None,
        }
    }

    pub fn to_complex(&self) -> Complex64 {
        match self {
            Number::Integer(n) => Complex64::new(*n as f64, 0.0),
            Number::Real(r) => Complex64::new(*r, 0.0),
            Number::Complex(z) => *z,
        }
    }

    /// Exact integer value if this number is integral
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(n) => Some(*n),
            Number::Real(r) if r.fract() == 0.0 && r.abs() < i64::MAX as f64 => Some(*r as i64),
            _ => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Number::Integer(_) => true,
            Number::Real(r) => r.is_finite(),
            Number::Complex(z) => z.re.is_finite() && z.im.is_finite(),
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Number::Integer(n) => *n < 0,
            Number::Real(r) => r.is_sign_negative() && *r != 0.0,
            Number::Complex(z) => z.im == 0.0 && z.re < 0.0,
        }
    }

    pub fn approx_zero(&self) -> bool {
        self.to_complex().norm() < FLOAT_TOLERANCE
    }

    pub fn approx_one(&self) -> bool {
        (self.to_complex() - Complex64::new(1.0, 0.0)).norm() < FLOAT_TOLERANCE
    }

    pub fn approx_neg_one(&self) -> bool {
        (self.to_complex() + Complex64::new(1.0, 0.0)).norm() < FLOAT_TOLERANCE
    }

    /// Numeric comparison across tags with a tolerance relative to the magnitudes
    pub fn approx_eq(&self, other: &Number) -> bool {
        let (a, b) = (self.to_complex(), other.to_complex());
        let scale = 1.0_f64.max(a.norm()).max(b.norm());
        (a - b).norm() <= FLOAT_TOLERANCE * scale
    }

    fn as_real(&self) -> f64 {
        match self {
            Number::Integer(n) => *n as f64,
            Number::Real(r) => *r,
            Number::Complex(z) => z.re,
        }
    }

    fn binary(
        self,
        rhs: Number,
        int_op: fn(i64, i64) -> Option<i64>,
        real_op: fn(f64, f64) -> f64,
        complex_op: fn(Complex64, Complex64) -> Complex64,
    ) -> Number {
        match (self, rhs) {
            (Number::Integer(a), Number::Integer(b)) => int_op(a, b)
                .map_or_else(|| Number::Real(real_op(a as f64, b as f64)), Number::Integer),
            (Number::Complex(_), _) | (_, Number::Complex(_)) => {
                Number::Complex(complex_op(self.to_complex(), rhs.to_complex()))
            }
            _ => Number::Real(real_op(self.as_real(), rhs.as_real())),
        }
    }

    /// Apply a real function, or its complex counterpart for complex input
    pub(crate) fn map(self, real: fn(f64) -> f64, complex: fn(Complex64) -> Complex64) -> Number {
        match self {
            Number::Complex(z) => Number::Complex(complex(z)),
            other => Number::Real(real(other.as_real())),
        }
    }

    pub fn pow(self, exp: Number) -> Number {
        match (self, exp) {
            (Number::Integer(b), Number::Integer(e)) if e >= 0 => u32::try_from(e)
                .ok()
                .and_then(|e| b.checked_pow(e))
                .map_or_else(|| Number::Real((b as f64).powf(e as f64)), Number::Integer),
            (Number::Complex(_), _) | (_, Number::Complex(_)) => {
                Number::Complex(complex_pow(self.to_complex(), exp.to_complex()))
            }
            _ => {
                let (b, e) = (self.as_real(), exp.as_real());
                if b < 0.0 && e.fract() != 0.0 {
                    Number::Complex(complex_pow(Complex64::new(b, 0.0), Complex64::new(e, 0.0)))
                } else {
                    Number::Real(b.powf(e))
                }
            }
        }
    }

    pub fn abs(self) -> Number {
        match self {
            Number::Integer(n) => n
                .checked_abs()
                .map_or_else(|| Number::Real((n as f64).abs()), Number::Integer),
            Number::Real(r) => Number::Real(r.abs()),
            Number::Complex(z) => Number::Real(z.norm()),
        }
    }

    pub fn sqrt(self) -> Number {
        match self {
            Number::Complex(z) => Number::Complex(z.sqrt()),
            other => {
                let r = other.as_real();
                if r < 0.0 {
                    return Number::Complex(Complex64::new(r, 0.0).sqrt());
                }
                let root = r.sqrt();
                match other {
                    Number::Integer(_) if root.fract() == 0.0 => Number::Integer(root as i64),
                    _ => Number::Real(root),
                }
            }
        }
    }

    /// Natural logarithm; negative reals promote to the principal complex value
    pub fn ln(self) -> Number {
        match self {
            Number::Complex(z) => Number::Complex(z.ln()),
            other => {
                let r = other.as_real();
                if r < 0.0 {
                    Number::Complex(Complex64::new(r, 0.0).ln())
                } else {
                    Number::Real(r.ln())
                }
            }
        }
    }
}

fn complex_pow(base: Complex64, exp: Complex64) -> Complex64 {
    if base.is_zero() {
        if exp.is_zero() {
            Complex64::one()
        } else {
            Complex64::zero()
        }
    } else {
        base.powc(exp)
    }
}

impl Add for Number {
    type Output = Number;
    fn add(self, rhs: Number) -> Number {
        self.binary(rhs, i64::checked_add, |a, b| a + b, |a, b| a + b)
    }
}

impl Sub for Number {
    type Output = Number;
    fn sub(self, rhs: Number) -> Number {
        self.binary(rhs, i64::checked_sub, |a, b| a - b, |a, b| a - b)
    }
}

impl Mul for Number {
    type Output = Number;
    fn mul(self, rhs: Number) -> Number {
        self.binary(rhs, i64::checked_mul, |a, b| a * b, |a, b| a * b)
    }
}

impl Div for Number {
    type Output = Number;
    /// Exact integer quotients stay integers; everything else is computed in floating
    /// point, so dividing by zero yields an infinite or NaN `Real`.
    fn div(self, rhs: Number) -> Number {
        self.binary(
            rhs,
            |a, b| {
                if b != 0 && a.checked_rem(b) == Some(0) {
                    a.checked_div(b)
                } else {
                    None
                }
            },
            |a, b| a / b,
            |a, b| a / b,
        )
    }
}

impl Neg for Number {
    type Output = Number;
    fn neg(self) -> Number {
        match self {
            Number::Integer(n) => n
                .checked_neg()
                .map_or_else(|| Number::Real(-(n as f64)), Number::Integer),
            Number::Real(r) => Number::Real(-r),
            Number::Complex(z) => Number::Complex(-z),
        }
    }
}

impl Zero for Number {
    fn zero() -> Self {
        Number::Integer(0)
    }

    fn is_zero(&self) -> bool {
        match self {
            Number::Integer(n) => *n == 0,
            Number::Real(r) => *r == 0.0,
            Number::Complex(z) => z.is_zero(),
        }
    }
}

impl One for Number {
    fn one() -> Self {
        Number::Integer(1)
    }
}

/// Bit pattern with `-0.0` folded into `0.0` and every NaN into one payload
fn float_key(v: f64) -> u64 {
    if v == 0.0 {
        0
    } else if v.is_nan() {
        f64::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

// Structural equality: the tag is part of the value
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Real(a), Number::Real(b)) => float_key(*a) == float_key(*b),
            (Number::Complex(a), Number::Complex(b)) => {
                float_key(a.re) == float_key(b.re) && float_key(a.im) == float_key(b.im)
            }
            _ => false,
        }
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Number::Integer(n) => n.hash(state),
            Number::Real(r) => float_key(*r).hash(state),
            Number::Complex(z) => {
                float_key(z.re).hash(state);
                float_key(z.im).hash(state);
            }
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Integer(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::Integer(n as i64)
    }
}

impl From<f64> for Number {
    fn from(r: f64) -> Self {
        Number::Real(r)
    }
}

impl From<Complex64> for Number {
    fn from(z: Complex64) -> Self {
        Number::Complex(z)
    }
}

pub(crate) fn format_real(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        // Display as integer if no fractional part
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// `2i`, `i`, `-i`
fn imaginary(im: f64) -> String {
    if im == 1.0 {
        "i".to_string()
    } else if im == -1.0 {
        "-i".to_string()
    } else {
        format!("{}i", format_real(im))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Real(r) => write!(f, "{}", format_real(*r)),
            Number::Complex(z) => {
                if z.im == 0.0 {
                    write!(f, "{}", format_real(z.re))
                } else if z.re == 0.0 {
                    write!(f, "{}", imaginary(z.im))
                } else if z.im < 0.0 {
                    write!(f, "{} - {}", format_real(z.re), imaginary(-z.im))
                } else {
                    write!(f, "{} + {}", format_real(z.re), imaginary(z.im))
                }
            }
        }
    }
}
