//! Dense single-variable polynomials
//!
//! Coefficients are stored highest degree first, so `degree == coeffs.len() - 1`.
//! Leading zeros are stripped on construction; the zero polynomial is `[0]`.

use std::fmt;

use num_complex::Complex64;
use num_traits::{One, Zero};

use crate::Expr;
use crate::error::MathError;
use crate::number::{Number, format_real};
use crate::symbol::Symbol;

mod roots;

pub use roots::{DK_MAX_ITERATIONS, DK_TOLERANCE, durand_kerner};

/// Degree class; selects the root formula and carries no state of its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degree {
    Constant,
    Linear,
    Quadratic,
    Cubic,
    Quartic,
    Higher(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Polynomial {
    coeffs: Vec<Number>,
    var: Symbol,
}

/// Largest integer exponent `from_expr` expands
const MAX_EXPANDED_POWER: i64 = 64;

impl Polynomial {
    /// Polynomial in `x` from coefficients, highest degree first
    ///
    /// # Example
    /// ```ignore
    /// let p = Polynomial::new([1, -3, 2]);  // x² - 3x + 2
    /// assert_eq!(p.degree(), 2);
    /// ```
    pub fn new<I, N>(coeffs: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Number>,
    {
        Self::with_var(coeffs, "x")
    }

    pub fn with_var<I, N>(coeffs: I, var: impl Into<Symbol>) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Number>,
    {
        Self::from_numbers(coeffs.into_iter().map(Into::into).collect(), var.into())
    }

    fn from_numbers(mut coeffs: Vec<Number>, var: Symbol) -> Self {
        let leading_zeros = coeffs
            .iter()
            .take_while(|c| c.approx_zero())
            .count()
            .min(coeffs.len().saturating_sub(1));
        coeffs.drain(..leading_zeros);
        if coeffs.is_empty() {
            coeffs.push(Number::zero());
        }
        Polynomial { coeffs, var }
    }

    pub fn zero(var: Symbol) -> Self {
        Polynomial {
            coeffs: vec![Number::zero()],
            var,
        }
    }

    pub fn constant(c: impl Into<Number>) -> Self {
        Self::new([c.into()])
    }

    /// `a·x + b`
    pub fn linear(a: impl Into<Number>, b: impl Into<Number>) -> Self {
        Self::new([a.into(), b.into()])
    }

    /// `a·x² + b·x + c`
    pub fn quadratic(a: impl Into<Number>, b: impl Into<Number>, c: impl Into<Number>) -> Self {
        Self::new([a.into(), b.into(), c.into()])
    }

    /// `a·x³ + b·x² + c·x + d`
    pub fn cubic(
        a: impl Into<Number>,
        b: impl Into<Number>,
        c: impl Into<Number>,
        d: impl Into<Number>,
    ) -> Self {
        Self::new([a.into(), b.into(), c.into(), d.into()])
    }

    /// `a·x⁴ + b·x³ + c·x² + d·x + e`
    pub fn quartic(
        a: impl Into<Number>,
        b: impl Into<Number>,
        c: impl Into<Number>,
        d: impl Into<Number>,
        e: impl Into<Number>,
    ) -> Self {
        Self::new([a.into(), b.into(), c.into(), d.into(), e.into()])
    }

    pub fn coeffs(&self) -> &[Number] {
        &self.coeffs
    }

    pub fn var(&self) -> &Symbol {
        &self.var
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn degree_class(&self) -> Degree {
        match self.degree() {
            0 => Degree::Constant,
            1 => Degree::Linear,
            2 => Degree::Quadratic,
            3 => Degree::Cubic,
            4 => Degree::Quartic,
            n => Degree::Higher(n),
        }
    }

    pub fn leading(&self) -> Number {
        self.coeffs[0]
    }

    pub fn is_zero(&self) -> bool {
        self.degree() == 0 && self.coeffs[0].approx_zero()
    }

    /// Same coefficients in a different variable
    pub fn rename(&self, var: impl Into<Symbol>) -> Self {
        Polynomial {
            coeffs: self.coeffs.clone(),
            var: var.into(),
        }
    }

    /// Horner evaluation
    pub fn eval(&self, x: Number) -> Number {
        self.coeffs
            .iter()
            .fold(Number::zero(), |acc, &c| acc * x + c)
    }

    pub fn derivative(&self) -> Polynomial {
        let n = self.degree();
        let coeffs = self.coeffs[..n]
            .iter()
            .enumerate()
            .map(|(i, &c)| c * Number::Integer((n - i) as i64))
            .collect();
        Self::from_numbers(coeffs, self.var.clone())
    }

    /// Antiderivative with zero constant term
    pub fn integral(&self) -> Polynomial {
        let n = self.degree();
        let mut coeffs: Vec<Number> = self
            .coeffs
            .iter()
            .enumerate()
            .map(|(i, &c)| c / Number::Integer((n - i + 1) as i64))
            .collect();
        coeffs.push(Number::zero());
        Self::from_numbers(coeffs, self.var.clone())
    }

    /// Variable of a binary result: a constant operand adopts the other's
    fn joint_var(&self, other: &Polynomial) -> Symbol {
        if self.degree() == 0 {
            other.var.clone()
        } else {
            self.var.clone()
        }
    }

    pub fn add(&self, other: &Polynomial) -> Polynomial {
        let len = self.coeffs.len().max(other.coeffs.len());
        let padded = |p: &Polynomial, i: usize| {
            let offset = len - p.coeffs.len();
            if i < offset {
                Number::zero()
            } else {
                p.coeffs[i - offset]
            }
        };
        let coeffs = (0..len).map(|i| padded(self, i) + padded(other, i)).collect();
        Self::from_numbers(coeffs, self.joint_var(other))
    }

    pub fn sub(&self, other: &Polynomial) -> Polynomial {
        self.add(&other.scale(Number::Integer(-1)))
    }

    pub fn mul(&self, other: &Polynomial) -> Polynomial {
        let mut coeffs = vec![Number::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] = coeffs[i + j] + a * b;
            }
        }
        Self::from_numbers(coeffs, self.joint_var(other))
    }

    pub fn scale(&self, factor: Number) -> Polynomial {
        let coeffs = self.coeffs.iter().map(|&c| c * factor).collect();
        Self::from_numbers(coeffs, self.var.clone())
    }

    /// Divide every coefficient by the leading one
    pub fn monic(&self) -> Polynomial {
        if self.is_zero() {
            return self.clone();
        }
        let lead = self.leading();
        let coeffs = self.coeffs.iter().map(|&c| c / lead).collect();
        Self::from_numbers(coeffs, self.var.clone())
    }

    /// Polynomial long division: `self = quotient · divisor + remainder`
    pub fn div_rem(&self, divisor: &Polynomial) -> Result<(Polynomial, Polynomial), MathError> {
        if divisor.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok(self.div_rem_nonzero(divisor))
    }

    fn div_rem_nonzero(&self, divisor: &Polynomial) -> (Polynomial, Polynomial) {
        let var = self.joint_var(divisor);
        let n = self.coeffs.len();
        let m = divisor.coeffs.len();
        if n < m {
            return (Polynomial::zero(var.clone()), self.rename(var));
        }

        let mut rem = self.coeffs.clone();
        let mut quot = vec![Number::zero(); n - m + 1];
        for i in 0..=(n - m) {
            let factor = rem[i] / divisor.coeffs[0];
            quot[i] = factor;
            for (j, &d) in divisor.coeffs.iter().enumerate() {
                rem[i + j] = rem[i + j] - factor * d;
            }
            // cancelled exactly by construction
            rem[i] = Number::zero();
        }

        let remainder = rem.split_off(n - m + 1);
        (
            Self::from_numbers(quot, var.clone()),
            Self::from_numbers(remainder, var),
        )
    }

    /// Monic greatest common divisor (Euclid with tolerance)
    pub fn gcd(&self, other: &Polynomial) -> Polynomial {
        let (mut a, mut b) = (self.clone(), other.clone());
        if a.degree() < b.degree() {
            std::mem::swap(&mut a, &mut b);
        }
        while !b.is_zero() {
            let (_, r) = a.div_rem_nonzero(&b);
            a = b;
            b = r.monic();
        }
        a.monic()
    }

    /// Recognize a polynomial-shaped tree in one variable
    ///
    /// When `var` is `None` the single free variable of `expr` is used (or `x` for
    /// constants). Returns `None` for anything that is not a polynomial in that
    /// variable.
    pub fn from_expr(expr: &Expr, var: Option<&str>) -> Option<Polynomial> {
        let name = match var {
            Some(v) => v.to_string(),
            None => {
                let vars = expr.variables();
                if vars.len() > 1 {
                    return None;
                }
                vars.into_iter().next().unwrap_or_else(|| "x".to_string())
            }
        };
        Self::collect(expr, &Symbol::new(name))
    }

    fn collect(expr: &Expr, var: &Symbol) -> Option<Polynomial> {
        Some(match expr {
            Expr::Literal(lit) => Self::from_numbers(vec![lit.value], var.clone()),
            Expr::Variable(s) if s == var => {
                Self::from_numbers(vec![Number::one(), Number::zero()], var.clone())
            }
            Expr::Poly(p) if p.var == *var || p.degree() == 0 => p.rename(var.clone()),
            Expr::Add(l, r) => Self::collect(l, var)?.add(&Self::collect(r, var)?),
            Expr::Sub(l, r) => Self::collect(l, var)?.sub(&Self::collect(r, var)?),
            Expr::Mul(l, r) => Self::collect(l, var)?.mul(&Self::collect(r, var)?),
            Expr::Neg(u) => Self::collect(u, var)?.scale(Number::Integer(-1)),
            Expr::Group(u) => Self::collect(u, var)?,
            Expr::Unary {
                op: crate::ast::UnaryOp::Plus,
                operand,
            } => Self::collect(operand, var)?,
            Expr::Div(l, r) => {
                let d = r.as_number().filter(|d| !d.approx_zero())?;
                Self::collect(l, var)?.scale(Number::one() / d)
            }
            Expr::Pow(base, exp) => {
                let n = exp.as_number().and_then(|n| match n {
                    Number::Integer(k) => Some(k),
                    _ => None,
                })?;
                if !(0..=MAX_EXPANDED_POWER).contains(&n) {
                    return None;
                }
                let b = Self::collect(base, var)?;
                (0..n).fold(
                    Self::from_numbers(vec![Number::one()], var.clone()),
                    |acc, _| acc.mul(&b),
                )
            }
            _ => return None,
        })
    }

    /// Expression tree `c₀·xⁿ + … + cₙ`, zero terms dropped
    pub fn to_expr(&self) -> Expr {
        let n = self.degree();
        let x = self.var.to_expr();
        let term = |c: Number, k: usize| -> Expr {
            let power = match k {
                0 => return Expr::number(c),
                1 => x.clone(),
                _ => Expr::pow(x.clone(), Expr::int(k as i64)),
            };
            if c == Number::Integer(1) || (c.kind() != crate::number::NumericKind::Integer && c.approx_one()) {
                power
            } else {
                Expr::mul(Expr::number(c), power)
            }
        };

        let mut acc: Option<Expr> = None;
        for (i, &c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            let k = n - i;
            acc = Some(match acc {
                None => term(c, k),
                Some(prev) if c.is_negative() => Expr::sub(prev, term(-c, k)),
                Some(prev) => Expr::add(prev, term(c, k)),
            });
        }
        acc.unwrap_or_else(|| Expr::int(0))
    }

    /// All complex roots, with multiplicity, sorted by real then imaginary part
    pub fn roots(&self) -> Result<Vec<Complex64>, MathError> {
        let coeffs: Vec<Complex64> = self.coeffs.iter().map(Number::to_complex).collect();
        let mut found = roots::solve(&coeffs)?;
        for z in &mut found {
            *z = roots::clean(*z);
        }
        found.sort_by(|a, b| a.re.total_cmp(&b.re).then(a.im.total_cmp(&b.im)));
        Ok(found)
    }

    /// One linear factor per root, e.g. `(x - 2)` or `(x - (1 + 2i))`
    pub fn find_factors(&self) -> Result<Vec<String>, MathError> {
        let var = self.var.name();
        Ok(self
            .roots()?
            .into_iter()
            .map(|z| {
                let re = round_to(z.re, 10);
                let im = round_to(z.im, 10);
                if im == 0.0 {
                    if re == 0.0 {
                        var.to_string()
                    } else if re < 0.0 {
                        format!("({} + {})", var, format_real(-re))
                    } else {
                        format!("({} - {})", var, format_real(re))
                    }
                } else {
                    let root = Number::Complex(Complex64::new(re + 0.0, im)).to_string();
                    if root.starts_with('-') || root.contains(' ') {
                        format!("({} - ({}))", var, root)
                    } else {
                        format!("({} - {})", var, root)
                    }
                }
            })
            .collect())
    }
}

fn round_to(v: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    // + 0.0 turns -0.0 into 0.0
    (v * scale).round() / scale + 0.0
}

fn superscript(n: usize) -> String {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    n.to_string()
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| DIGITS[d as usize]))
        .collect()
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        let n = self.degree();
        let mut first = true;
        for (i, &c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            let k = n - i;
            let negative = c.is_negative();
            let magnitude = if negative { -c } else { c };

            if first {
                if negative {
                    write!(f, "-")?;
                }
            } else {
                write!(f, "{}", if negative { " - " } else { " + " })?;
            }
            first = false;

            let coeff = match magnitude {
                Number::Complex(z) if z.im != 0.0 => format!("({})", magnitude),
                _ => magnitude.to_string(),
            };
            match k {
                0 => write!(f, "{}", coeff)?,
                _ => {
                    if !magnitude.approx_one() || matches!(magnitude, Number::Complex(z) if z.im != 0.0) {
                        write!(f, "{}", coeff)?;
                    }
                    write!(f, "{}", self.var)?;
                    if k > 1 {
                        write!(f, "{}", superscript(k))?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_strips_leading_zeros() {
        let p = Polynomial::new([0, 0, 2, 1]);
        assert_eq!(p.coeffs(), &[Number::Integer(2), Number::Integer(1)]);
        assert_eq!(p.degree_class(), Degree::Linear);
        assert!(Polynomial::new([0, 0]).is_zero());
        assert_eq!(Polynomial::new(Vec::<i64>::new()).degree(), 0);
    }

    #[test]
    fn test_display_superscripts() {
        assert_eq!(Polynomial::new([1, -3, 2]).to_string(), "x² - 3x + 2");
        assert_eq!(Polynomial::new([-1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5]).to_string(), "-x¹⁰ + 5");
        assert_eq!(Polynomial::new([2.5, 0.0]).to_string(), "2.5x");
    }

    #[test]
    fn test_eval_horner() {
        let p = Polynomial::new([2, -3, 1]);
        assert_eq!(p.eval(Number::Integer(3)), Number::Integer(10));
    }

    #[test]
    fn test_derivative_and_integral() {
        let p = Polynomial::new([3, 2, 1]);
        assert_eq!(p.derivative(), Polynomial::new([6, 2]));
        assert_eq!(p.derivative().integral(), Polynomial::new([3, 2, 0]));
        let half = Polynomial::new([1, 1]).integral();
        assert!(half.coeffs()[0].approx_eq(&Number::Real(0.5)));
        assert!(half.coeffs()[1].approx_one());
        assert_eq!(half.degree(), 2);
    }

    #[test]
    fn test_div_rem() {
        // (x² - 1) / (x - 1) = x + 1
        let (q, r) = Polynomial::new([1, 0, -1])
            .div_rem(&Polynomial::new([1, -1]))
            .unwrap();
        assert_eq!(q, Polynomial::new([1, 1]));
        assert!(r.is_zero());

        let (q, r) = Polynomial::new([1, 0, 1])
            .div_rem(&Polynomial::new([1, -1]))
            .unwrap();
        assert_eq!(q, Polynomial::new([1, 1]));
        assert_eq!(r, Polynomial::constant(2));

        let zero = Polynomial::constant(0);
        assert_eq!(
            Polynomial::new([1, 1]).div_rem(&zero),
            Err(MathError::DivisionByZero)
        );
    }

    #[test]
    fn test_gcd() {
        // (x - 1)(x - 2) and (x - 1)(x + 3)
        let a = Polynomial::new([1, -3, 2]);
        let b = Polynomial::new([1, 2, -3]);
        let g = a.gcd(&b);
        assert_eq!(g.degree(), 1);
        assert!(g.eval(Number::Integer(1)).approx_zero());
    }

    #[test]
    fn test_from_expr_and_back() {
        let x = Expr::symbol("x");
        // (x + 1)^2 - 3
        let expr = Expr::sub(
            Expr::pow(Expr::add(x.clone(), Expr::int(1)), Expr::int(2)),
            Expr::int(3),
        );
        let p = Polynomial::from_expr(&expr, None).unwrap();
        assert_eq!(p, Polynomial::new([1, 2, -2]));
        assert_eq!(p.to_expr().to_string(), "x^2 + 2x - 2");

        assert!(Polynomial::from_expr(&x.clone().sin(), None).is_none());
        let two_vars = Expr::mul(x, Expr::symbol("y"));
        assert!(Polynomial::from_expr(&two_vars, None).is_none());
    }

    #[test]
    fn test_find_factors() {
        let p = Polynomial::new([1, -3, 2]);
        assert_eq!(p.find_factors().unwrap(), vec!["(x - 1)", "(x - 2)"]);

        let p = Polynomial::new([1, 0, 1]);
        assert_eq!(p.find_factors().unwrap(), vec!["(x - (-i))", "(x - i)"]);

        let p = Polynomial::new([1, 3, 0]);
        assert_eq!(p.find_factors().unwrap(), vec!["(x + 3)", "x"]);
    }
}
