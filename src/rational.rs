//! Numerator/denominator pair with a compute-once polynomial division
//!
//! The (quotient, remainder) pair is computed the first time it is requested
//! and cached in a `OnceLock`. Every transformation builds a new node, which
//! starts with an empty cache.

use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::Expr;
use crate::error::MathError;
use crate::poly::Polynomial;

type Division = Result<(Polynomial, Polynomial), MathError>;

#[derive(Debug)]
pub struct RationalFunction {
    numerator: Box<Expr>,
    denominator: Box<Expr>,
    division: OnceLock<Division>,
}

impl RationalFunction {
    pub fn new(numerator: Expr, denominator: Expr) -> Self {
        RationalFunction {
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
            division: OnceLock::new(),
        }
    }

    pub fn numerator(&self) -> &Expr {
        &self.numerator
    }

    pub fn denominator(&self) -> &Expr {
        &self.denominator
    }

    /// Both sides as polynomials in one shared variable, if they are polynomials
    pub fn polynomials(&self) -> Option<(Polynomial, Polynomial)> {
        let mut vars = self.numerator.variables();
        vars.extend(self.denominator.variables());
        if vars.len() > 1 {
            return None;
        }
        let var = vars.into_iter().next();
        let num = Polynomial::from_expr(&self.numerator, var.as_deref())?;
        let den = Polynomial::from_expr(&self.denominator, var.as_deref())?;
        Some((num, den))
    }

    /// Polynomial long division of numerator by denominator, computed at most once
    ///
    /// Fails with `UnsupportedOperation` when either side is not a polynomial.
    pub fn divide(&self) -> Result<&(Polynomial, Polynomial), MathError> {
        self.division
            .get_or_init(|| {
                let (num, den) = self.polynomials().ok_or_else(|| {
                    MathError::UnsupportedOperation(format!(
                        "polynomial division of ({}) / ({})",
                        self.numerator, self.denominator
                    ))
                })?;
                num.div_rem(&den)
            })
            .as_ref()
            .map_err(|e| e.clone())
    }

    /// True once `divide` has run on this instance
    pub fn is_divided(&self) -> bool {
        self.division.get().is_some()
    }
}

impl Clone for RationalFunction {
    fn clone(&self) -> Self {
        RationalFunction::new((*self.numerator).clone(), (*self.denominator).clone())
    }
}

// Equality and hashing ignore the cache
impl PartialEq for RationalFunction {
    fn eq(&self, other: &Self) -> bool {
        self.numerator == other.numerator && self.denominator == other.denominator
    }
}

impl Eq for RationalFunction {}

impl Hash for RationalFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numerator.hash(state);
        self.denominator.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide_is_cached() {
        let r = RationalFunction::new(
            Polynomial::new([1, 0, -1]).into(),
            Polynomial::new([1, 1]).into(),
        );
        assert!(!r.is_divided());
        let (q, rem) = r.divide().unwrap().clone();
        assert_eq!(q, Polynomial::new([1, -1]));
        assert!(rem.is_zero());
        assert!(r.is_divided());

        // a fresh node starts with an empty cache
        assert!(!r.clone().is_divided());
    }

    #[test]
    fn test_tree_sides_are_recognized() {
        let x = Expr::symbol("x");
        let r = RationalFunction::new(
            Expr::sub(Expr::pow(x.clone(), Expr::int(2)), Expr::int(4)),
            Expr::sub(x, Expr::int(2)),
        );
        let (q, rem) = r.divide().unwrap();
        assert_eq!(*q, Polynomial::new([1, 2]));
        assert!(rem.is_zero());
    }

    #[test]
    fn test_non_polynomial_division_fails() {
        let x = Expr::symbol("x");
        let r = RationalFunction::new(x.clone().sin(), x);
        assert!(matches!(r.divide(), Err(MathError::UnsupportedOperation(_))));
        // the failure is cached too
        assert!(r.is_divided());
    }
}
