//! Centralized mathematical function registry
//!
//! This module provides a single source of truth for the one-operand
//! transcendental functions: numeric evaluation with domain checks, the outer
//! derivative used by the chain rule and the antiderivative used for linear
//! operands. The builtin callables reachable through `Call` nodes live in
//! [`builtins`].

use crate::Expr;
use crate::error::MathError;
use crate::number::Number;

pub(crate) mod builtins;
pub(crate) mod definitions;
pub(crate) mod registry;

/// One-operand function node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Csc,
    Sec,
    Cot,
    Asin,
    Acos,
    Atan,
    Ln,
    Exp,
}

impl Func {
    pub const ALL: [Func; 11] = [
        Func::Sin,
        Func::Cos,
        Func::Tan,
        Func::Csc,
        Func::Sec,
        Func::Cot,
        Func::Asin,
        Func::Acos,
        Func::Atan,
        Func::Ln,
        Func::Exp,
    ];

    /// Canonical name, as printed and parsed
    pub fn name(&self) -> &'static str {
        registry::Registry::get(*self).name
    }

    pub fn from_name(name: &str) -> Option<Func> {
        registry::Registry::by_name(name)
    }

    /// Numeric value at `x`, raising domain and pole errors
    pub fn eval(&self, x: Number) -> Result<Number, MathError> {
        (registry::Registry::get(*self).eval)(x)
    }

    /// `f'(u)`; the caller multiplies by `u'`
    pub fn outer_derivative(&self, u: &Expr) -> Expr {
        (registry::Registry::get(*self).derivative)(u)
    }

    /// `F(u)` with `F' = f`; the caller divides by the slope of a linear `u`
    pub fn antiderivative(&self, u: &Expr) -> Expr {
        (registry::Registry::get(*self).antiderivative)(u)
    }
}

// ===== Helper functions for building derivative expressions =====

/// Multiply, optimizing for common cases (0 and 1)
pub(crate) fn mul_opt(a: Expr, b: Expr) -> Expr {
    if a.is_zero_num() || b.is_zero_num() {
        Expr::int(0)
    } else if a.is_one_num() {
        b
    } else if b.is_one_num() {
        a
    } else {
        Expr::mul(a, b)
    }
}

/// Add, optimizing for zero operands
pub(crate) fn add_opt(a: Expr, b: Expr) -> Expr {
    if a.is_zero_num() {
        b
    } else if b.is_zero_num() {
        a
    } else {
        Expr::add(a, b)
    }
}

/// Subtract, optimizing for zero operands
pub(crate) fn sub_opt(a: Expr, b: Expr) -> Expr {
    if b.is_zero_num() {
        a
    } else if a.is_zero_num() {
        neg(b)
    } else {
        Expr::sub(a, b)
    }
}

/// Divide, optimizing for a zero numerator and a unit denominator
pub(crate) fn div_opt(a: Expr, b: Expr) -> Expr {
    if a.is_zero_num() {
        Expr::int(0)
    } else if b.is_one_num() {
        a
    } else {
        Expr::div(a, b)
    }
}

/// Negate an expression, folding literals and double negation
pub(crate) fn neg(e: Expr) -> Expr {
    match e {
        Expr::Literal(lit) => Expr::number(-lit.value),
        Expr::Neg(inner) => *inner,
        other => Expr::Neg(Box::new(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for f in Func::ALL {
            assert_eq!(Func::from_name(f.name()), Some(f));
        }
        assert_eq!(Func::from_name("sinh"), None);
    }

    #[test]
    fn test_helpers_fold_identities() {
        let x = Expr::symbol("x");
        assert_eq!(mul_opt(Expr::int(1), x.clone()), x);
        assert_eq!(mul_opt(x.clone(), Expr::int(0)), Expr::int(0));
        assert_eq!(add_opt(Expr::int(0), x.clone()), x);
        assert_eq!(sub_opt(Expr::int(0), x.clone()), x.clone().neg());
        assert_eq!(neg(Expr::int(3)), Expr::int(-3));
        assert_eq!(neg(x.clone().neg()), x);
    }
}
