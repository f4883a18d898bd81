use crate::Expr;
use crate::ast::UnaryOp;
use crate::number::{Number, NumericKind};
use crate::simplification::helpers::plain_number;
use crate::simplification::rules::{ExprKind, SharedRule};
use std::sync::Arc;

/// Fold `a op b` when the result is finite and, for integer operands, exact
fn fold(expr: &Expr, a: Number, b: Number) -> Option<Number> {
    let integers = a.kind() == NumericKind::Integer && b.kind() == NumericKind::Integer;
    let result = match expr {
        Expr::Add(..) => a + b,
        Expr::Sub(..) => a - b,
        Expr::Mul(..) => a * b,
        Expr::Div(..) => {
            let q = a / b;
            if integers && q.kind() != NumericKind::Integer {
                return None;
            }
            q
        }
        Expr::Pow(..) => {
            let p = a.pow(b);
            if integers && p.kind() != NumericKind::Integer {
                return None;
            }
            // stay on the real line unless an operand already left it
            if p.kind() == NumericKind::Complex && a.kind() != NumericKind::Complex
                && b.kind() != NumericKind::Complex
            {
                return None;
            }
            p
        }
        _ => return None,
    };
    result.is_finite().then_some(result)
}

rule!(
    /// Fold operators whose operands are all plain literals
    FoldConstantsRule,
    "fold_constants",
    100,
    Numeric,
    &[
        ExprKind::Add,
        ExprKind::Sub,
        ExprKind::Mul,
        ExprKind::Div,
        ExprKind::Pow,
        ExprKind::Neg
    ],
    |expr: &Expr| {
        match expr {
            Expr::Neg(u) => plain_number(u).map(|n| Expr::number(-n)),
            Expr::Add(l, r) | Expr::Sub(l, r) | Expr::Mul(l, r) | Expr::Div(l, r) | Expr::Pow(l, r) => {
                let (a, b) = (plain_number(l)?, plain_number(r)?);
                fold(expr, a, b).map(Expr::number)
            }
            _ => None,
        }
    }
);

rule!(
    /// √n for a perfect square integer n
    SqrtPerfectSquareRule,
    "sqrt_perfect_square",
    100,
    Numeric,
    &[ExprKind::Unary],
    |expr: &Expr| {
        if let Expr::Unary {
            op: UnaryOp::Sqrt,
            operand,
        } = expr
            && let Some(n @ Number::Integer(_)) = plain_number(operand)
            && let root @ Number::Integer(_) = n.sqrt()
        {
            return Some(Expr::number(root));
        }
        None
    }
);

rule!(
    /// x + 0 = x, 0 + x = x
    AddZeroRule,
    "add_zero",
    95,
    Numeric,
    &[ExprKind::Add],
    |expr: &Expr| {
        if let Expr::Add(u, v) = expr {
            if u.is_zero_num() {
                return Some((**v).clone());
            }
            if v.is_zero_num() {
                return Some((**u).clone());
            }
        }
        None
    }
);

rule!(
    /// x - 0 = x, 0 - x = -x
    SubZeroRule,
    "sub_zero",
    95,
    Numeric,
    &[ExprKind::Sub],
    |expr: &Expr| {
        if let Expr::Sub(u, v) = expr {
            if v.is_zero_num() {
                return Some((**u).clone());
            }
            if u.is_zero_num() {
                return Some((**v).clone().neg());
            }
        }
        None
    }
);

rule!(
    /// x - x = 0
    SubSelfRule,
    "sub_self",
    95,
    Numeric,
    &[ExprKind::Sub],
    |expr: &Expr| {
        if let Expr::Sub(u, v) = expr
            && u == v
        {
            return Some(Expr::int(0));
        }
        None
    }
);

rule!(
    /// 0 * x = 0, x * 0 = 0
    MulZeroRule,
    "mul_zero",
    95,
    Numeric,
    &[ExprKind::Mul],
    |expr: &Expr| {
        if let Expr::Mul(u, v) = expr
            && (u.is_zero_num() || v.is_zero_num())
        {
            return Some(Expr::int(0));
        }
        None
    }
);

rule!(
    /// 1 * x = x, x * 1 = x
    MulOneRule,
    "mul_one",
    95,
    Numeric,
    &[ExprKind::Mul],
    |expr: &Expr| {
        if let Expr::Mul(u, v) = expr {
            if u.is_one_num() {
                return Some((**v).clone());
            }
            if v.is_one_num() {
                return Some((**u).clone());
            }
        }
        None
    }
);

rule!(
    /// x / 1 = x
    DivOneRule,
    "div_one",
    95,
    Numeric,
    &[ExprKind::Div],
    |expr: &Expr| {
        if let Expr::Div(u, v) = expr
            && v.is_one_num()
        {
            return Some((**u).clone());
        }
        None
    }
);

rule!(
    /// 0 / x = 0 for a divisor that is not itself zero
    ZeroDivRule,
    "zero_div",
    95,
    Numeric,
    &[ExprKind::Div],
    |expr: &Expr| {
        if let Expr::Div(u, v) = expr
            && u.is_zero_num()
            && !v.is_zero_num()
        {
            return Some(Expr::int(0));
        }
        None
    }
);

rule!(
    /// x / x = 1
    DivSelfRule,
    "div_self",
    95,
    Numeric,
    &[ExprKind::Div],
    |expr: &Expr| {
        if let Expr::Div(u, v) = expr
            && u == v
            && !v.is_zero_num()
        {
            return Some(Expr::int(1));
        }
        None
    }
);

rule!(
    /// x^1 = x
    PowOneRule,
    "pow_one",
    95,
    Numeric,
    &[ExprKind::Pow],
    |expr: &Expr| {
        if let Expr::Pow(u, v) = expr
            && v.is_one_num()
        {
            return Some((**u).clone());
        }
        None
    }
);

rule!(
    /// x^0 = 1
    PowZeroRule,
    "pow_zero",
    95,
    Numeric,
    &[ExprKind::Pow],
    |expr: &Expr| {
        if let Expr::Pow(_, v) = expr
            && v.is_zero_num()
        {
            return Some(Expr::int(1));
        }
        None
    }
);

rule!(
    /// 1^x = 1
    OnePowRule,
    "one_pow",
    95,
    Numeric,
    &[ExprKind::Pow],
    |expr: &Expr| {
        if let Expr::Pow(u, _) = expr
            && u.is_one_num()
        {
            return Some(Expr::int(1));
        }
        None
    }
);

pub(crate) fn get_numeric_rules() -> Vec<SharedRule> {
    vec![
        Arc::new(FoldConstantsRule),
        Arc::new(SqrtPerfectSquareRule),
        Arc::new(AddZeroRule),
        Arc::new(SubZeroRule),
        Arc::new(SubSelfRule),
        Arc::new(MulZeroRule),
        Arc::new(MulOneRule),
        Arc::new(DivOneRule),
        Arc::new(ZeroDivRule),
        Arc::new(DivSelfRule),
        Arc::new(PowOneRule),
        Arc::new(PowZeroRule),
        Arc::new(OnePowRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplification::rules::Rule;

    #[test]
    fn test_fold_keeps_inexact_integer_division() {
        let third = Expr::div(Expr::int(1), Expr::int(3));
        assert_eq!(FoldConstantsRule.apply(&third), None);
        let two = Expr::div(Expr::int(6), Expr::int(3));
        assert_eq!(FoldConstantsRule.apply(&two), Some(Expr::int(2)));
        let half = Expr::div(Expr::real(1.0), Expr::int(2));
        assert_eq!(FoldConstantsRule.apply(&half), Some(Expr::real(0.5)));
    }

    #[test]
    fn test_fold_skips_non_finite_and_complex() {
        assert_eq!(FoldConstantsRule.apply(&Expr::div(Expr::int(1), Expr::int(0))), None);
        let root = Expr::pow(Expr::int(-4), Expr::real(0.5));
        assert_eq!(FoldConstantsRule.apply(&root), None);
    }

    #[test]
    fn test_identities() {
        let x = Expr::symbol("x");
        assert_eq!(MulOneRule.apply(&Expr::mul(Expr::int(1), x.clone())), Some(x.clone()));
        assert_eq!(
            SubZeroRule.apply(&Expr::sub(Expr::int(0), x.clone())),
            Some(x.clone().neg())
        );
        assert_eq!(ZeroDivRule.apply(&Expr::div(Expr::int(0), Expr::int(0))), None);
        assert_eq!(DivSelfRule.apply(&Expr::div(x.clone(), x)), Some(Expr::int(1)));
    }

    #[test]
    fn test_sqrt_perfect_square() {
        assert_eq!(SqrtPerfectSquareRule.apply(&Expr::int(16).sqrt()), Some(Expr::int(4)));
        assert_eq!(SqrtPerfectSquareRule.apply(&Expr::int(2).sqrt()), None);
    }
}
