use crate::Expr;
use crate::simplification::helpers::plain_number;
use crate::simplification::rules::ExprKind;

rule!(
    /// |c| for a plain literal
    AbsNumericRule,
    "abs_numeric",
    90,
    Algebraic,
    &[ExprKind::Abs],
    |expr: &Expr| {
        if let Expr::Abs(inner) = expr
            && let Some(n) = plain_number(inner)
        {
            return Some(Expr::number(n.abs()));
        }
        None
    }
);

rule!(
    /// ||x|| = |x|, |-x| = |x|
    AbsAbsRule,
    "abs_abs",
    90,
    Algebraic,
    &[ExprKind::Abs],
    |expr: &Expr| {
        if let Expr::Abs(inner) = expr
            && let Expr::Abs(u) | Expr::Neg(u) = &**inner
        {
            return Some((**u).clone().abs());
        }
        None
    }
);

rule!(
    /// --x = x
    DoubleNegRule,
    "double_neg",
    90,
    Algebraic,
    &[ExprKind::Neg],
    |expr: &Expr| {
        if let Expr::Neg(inner) = expr
            && let Expr::Neg(u) = &**inner
        {
            return Some((**u).clone());
        }
        None
    }
);

rule!(
    /// a * (-b) = -(a * b), (-a) * b = -(a * b)
    NegMulRule,
    "neg_mul",
    75,
    Algebraic,
    &[ExprKind::Mul],
    |expr: &Expr| {
        match expr {
            Expr::Mul(a, b) => match (&**a, &**b) {
                (_, Expr::Neg(inner)) => Some(Expr::mul((**a).clone(), (**inner).clone()).neg()),
                (Expr::Neg(inner), _) => Some(Expr::mul((**inner).clone(), (**b).clone()).neg()),
                _ => None,
            },
            _ => None,
        }
    }
);

rule!(
    /// (-a) / b = -(a / b), a / (-b) = -(a / b), a / (-k) = -(a / k) for a literal k
    NegDivRule,
    "neg_div",
    75,
    Algebraic,
    &[ExprKind::Div],
    |expr: &Expr| {
        match expr {
            Expr::Div(a, b) => match (&**a, &**b) {
                (Expr::Neg(inner), _) => Some(Expr::div((**inner).clone(), (**b).clone()).neg()),
                (_, Expr::Neg(inner)) => Some(Expr::div((**a).clone(), (**inner).clone()).neg()),
                _ => {
                    let k = plain_number(b).filter(|k| k.is_negative())?;
                    let positive = -k;
                    let quotient = if positive.approx_one() {
                        (**a).clone()
                    } else {
                        Expr::div((**a).clone(), Expr::number(positive))
                    };
                    Some(quotient.neg())
                }
            },
            _ => None,
        }
    }
);

rule!(
    /// (-c) * x = -(c * x) for a negative plain literal c
    NegativeCoefficientRule,
    "negative_coefficient",
    75,
    Algebraic,
    &[ExprKind::Mul],
    |expr: &Expr| {
        if let Expr::Mul(c, x) = expr
            && let Some(n) = plain_number(c)
            && n.is_negative()
            && plain_number(x).is_none()
        {
            let positive = -n;
            let product = if positive.approx_one() {
                (**x).clone()
            } else {
                Expr::mul(Expr::number(positive), (**x).clone())
            };
            return Some(product.neg());
        }
        None
    }
);
