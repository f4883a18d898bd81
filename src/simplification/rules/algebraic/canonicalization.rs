use crate::Expr;
use crate::ast::UnaryOp;
use crate::number::Number;
use crate::simplification::helpers::plain_number;
use crate::simplification::rules::ExprKind;

rule!(
    /// Parentheses carry no meaning once the tree exists
    GroupUnwrapRule,
    "group_unwrap",
    100,
    Algebraic,
    &[ExprKind::Group],
    |expr: &Expr| {
        if let Expr::Group(inner) = expr {
            return Some((**inner).clone());
        }
        None
    }
);

rule!(
    /// +x = x
    UnaryPlusRule,
    "unary_plus",
    100,
    Algebraic,
    &[ExprKind::Unary],
    |expr: &Expr| {
        if let Expr::Unary {
            op: UnaryOp::Plus,
            operand,
        } = expr
        {
            return Some((**operand).clone());
        }
        None
    }
);

rule!(
    /// a + (-b) = a - b, (-a) + b = b - a, a - (-b) = a + b, and the same for
    /// negative literals
    NormalizeAddNegationRule,
    "normalize_add_negation",
    85,
    Algebraic,
    &[ExprKind::Add, ExprKind::Sub],
    |expr: &Expr| {
        let negated = |e: &Expr| -> Option<Expr> {
            match e {
                Expr::Neg(inner) => Some((**inner).clone()),
                _ => plain_number(e)
                    .filter(|n| n.is_negative())
                    .map(|n| Expr::number(-n)),
            }
        };
        match expr {
            Expr::Add(a, b) => {
                if let Some(b) = negated(&**b) {
                    return Some(Expr::sub((**a).clone(), b));
                }
                if let Expr::Neg(a) = &**a {
                    return Some(Expr::sub((**b).clone(), (**a).clone()));
                }
                None
            }
            Expr::Sub(a, b) => negated(&**b).map(|b| Expr::add((**a).clone(), b)),
            _ => None,
        }
    }
);

rule!(
    /// x * c = c * x for a plain literal c
    CanonicalizeMultiplicationRule,
    "coefficient_first",
    65,
    Algebraic,
    &[ExprKind::Mul],
    |expr: &Expr| {
        if let Expr::Mul(x, c) = expr
            && plain_number(c).is_some()
            && plain_number(x).is_none()
        {
            return Some(Expr::mul((**c).clone(), (**x).clone()));
        }
        None
    }
);

rule!(
    /// c1 * (c2 * x) = (c1 c2) * x
    CoefficientAssociationRule,
    "coefficient_association",
    60,
    Algebraic,
    &[ExprKind::Mul],
    |expr: &Expr| {
        if let Expr::Mul(c1, rest) = expr
            && let Some(a) = plain_number(c1)
            && let Expr::Mul(c2, x) = &**rest
            && let Some(b) = plain_number(c2)
        {
            let product = a * b;
            if !product.is_finite() {
                return None;
            }
            return Some(Expr::mul(Expr::number(product), (**x).clone()));
        }
        None
    }
);

rule!(
    /// c1 * (x / c2) = (c1 / c2) * x and (c1 * x) / c2 = (c1 / c2) * x when c2 divides c1
    CoefficientCancellationRule,
    "coefficient_cancellation",
    60,
    Algebraic,
    &[ExprKind::Mul, ExprKind::Div],
    |expr: &Expr| {
        let (c1, x, c2) = match expr {
            Expr::Mul(c1, rest) => match &**rest {
                Expr::Div(x, c2) => (c1, x, c2),
                _ => return None,
            },
            Expr::Div(product, c2) => match &**product {
                Expr::Mul(c1, x) => (c1, x, c2),
                _ => return None,
            },
            _ => return None,
        };
        let (Number::Integer(a), Number::Integer(b)) = (plain_number(c1)?, plain_number(c2)?)
        else {
            return None;
        };
        let Number::Integer(q) = Number::Integer(a) / Number::Integer(b) else {
            return None;
        };
        Some(if q == 1 {
            (**x).clone()
        } else {
            Expr::mul(Expr::int(q), (**x).clone())
        })
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplification::rules::Rule;

    #[test]
    fn test_negation_becomes_subtraction() {
        let x = Expr::symbol("x");
        let y = Expr::symbol("y");
        assert_eq!(
            NormalizeAddNegationRule.apply(&Expr::add(x.clone(), y.clone().neg())),
            Some(Expr::sub(x.clone(), y.clone()))
        );
        assert_eq!(
            NormalizeAddNegationRule.apply(&Expr::add(x.clone().neg(), y.clone())),
            Some(Expr::sub(y.clone(), x.clone()))
        );
        assert_eq!(
            NormalizeAddNegationRule.apply(&Expr::add(x.clone(), Expr::int(-3))),
            Some(Expr::sub(x.clone(), Expr::int(3)))
        );
        assert_eq!(
            NormalizeAddNegationRule.apply(&Expr::sub(x.clone(), y.clone().neg())),
            Some(Expr::add(x, y))
        );
    }

    #[test]
    fn test_coefficients_move_left_and_combine() {
        let x = Expr::symbol("x");
        assert_eq!(
            CanonicalizeMultiplicationRule.apply(&Expr::mul(x.clone(), Expr::int(3))),
            Some(Expr::mul(Expr::int(3), x.clone()))
        );
        let nested = Expr::mul(Expr::int(2), Expr::mul(Expr::int(3), x.clone()));
        assert_eq!(
            CoefficientAssociationRule.apply(&nested),
            Some(Expr::mul(Expr::int(6), x))
        );
    }

    #[test]
    fn test_divisible_coefficients_cancel() {
        let x = Expr::symbol("x");
        let half = Expr::div(x.clone(), Expr::int(2));
        assert_eq!(
            CoefficientCancellationRule.apply(&Expr::mul(Expr::int(2), half.clone())),
            Some(x.clone())
        );
        assert_eq!(
            CoefficientCancellationRule.apply(&Expr::mul(Expr::int(6), half.clone())),
            Some(Expr::mul(Expr::int(3), x.clone()))
        );
        assert_eq!(
            CoefficientCancellationRule
                .apply(&Expr::div(Expr::mul(Expr::int(4), x.clone()), Expr::int(2))),
            Some(Expr::mul(Expr::int(2), x.clone()))
        );
        // 3/2 is not exact, so the shape stays
        assert_eq!(
            CoefficientCancellationRule.apply(&Expr::mul(Expr::int(3), half)),
            None
        );
        assert_eq!(
            CoefficientCancellationRule.apply(&Expr::mul(Expr::int(2), Expr::div(x, Expr::int(0)))),
            None
        );
    }
}
