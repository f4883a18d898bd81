use crate::Expr;
use crate::simplification::helpers::{plain_number, split_coefficient, with_coefficient};
use crate::simplification::rules::ExprKind;

rule!(
    /// a·x + b·x = (a + b)·x, a·x - b·x = (a - b)·x
    CombineLikeTermsRule,
    "combine_like_terms",
    80,
    Algebraic,
    &[ExprKind::Add, ExprKind::Sub],
    |expr: &Expr| {
        let (l, r, subtract) = match expr {
            Expr::Add(l, r) => (l, r, false),
            Expr::Sub(l, r) => (l, r, true),
            _ => return None,
        };
        let (a, x) = split_coefficient(l);
        let (b, y) = split_coefficient(r);
        if x != y || plain_number(&x).is_some() {
            return None;
        }
        let c = if subtract { a - b } else { a + b };
        c.is_finite().then(|| with_coefficient(c, x))
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplification::rules::Rule;

    #[test]
    fn test_like_terms() {
        let x = Expr::symbol("x");
        assert_eq!(
            CombineLikeTermsRule.apply(&Expr::add(x.clone(), x.clone())),
            Some(Expr::mul(Expr::int(2), x.clone()))
        );
        let three_x = Expr::mul(Expr::int(3), x.clone());
        assert_eq!(
            CombineLikeTermsRule.apply(&Expr::sub(x.clone(), three_x.clone())),
            Some(Expr::mul(Expr::int(2), x.clone()).neg())
        );
        assert_eq!(
            CombineLikeTermsRule.apply(&Expr::add(x.clone(), Expr::symbol("y"))),
            None
        );
        assert_eq!(CombineLikeTermsRule.apply(&Expr::add(Expr::int(1), Expr::int(2))), None);
    }
}
