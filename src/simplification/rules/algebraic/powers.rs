use crate::Expr;
use crate::simplification::helpers::{add_exponents, base_exponent, plain_number};
use crate::simplification::rules::ExprKind;

/// a^p · a^q = a^(p+q), with bare `a` read as `a^1`
fn merge(l: &Expr, r: &Expr) -> Option<Expr> {
    if plain_number(l).is_some() && plain_number(r).is_some() {
        return None;
    }
    let (b1, p) = base_exponent(l);
    let (b2, q) = base_exponent(r);
    if b1 != b2 {
        return None;
    }
    Some(Expr::pow(b1.clone(), add_exponents(p, q)))
}

rule!(
    /// Same-base exponent merging, also across a leading coefficient:
    /// c·a^p · a^q = c·a^(p+q)
    PowerCollectionRule,
    "power_collection",
    70,
    Algebraic,
    &[ExprKind::Mul],
    |expr: &Expr| {
        let Expr::Mul(l, r) = expr else {
            return None;
        };
        if let Some(merged) = merge(l, r) {
            return Some(merged);
        }
        if let Expr::Mul(c, inner) = &**l
            && let Some(merged) = merge(inner, r)
        {
            return Some(Expr::mul((**c).clone(), merged));
        }
        None
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplification::rules::Rule;

    #[test]
    fn test_exponent_merging() {
        let x = Expr::symbol("x");
        assert_eq!(
            PowerCollectionRule.apply(&Expr::mul(x.clone(), x.clone())),
            Some(Expr::pow(x.clone(), Expr::int(2)))
        );
        let x2 = Expr::pow(x.clone(), Expr::int(2));
        let x3 = Expr::pow(x.clone(), Expr::int(3));
        assert_eq!(
            PowerCollectionRule.apply(&Expr::mul(x2.clone(), x3)),
            Some(Expr::pow(x.clone(), Expr::int(5)))
        );
        let scaled = Expr::mul(Expr::mul(Expr::int(4), x2), x.clone());
        assert_eq!(
            PowerCollectionRule.apply(&scaled),
            Some(Expr::mul(Expr::int(4), Expr::pow(x.clone(), Expr::int(3))))
        );
        assert_eq!(PowerCollectionRule.apply(&Expr::mul(Expr::int(2), x)), None);
    }
}
