use crate::Expr;
use crate::simplification::rules::ExprKind;

/// `(a, b, is_sum)` for `a + b` or `a - b`
fn binomial(expr: &Expr) -> Option<(&Expr, &Expr, bool)> {
    match expr {
        Expr::Add(a, b) => Some((&**a, &**b, true)),
        Expr::Sub(a, b) => Some((&**a, &**b, false)),
        _ => None,
    }
}

rule!(
    /// (a ± b)^2 = a^2 ± 2ab + b^2
    PerfectSquareRule,
    "perfect_square",
    50,
    Algebraic,
    &[ExprKind::Pow],
    |expr: &Expr| {
        if let Expr::Pow(base, exp) = expr
            && exp.as_number().and_then(|n| n.as_i64()) == Some(2)
            && let Some((a, b, is_sum)) = binomial(base)
        {
            let a2 = Expr::pow(a.clone(), Expr::int(2));
            let ab = Expr::mul(Expr::mul(Expr::int(2), a.clone()), b.clone());
            let b2 = Expr::pow(b.clone(), Expr::int(2));
            let head = if is_sum {
                Expr::add(a2, ab)
            } else {
                Expr::sub(a2, ab)
            };
            return Some(Expr::add(head, b2));
        }
        None
    }
);

rule!(
    /// (a + b)(a - b) = a^2 - b^2, in either order
    DifferenceOfSquaresRule,
    "difference_of_squares",
    50,
    Algebraic,
    &[ExprKind::Mul],
    |expr: &Expr| {
        let Expr::Mul(l, r) = expr else {
            return None;
        };
        let (a1, b1, s1) = binomial(l)?;
        let (a2, b2, s2) = binomial(r)?;
        if s1 != s2 && a1 == a2 && b1 == b2 {
            return Some(Expr::sub(
                Expr::pow(a1.clone(), Expr::int(2)),
                Expr::pow(b1.clone(), Expr::int(2)),
            ));
        }
        None
    }
);
