use crate::Expr;
use crate::functions::Func;
use crate::simplification::helpers::func_arg;
use crate::simplification::rules::ExprKind;

/// Argument of `f(u)^2`
fn squared(expr: &Expr, func: Func) -> Option<&Expr> {
    match expr {
        Expr::Pow(base, exp) if exp.as_number().and_then(|n| n.as_i64()) == Some(2) => {
            func_arg(base, func)
        }
        _ => None,
    }
}

rule!(
    /// sin(asin(x)) = x, cos(acos(x)) = x, tan(atan(x)) = x
    InverseTrigCompositionRule,
    "inverse_trig_composition",
    80,
    Trigonometric,
    &[ExprKind::Function],
    |expr: &Expr| {
        let Expr::Function { func, arg } = expr else {
            return None;
        };
        let inverse = match func {
            Func::Sin => Func::Asin,
            Func::Cos => Func::Acos,
            Func::Tan => Func::Atan,
            _ => return None,
        };
        func_arg(arg, inverse).cloned()
    }
);

rule!(
    /// sin²(x) + cos²(x) = 1, in either order
    PythagoreanIdentityRule,
    "pythagorean_identity",
    80,
    Trigonometric,
    &[ExprKind::Add],
    |expr: &Expr| {
        let Expr::Add(u, v) = expr else {
            return None;
        };
        let matched = |a: &Expr, b: &Expr| {
            matches!((squared(a, Func::Sin), squared(b, Func::Cos)), (Some(s), Some(c)) if s == c)
        };
        if matched(&**u, &**v) || matched(&**v, &**u) {
            return Some(Expr::int(1));
        }
        None
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplification::rules::Rule;

    #[test]
    fn test_inverse_composition() {
        let x = Expr::symbol("x");
        assert_eq!(
            InverseTrigCompositionRule.apply(&x.clone().asin().sin()),
            Some(x.clone())
        );
        // asin(sin x) is not x outside [-π/2, π/2]
        assert_eq!(InverseTrigCompositionRule.apply(&x.sin().asin()), None);
    }

    #[test]
    fn test_pythagorean() {
        let x = Expr::symbol("x");
        let s2 = Expr::pow(x.clone().sin(), Expr::int(2));
        let c2 = Expr::pow(x.clone().cos(), Expr::int(2));
        assert_eq!(
            PythagoreanIdentityRule.apply(&Expr::add(c2.clone(), s2.clone())),
            Some(Expr::int(1))
        );
        let other = Expr::pow(Expr::symbol("y").cos(), Expr::int(2));
        assert_eq!(PythagoreanIdentityRule.apply(&Expr::add(s2, other)), None);
    }
}
