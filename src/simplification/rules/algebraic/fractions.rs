use crate::Expr;
use crate::simplification::helpers::plain_number;
use crate::simplification::rules::ExprKind;

rule!(
    /// Rational function reduction, in order:
    /// literal folding, exact division to the quotient, GCD cancellation.
    /// Non-polynomial sides are left alone.
    RationalReduceRule,
    "rational_reduce",
    90,
    Algebraic,
    &[ExprKind::Rational],
    |expr: &Expr| {
        let Expr::Rational(r) = expr else {
            return None;
        };

        if let (Some(n), Some(d)) = (plain_number(r.numerator()), plain_number(r.denominator())) {
            let q = n / d;
            return q.is_finite().then(|| Expr::number(q));
        }

        let (quotient, remainder) = r.divide().ok()?;
        if remainder.is_zero() {
            return Some(Expr::Poly(quotient.clone()));
        }

        let (num, den) = r.polynomials()?;
        let common = num.gcd(&den);
        if common.degree() == 0 {
            return None;
        }
        let (num, _) = num.div_rem(&common).ok()?;
        let (den, _) = den.div_rem(&common).ok()?;
        log::trace!("cancelled common factor {} from {}", common, expr);
        Some(Expr::rational(Expr::Poly(num), Expr::Poly(den)))
    }
);
