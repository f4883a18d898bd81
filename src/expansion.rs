//! Distribution of products over sums
//!
//! `expand` works bottom-up: children are expanded first, then the node itself
//! is distributed. The result is not simplified, so `(x + 1)(x + 2)` becomes a
//! four-term sum.

use crate::Expr;

/// Largest integer power of a sum that is multiplied out
const MAX_EXPANDED_POWER: i64 = 8;

/// A signed summand: `true` is positive
type Term = (bool, Expr);

fn is_sum(expr: &Expr) -> bool {
    match expr {
        Expr::Add(..) | Expr::Sub(..) => true,
        Expr::Neg(u) | Expr::Group(u) => is_sum(u),
        _ => false,
    }
}

/// Flatten nested `Add`/`Sub`/`Neg` into signed terms
fn collect_terms(expr: &Expr, positive: bool, out: &mut Vec<Term>) {
    match expr {
        Expr::Add(l, r) => {
            collect_terms(l, positive, out);
            collect_terms(r, positive, out);
        }
        Expr::Sub(l, r) => {
            collect_terms(l, positive, out);
            collect_terms(r, !positive, out);
        }
        Expr::Neg(u) if is_sum(u) => collect_terms(u, !positive, out),
        Expr::Group(u) => collect_terms(u, positive, out),
        _ => out.push((positive, expr.clone())),
    }
}

fn terms_of(expr: &Expr) -> Vec<Term> {
    let mut out = Vec::new();
    collect_terms(expr, true, &mut out);
    out
}

/// Rebuild a left-nested `Add`/`Sub` chain
fn sum_of(terms: Vec<Term>) -> Expr {
    let mut iter = terms.into_iter();
    let Some((sign, first)) = iter.next() else {
        return Expr::int(0);
    };
    let head = if sign { first } else { first.neg() };
    iter.fold(head, |acc, (sign, term)| {
        if sign {
            Expr::add(acc, term)
        } else {
            Expr::sub(acc, term)
        }
    })
}

/// Every term of `left` times every term of `right`
fn distribute(left: &[Term], right: &[Term]) -> Vec<Term> {
    left.iter()
        .flat_map(|(ls, l)| {
            right
                .iter()
                .map(move |(rs, r)| (ls == rs, Expr::mul(l.clone(), r.clone())))
        })
        .collect()
}

/// `(a ± b)² = a² ± 2ab + b²`
fn square_binomial(terms: &[Term]) -> Option<Expr> {
    let [(true, a), (sign, b)] = terms else {
        return None;
    };
    let a2 = Expr::pow(a.clone(), Expr::int(2));
    let ab = Expr::mul(Expr::mul(Expr::int(2), a.clone()), b.clone());
    let b2 = Expr::pow(b.clone(), Expr::int(2));
    let middle = if *sign {
        Expr::add(a2, ab)
    } else {
        Expr::sub(a2, ab)
    };
    Some(Expr::add(middle, b2))
}

impl Expr {
    /// Multiply out products and small powers of sums
    ///
    /// Nodes with nothing to distribute come back structurally unchanged.
    pub fn expand(&self) -> Expr {
        let expr = match self {
            Expr::Group(inner) => return inner.expand(),
            _ => self.map_children(|c| c.expand()),
        };

        match &expr {
            Expr::Mul(l, r) if is_sum(l) || is_sum(r) => {
                sum_of(distribute(&terms_of(l), &terms_of(r)))
            }

            Expr::Pow(base, exp) if is_sum(base) => {
                let Some(n) = exp.as_number().and_then(|n| n.as_i64()) else {
                    return expr;
                };
                if !(2..=MAX_EXPANDED_POWER).contains(&n) {
                    return expr;
                }
                let terms = terms_of(base);
                if n == 2
                    && let Some(square) = square_binomial(&terms)
                {
                    return square;
                }
                let product = (1..n).fold(terms.clone(), |acc, _| distribute(&acc, &terms));
                sum_of(product)
            }

            // (a ± b) / c = a/c ± b/c
            Expr::Div(num, den) if is_sum(num) => sum_of(
                terms_of(num)
                    .into_iter()
                    .map(|(sign, t)| (sign, Expr::div(t, (**den).clone())))
                    .collect(),
            ),

            Expr::Neg(u) if is_sum(u) => sum_of(
                terms_of(u)
                    .into_iter()
                    .map(|(sign, t)| (!sign, t))
                    .collect(),
            ),

            _ => expr,
        }
    }
}
