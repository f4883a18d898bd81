use crate::Expr;
use crate::ast::Literal;
use crate::functions::Func;
use crate::number::Number;

/// Named constants such as `π` and `e` keep their symbolic form
pub(crate) fn is_named_constant(lit: &Literal) -> bool {
    lit.text
        .as_deref()
        .is_some_and(|t| t.starts_with(|c: char| c.is_alphabetic()))
}

/// Value of a literal that may be folded
pub(crate) fn plain_number(expr: &Expr) -> Option<Number> {
    match expr {
        Expr::Literal(lit) if !is_named_constant(lit) => Some(lit.value),
        _ => None,
    }
}

pub(crate) fn is_euler(expr: &Expr) -> bool {
    expr.as_number()
        .is_some_and(|n| n.approx_eq(&Number::Real(std::f64::consts::E)))
}

/// Argument of `func(arg)`
pub(crate) fn func_arg(expr: &Expr, func: Func) -> Option<&Expr> {
    match expr {
        Expr::Function { func: f, arg } if *f == func => Some(&**arg),
        _ => None,
    }
}

/// `c·rest` → `(c, rest)`; a bare term has coefficient one
pub(crate) fn split_coefficient(expr: &Expr) -> (Number, Expr) {
    match expr {
        Expr::Mul(c, rest) => match plain_number(c) {
            Some(n) => (n, (**rest).clone()),
            None => (Number::Integer(1), expr.clone()),
        },
        Expr::Neg(inner) => {
            let (c, rest) = split_coefficient(inner);
            (-c, rest)
        }
        _ => (Number::Integer(1), expr.clone()),
    }
}

/// Inverse of `split_coefficient`, with the sign pulled in front
pub(crate) fn with_coefficient(c: Number, rest: Expr) -> Expr {
    if c.approx_zero() {
        Expr::int(0)
    } else if c.is_negative() {
        with_coefficient(-c, rest).neg()
    } else if c.approx_one() {
        rest
    } else {
        Expr::mul(Expr::number(c), rest)
    }
}

/// `a^p` → `(a, p)`; anything else is its own base with exponent one
pub(crate) fn base_exponent(expr: &Expr) -> (&Expr, Expr) {
    match expr {
        Expr::Pow(base, exp) => (&**base, (**exp).clone()),
        _ => (expr, Expr::int(1)),
    }
}

/// Sum of two exponents, folded when both are plain literals
pub(crate) fn add_exponents(p: Expr, q: Expr) -> Expr {
    match (plain_number(&p), plain_number(&q)) {
        (Some(a), Some(b)) => Expr::number(a + b),
        _ => Expr::add(p, q),
    }
}
