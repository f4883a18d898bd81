// Display formatting for AST
use crate::Expr;
use crate::ast::{IndexKind, UnaryOp};
use std::fmt;

/// Binding strength used to decide where parentheses are required
fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Add(..) | Expr::Sub(..) => 1,
        Expr::Mul(..) | Expr::Div(..) | Expr::Rational(_) => 2,
        Expr::Neg(_) => 3,
        Expr::Unary { op, .. } if !op.is_postfix() => 3,
        Expr::Pow(..) => 4,
        Expr::Unary { .. } => 5,
        Expr::Poly(p) if p.degree() > 0 => 1,
        _ => 6,
    }
}

/// Format `expr`, parenthesizing it when it binds looser than `min`
fn operand(expr: &Expr, min: u8) -> String {
    if precedence(expr) < min {
        format!("({})", expr)
    } else {
        format!("{}", expr)
    }
}

/// Right-hand operand of a binary operator; a leading minus is always wrapped
fn right_operand(expr: &Expr, min: u8) -> String {
    match expr {
        Expr::Neg(_) => format!("({})", expr),
        _ => operand(expr, min),
    }
}

/// `2x`, `3x^2`: a plain non-negative coefficient in front of a variable term
fn is_implicit_product(left: &Expr, right: &Expr) -> bool {
    let coefficient = matches!(left, Expr::Literal(lit)
        if lit.text.is_none() && !lit.value.is_negative() && lit.value.to_f64().is_some());
    let term = match right {
        Expr::Variable(_) => true,
        Expr::Pow(base, _) => matches!(**base, Expr::Variable(_)),
        _ => false,
    };
    coefficient && term
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(lit) => {
                let text = match &lit.text {
                    Some(t) => t.clone(),
                    None => lit.value.to_string(),
                };
                // Negative and two-part complex values keep their parentheses
                let compound = matches!(lit.value, crate::Number::Complex(z) if z.re != 0.0 && z.im != 0.0);
                if lit.value.is_negative() || compound {
                    write!(f, "({})", text)
                } else {
                    write!(f, "{}", text)
                }
            }

            Expr::Variable(s) => write!(f, "{}", s),

            Expr::Add(u, v) => write!(f, "{} + {}", operand(u, 1), right_operand(v, 1)),

            // Parenthesize RHS when it's an addition or subtraction to preserve
            // the intended grouping: `a - (b + c)` instead of `a - b + c`.
            Expr::Sub(u, v) => write!(f, "{} - {}", operand(u, 1), right_operand(v, 2)),

            Expr::Mul(u, v) => {
                if is_implicit_product(u, v) {
                    write!(f, "{}{}", u, v)
                } else {
                    write!(f, "{} * {}", operand(u, 2), right_operand(v, 3))
                }
            }

            Expr::Div(u, v) => write!(f, "{} / {}", operand(u, 2), right_operand(v, 3)),

            Expr::Pow(u, v) => {
                // CRITICAL: (C * R)^2 should display as "(C * R)^2", not "C * R^2"
                let exponent = match **v {
                    Expr::Literal(_) | Expr::Variable(_) => format!("{}", v),
                    _ => format!("({})", v),
                };
                write!(f, "{}^{}", operand(u, 5), exponent)
            }

            Expr::Neg(u) => write!(f, "-{}", operand(u, 3)),

            Expr::Abs(u) => write!(f, "|{}|", u),

            Expr::Unary { op, operand: u } => match op {
                UnaryOp::Plus => write!(f, "+{}", operand(u, 3)),
                UnaryOp::Sqrt => write!(f, "√{}", operand(u, 6)),
                UnaryOp::Factorial | UnaryOp::Percent => {
                    write!(f, "{}{}", operand(u, 6), op.symbol())
                }
            },

            Expr::Function { func, arg } => write!(f, "{}({})", func.name(), arg),

            Expr::Log { arg, base } => write!(f, "log({}, {})", arg, base),

            Expr::Call { callee, args } => {
                let args_str: Vec<String> = args.iter().map(|arg| format!("{}", arg)).collect();
                write!(f, "{}({})", operand(callee, 6), args_str.join(", "))
            }

            Expr::Index { object, index } => {
                write!(f, "{}", operand(object, 6))?;
                match index {
                    IndexKind::Single(i) => write!(f, "[{}]", i),
                    IndexKind::Range { start, end } => {
                        let show = |b: &Option<Box<Expr>>| {
                            b.as_ref().map_or(String::new(), |e| e.to_string())
                        };
                        write!(f, "[{}:{}]", show(start), show(end))
                    }
                }
            }

            Expr::Group(inner) => write!(f, "({})", inner),

            Expr::FunctionDef(def) => {
                let params: Vec<&str> = def.params.iter().map(|p| p.name()).collect();
                write!(f, "{}({}) = {}", def.name, params.join(", "), def.body)
            }

            Expr::Poly(p) => write!(f, "{}", p),

            Expr::Rational(r) => write!(f, "({}) / ({})", r.numerator(), r.denominator()),
        }
    }
}
