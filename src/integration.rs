//! Best-effort antiderivatives
//!
//! Only closed forms whose operand reduces to `a·x + b` are recognized. Every
//! other shape fails with `IntegrationUnsupported` instead of guessing.

use crate::Expr;
use crate::ast::UnaryOp;
use crate::error::MathError;
use crate::evaluator::Bindings;
use crate::functions::{Func, add_opt, div_opt, mul_opt, neg, sub_opt};
use crate::number::Number;
use crate::poly::Polynomial;

/// `(a, b)` when `expr` is `a·var + b` with `a ≠ 0`
fn linear_form(expr: &Expr, var: &str) -> Option<(Number, Number)> {
    let p = Polynomial::from_expr(expr, Some(var))?;
    match p.coeffs() {
        [a, b] if !a.approx_zero() => Some((*a, *b)),
        _ => None,
    }
}

/// Value of a variable-free subtree such as `-2` or `1/2`
fn constant_value(expr: &Expr) -> Option<Number> {
    expr.as_number()
        .or_else(|| expr.evaluate(&Bindings::new()).ok())
}

/// Polynomial antiderivative of a tree that is polynomial in `var`
fn polynomial_integral(expr: &Expr, var: &str) -> Option<Expr> {
    Polynomial::from_expr(expr, Some(var)).map(|p| p.integral().to_expr())
}

impl Expr {
    /// Integrate and simplify; the constant of integration is omitted
    ///
    /// `var` defaults exactly as in [`Expr::differentiate`].
    ///
    /// # Example
    /// ```ignore
    /// let expr = parse("cos(2x + 1)")?;
    /// let f = expr.integrate(Some("x"))?;  // sin(2x + 1) / 2
    /// ```
    pub fn integrate(&self, var: Option<&str>) -> Result<Expr, MathError> {
        let var = self.transform_var(var);
        Ok(self.antiderive(&var)?.simplify())
    }

    /// Raw antiderivative with respect to `var`, before simplification
    pub fn antiderive(&self, var: &str) -> Result<Expr, MathError> {
        let x = Expr::symbol(var);

        if !self.contains_var(var) && !matches!(self, Expr::FunctionDef(_)) {
            return Ok(mul_opt(self.clone(), x));
        }

        let unsupported = || MathError::integration(self);

        Ok(match self {
            // ∫x dx = x²/2
            Expr::Variable(_) => Expr::div(Expr::pow(x, Expr::int(2)), Expr::int(2)),

            Expr::Add(u, v) => add_opt(u.antiderive(var)?, v.antiderive(var)?),
            Expr::Sub(u, v) => sub_opt(u.antiderive(var)?, v.antiderive(var)?),
            Expr::Neg(u) => neg(u.antiderive(var)?),

            Expr::Mul(u, v) => {
                if !u.contains_var(var) {
                    mul_opt((**u).clone(), v.antiderive(var)?)
                } else if !v.contains_var(var) {
                    mul_opt(u.antiderive(var)?, (**v).clone())
                } else {
                    polynomial_integral(self, var).ok_or_else(unsupported)?
                }
            }

            Expr::Div(u, v) => {
                if !v.contains_var(var) {
                    div_opt(u.antiderive(var)?, (**v).clone())
                } else if !u.contains_var(var) {
                    // ∫c/(ax+b) = c·ln|ax+b| / a
                    let (a, _) = linear_form(v, var).ok_or_else(unsupported)?;
                    let log = (**v).clone().abs().ln();
                    div_opt(mul_opt((**u).clone(), log), Expr::number(a))
                } else {
                    return Err(unsupported());
                }
            }

            Expr::Pow(u, v) => {
                if !v.contains_var(var) {
                    match (linear_form(u, var), constant_value(v)) {
                        // ∫(ax+b)⁻¹ = ln|ax+b| / a
                        (Some((a, _)), Some(n)) if n.approx_neg_one() => {
                            div_opt((**u).clone().abs().ln(), Expr::number(a))
                        }
                        // ∫(ax+b)ⁿ = (ax+b)ⁿ⁺¹ / ((n+1)a)
                        (Some((a, _)), Some(n)) => {
                            let n1 = n + Number::Integer(1);
                            div_opt(
                                Expr::pow((**u).clone(), Expr::number(n1)),
                                Expr::number(n1 * a),
                            )
                        }
                        _ => polynomial_integral(self, var).ok_or_else(unsupported)?,
                    }
                } else if !u.contains_var(var) {
                    // ∫c^(ax+b) = c^(ax+b) / (a ln c)
                    let (a, _) = linear_form(v, var).ok_or_else(unsupported)?;
                    let euler = constant_value(u)
                        .is_some_and(|c| c.approx_eq(&Number::Real(std::f64::consts::E)));
                    let scale = if euler {
                        Expr::number(a)
                    } else {
                        mul_opt(Expr::number(a), (**u).clone().ln())
                    };
                    div_opt(self.clone(), scale)
                } else {
                    return Err(unsupported());
                }
            }

            // ∫|ax+b| = (ax+b)|ax+b| / 2a
            Expr::Abs(u) => {
                let (a, _) = linear_form(u, var).ok_or_else(unsupported)?;
                div_opt(
                    Expr::mul((**u).clone(), self.clone()),
                    Expr::number(a * Number::Integer(2)),
                )
            }

            Expr::Unary { op, operand } => match op {
                UnaryOp::Plus => operand.antiderive(var)?,
                UnaryOp::Percent => div_opt(operand.antiderive(var)?, Expr::int(100)),
                // ∫√(ax+b) = 2(ax+b)^(3/2) / 3a
                UnaryOp::Sqrt => {
                    let (a, _) = linear_form(operand, var).ok_or_else(unsupported)?;
                    div_opt(
                        Expr::mul(Expr::int(2), Expr::pow((**operand).clone(), Expr::real(1.5))),
                        Expr::number(a * Number::Integer(3)),
                    )
                }
                UnaryOp::Factorial => return Err(unsupported()),
            },

            Expr::Function { func, arg } => {
                let (a, _) = linear_form(arg, var).ok_or_else(unsupported)?;
                div_opt(func.antiderivative(arg), Expr::number(a))
            }

            // ∫log_b(u) = (u ln u - u) / (a ln b)
            Expr::Log { arg, base } => {
                if base.contains_var(var) {
                    return Err(unsupported());
                }
                let (a, _) = linear_form(arg, var).ok_or_else(unsupported)?;
                div_opt(
                    Func::Ln.antiderivative(arg),
                    mul_opt(Expr::number(a), (**base).clone().ln()),
                )
            }

            Expr::Group(inner) => inner.antiderive(var)?,

            Expr::FunctionDef(def) => Expr::function_def(
                def.name.clone(),
                def.params.clone(),
                def.body.antiderive(var)?,
            ),

            Expr::Poly(p) => Expr::Poly(p.integral()),

            Expr::Rational(r) => {
                if !r.denominator().contains_var(var) {
                    div_opt(r.numerator().antiderive(var)?, r.denominator().clone())
                } else {
                    match r.divide() {
                        Ok((quotient, rem)) if rem.is_zero() => Expr::Poly(quotient.integral()),
                        _ => return Err(unsupported()),
                    }
                }
            }

            Expr::Literal(_) | Expr::Call { .. } | Expr::Index { .. } => {
                return Err(unsupported());
            }
        })
    }
}
