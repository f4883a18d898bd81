// Differentiation engine - applies calculus rules
//
// Inline optimizations
// ====================
// The rules below elide `0 + u`, `1 * u` and friends while building the
// derivative so that chains like sin(x^5) don't produce huge intermediate trees.
// The simplification engine then handles any remaining optimization opportunities.

use crate::Expr;
use crate::ast::UnaryOp;
use crate::error::MathError;
use crate::functions::{add_opt, div_opt, mul_opt, neg, sub_opt};
use crate::number::Number;

/// `base^exponent` with the trivial exponents folded
fn pow_opt(base: Expr, exponent: Expr) -> Expr {
    if exponent.is_zero_num() {
        Expr::int(1)
    } else if exponent.is_one_num() {
        base
    } else {
        Expr::pow(base, exponent)
    }
}

/// `v - 1`, folded when `v` is a literal
fn minus_one(v: &Expr) -> Expr {
    match v.as_number() {
        Some(n) => Expr::number(n - Number::Integer(1)),
        None => Expr::sub(v.clone(), Expr::int(1)),
    }
}

fn is_euler(e: &Expr) -> bool {
    e.as_number()
        .is_some_and(|n| n.approx_eq(&Number::Real(std::f64::consts::E)))
}

impl Expr {
    /// Differentiate and simplify
    ///
    /// When `var` is `None` the alphabetically first free variable is used (or `x`
    /// if there is none); a function definition defaults to its first parameter.
    ///
    /// # Example
    /// ```ignore
    /// let expr = parse("x^2")?;
    /// let d = expr.differentiate(Some("x"))?;  // 2x
    /// ```
    pub fn differentiate(&self, var: Option<&str>) -> Result<Expr, MathError> {
        let var = self.transform_var(var);
        Ok(self.derive(&var)?.simplify())
    }

    /// Variable for differentiation or integration when the caller gave none
    pub(crate) fn transform_var(&self, var: Option<&str>) -> String {
        match (var, self) {
            (Some(v), _) => v.to_string(),
            (None, Expr::FunctionDef(def)) if !def.params.is_empty() => {
                def.params[0].name().to_string()
            }
            (None, _) => self.default_var(),
        }
    }

    /// Raw derivative with respect to `var`, before simplification
    pub fn derive(&self, var: &str) -> Result<Expr, MathError> {
        if !self.contains_var(var) && !matches!(self, Expr::FunctionDef(_)) {
            return Ok(Expr::int(0));
        }

        Ok(match self {
            // Base cases
            Expr::Literal(_) => Expr::int(0),
            Expr::Variable(s) => {
                if s.name() == var {
                    Expr::int(1)
                } else {
                    Expr::int(0)
                }
            }

            // Sum rule
            Expr::Add(u, v) => add_opt(u.derive(var)?, v.derive(var)?),
            Expr::Sub(u, v) => sub_opt(u.derive(var)?, v.derive(var)?),

            // Product rule: (uv)' = u'v + uv'
            Expr::Mul(u, v) => {
                if !u.contains_var(var) {
                    mul_opt((**u).clone(), v.derive(var)?)
                } else if !v.contains_var(var) {
                    mul_opt(u.derive(var)?, (**v).clone())
                } else {
                    add_opt(
                        mul_opt(u.derive(var)?, (**v).clone()),
                        mul_opt((**u).clone(), v.derive(var)?),
                    )
                }
            }

            // Quotient rule: (u/v)' = (u'v - uv') / v^2
            Expr::Div(u, v) => {
                if !v.contains_var(var) {
                    div_opt(u.derive(var)?, (**v).clone())
                } else {
                    let numerator = sub_opt(
                        mul_opt(u.derive(var)?, (**v).clone()),
                        mul_opt((**u).clone(), v.derive(var)?),
                    );
                    div_opt(numerator, Expr::pow((**v).clone(), Expr::int(2)))
                }
            }

            Expr::Pow(u, v) => {
                let base_varies = u.contains_var(var);
                let exp_varies = v.contains_var(var);
                match (base_varies, exp_varies) {
                    // Power rule: (u^n)' = n * u^(n-1) * u'
                    (true, false) => mul_opt(
                        mul_opt((**v).clone(), pow_opt((**u).clone(), minus_one(v))),
                        u.derive(var)?,
                    ),
                    // Exponential rule: (a^v)' = a^v * ln(a) * v'
                    (false, true) => {
                        let growth = if is_euler(u) {
                            self.clone()
                        } else {
                            mul_opt(self.clone(), (**u).clone().ln())
                        };
                        mul_opt(growth, v.derive(var)?)
                    }
                    (true, true) => return Err(MathError::NotDifferentiable(self.to_string())),
                    (false, false) => Expr::int(0),
                }
            }

            Expr::Neg(u) => neg(u.derive(var)?),

            // |u|' = u / |u| * u', undefined where u = 0
            Expr::Abs(u) => mul_opt(
                Expr::div((**u).clone(), (**u).clone().abs()),
                u.derive(var)?,
            ),

            Expr::Unary { op, operand } => match op {
                UnaryOp::Plus => operand.derive(var)?,
                // (√u)' = u' / (2√u)
                UnaryOp::Sqrt => div_opt(
                    operand.derive(var)?,
                    Expr::mul(Expr::int(2), (**operand).clone().sqrt()),
                ),
                UnaryOp::Percent => div_opt(operand.derive(var)?, Expr::int(100)),
                UnaryOp::Factorial => {
                    return Err(MathError::NotDifferentiable(self.to_string()));
                }
            },

            // Chain rule: f(u)' = f'(u) * u'
            Expr::Function { func, arg } => mul_opt(func.outer_derivative(arg), arg.derive(var)?),

            Expr::Log { arg, base } => {
                if base.contains_var(var) {
                    // log_b(u) = ln(u) / ln(b)
                    Expr::div((**arg).clone().ln(), (**base).clone().ln()).derive(var)?
                } else {
                    // log_b(u)' = u' / (u ln b)
                    div_opt(
                        arg.derive(var)?,
                        Expr::mul((**arg).clone(), (**base).clone().ln()),
                    )
                }
            }

            Expr::Call { .. } | Expr::Index { .. } => {
                return Err(MathError::NotDifferentiable(self.to_string()));
            }

            Expr::Group(inner) => inner.derive(var)?,

            Expr::FunctionDef(def) => Expr::function_def(
                def.name.clone(),
                def.params.clone(),
                def.body.derive(var)?,
            ),

            Expr::Poly(p) => Expr::Poly(p.derivative()),

            Expr::Rational(r) => {
                let (n, d) = (r.numerator(), r.denominator());
                let numerator = sub_opt(
                    mul_opt(n.derive(var)?, d.clone()),
                    mul_opt(n.clone(), d.derive(var)?),
                );
                Expr::rational(numerator, Expr::pow(d.clone(), Expr::int(2)))
            }
        })
    }
}
