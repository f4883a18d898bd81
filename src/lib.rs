//! Symbolic Algebra Library
//!
//! Expressions are immutable trees that can be evaluated, differentiated,
//! integrated, simplified, expanded and substituted into one another.
//!
//! # Features
//! - Exact integer, real and complex arithmetic with automatic promotion
//! - Transcendental functions with explicit domain and pole errors
//! - Rule-based simplification to a fixpoint
//! - Formal integration for linear operands and polynomials
//! - Dense polynomials with closed-form roots up to degree four and
//!   Durand–Kerner beyond
//! - **Builder pattern API** for differentiation, integration and simplification
//!
//! # Usage Examples
//!
//! ## String-based API
//! ```
//! use symb_algebra::diff;
//! let result = diff("x^2", "x").unwrap();
//! assert_eq!(result, "2x");
//! ```
//!
//! ## Expression API
//! ```
//! use symb_algebra::{sym, Bindings, Diff, Expr};
//! let x = sym("x");
//! let expr = Expr::mul(Expr::int(3), x.to_expr());
//! let derivative = Diff::new().differentiate(expr, &x).unwrap();
//! assert_eq!(derivative, Expr::int(3));
//!
//! let square = x.clone().pow(2).differentiate(None).unwrap();
//! let slope = square.evaluate(&Bindings::new().with("x", 2)).unwrap();
//! assert_eq!(slope.to_f64(), Some(4.0));
//! ```

mod ast;
mod builder;
mod differentiation;
mod display;
mod error;
mod evaluator;
mod expansion;
pub mod functions;
mod helpers;
mod integration;
mod number;
mod parser;
mod poly;
mod rational;
mod simplification;
mod symbol;
mod traits;

#[cfg(test)]
mod tests;

// Re-export key types for easier usage
pub use ast::{Expr, FunctionExpr, IndexKind, Literal, UnaryOp};
pub use builder::{Diff, Integrate, Simplify};
pub use error::{MathError, Span};
pub use evaluator::{Bindings, Callable, Evaluation, NativeFn, Value};
pub use functions::Func;
pub use helpers::{
    evaluate_str, gradient, gradient_str, hessian, hessian_str, jacobian, jacobian_str,
};
pub use number::{Number, NumericKind};
pub use parser::parse;
pub use poly::{DK_MAX_ITERATIONS, DK_TOLERANCE, Degree, Polynomial, durand_kerner};
pub use rational::RationalFunction;
pub use symbol::{Symbol, sym};

/// Default maximum AST depth
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// Default maximum AST node count
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// Main API function for symbolic differentiation
///
/// # Arguments
/// * `formula` - Mathematical expression to differentiate (e.g., "x^2 + sin(x)")
/// * `var_to_diff` - Variable to differentiate with respect to (e.g., "x")
///
/// # Returns
/// The simplified derivative as a string, or an error if parsing/differentiation fails
///
/// # Note
/// For more control (simplification, limits), use the `Diff` builder:
/// ```
/// use symb_algebra::Diff;
/// let d = Diff::new().max_depth(10).diff_str("x^3", "x").unwrap();
/// assert_eq!(d, "3x^2");
/// ```
pub fn diff(formula: &str, var_to_diff: &str) -> Result<String, MathError> {
    Diff::new()
        .max_depth(DEFAULT_MAX_DEPTH)
        .max_nodes(DEFAULT_MAX_NODES)
        .diff_str(formula, var_to_diff)
}

/// Simplify a mathematical expression
///
/// # Example
/// ```
/// let result = symb_algebra::simplify("x * 1 + 0").unwrap();
/// assert_eq!(result, "x");
/// ```
pub fn simplify(formula: &str) -> Result<String, MathError> {
    Simplify::new()
        .max_depth(DEFAULT_MAX_DEPTH)
        .max_nodes(DEFAULT_MAX_NODES)
        .simplify_str(formula)
}

/// Integrate a mathematical expression; the constant of integration is omitted
///
/// # Example
/// ```
/// let result = symb_algebra::integrate("exp(x)", "x").unwrap();
/// assert_eq!(result, "exp(x)");
/// ```
pub fn integrate(formula: &str, var: &str) -> Result<String, MathError> {
    Integrate::new()
        .max_depth(DEFAULT_MAX_DEPTH)
        .max_nodes(DEFAULT_MAX_NODES)
        .integrate_str(formula, var)
}
