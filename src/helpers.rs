//! Multi-variable differentiation helpers
//!
//! Provides gradient, hessian, and jacobian computation functions
//! for both Expr-based and String-based APIs.

use crate::{Bindings, Diff, Evaluation, Expr, MathError, Symbol, parser};

// ===== Internal Helpers =====

/// Core gradient implementation using &str variable names
fn gradient_internal(expr: &Expr, vars: &[&str]) -> Result<Vec<Expr>, MathError> {
    let diff = Diff::new();
    vars.iter()
        .map(|var| diff.differentiate_by_name(expr, var))
        .collect()
}

fn hessian_internal(expr: &Expr, vars: &[&str]) -> Result<Vec<Vec<Expr>>, MathError> {
    gradient_internal(expr, vars)?
        .iter()
        .map(|partial| gradient_internal(partial, vars))
        .collect()
}

fn jacobian_internal(exprs: &[Expr], vars: &[&str]) -> Result<Vec<Vec<Expr>>, MathError> {
    exprs
        .iter()
        .map(|expr| gradient_internal(expr, vars))
        .collect()
}

fn to_strings(matrix: Vec<Vec<Expr>>) -> Vec<Vec<String>> {
    matrix
        .iter()
        .map(|row| row.iter().map(|e| e.to_string()).collect())
        .collect()
}

// ===== Public Symbol-based API =====

/// Compute the gradient of an expression with respect to multiple variables
/// Returns a vector of partial derivatives [∂f/∂x₁, ∂f/∂x₂, ...]
///
/// # Example
/// ```
/// use symb_algebra::{gradient, sym, Expr};
///
/// let x = sym("x");
/// let y = sym("y");
/// let expr = Expr::add(x.clone().pow(2), y.clone().pow(2));
/// let grad = gradient(&expr, &[&x, &y]).unwrap();
/// assert_eq!(grad[1].to_string(), "2y");
/// ```
pub fn gradient(expr: &Expr, vars: &[&Symbol]) -> Result<Vec<Expr>, MathError> {
    let var_names: Vec<&str> = vars.iter().map(|s| s.name()).collect();
    gradient_internal(expr, &var_names)
}

/// Compute the Hessian matrix of an expression
/// H[i][j] = ∂²f/∂xᵢ∂xⱼ
pub fn hessian(expr: &Expr, vars: &[&Symbol]) -> Result<Vec<Vec<Expr>>, MathError> {
    let var_names: Vec<&str> = vars.iter().map(|s| s.name()).collect();
    hessian_internal(expr, &var_names)
}

/// Compute the Jacobian matrix of a vector of expressions
/// J[i][j] = ∂fᵢ/∂xⱼ
pub fn jacobian(exprs: &[Expr], vars: &[&Symbol]) -> Result<Vec<Vec<Expr>>, MathError> {
    let var_names: Vec<&str> = vars.iter().map(|s| s.name()).collect();
    jacobian_internal(exprs, &var_names)
}

// ===== String-based API =====

/// Compute gradient from a formula string
pub fn gradient_str(formula: &str, vars: &[&str]) -> Result<Vec<String>, MathError> {
    let expr = parser::parse(formula)?;
    let grad = gradient_internal(&expr, vars)?;
    Ok(grad.iter().map(|e| e.to_string()).collect())
}

/// Compute Hessian matrix from a formula string
pub fn hessian_str(formula: &str, vars: &[&str]) -> Result<Vec<Vec<String>>, MathError> {
    let expr = parser::parse(formula)?;
    Ok(to_strings(hessian_internal(&expr, vars)?))
}

/// Compute Jacobian matrix from formula strings
pub fn jacobian_str(formulas: &[&str], vars: &[&str]) -> Result<Vec<Vec<String>>, MathError> {
    let exprs: Vec<Expr> = formulas
        .iter()
        .map(|f| parser::parse(f))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(to_strings(jacobian_internal(&exprs, vars)?))
}

/// Evaluate a formula string with given variable values
/// Performs partial evaluation - returns simplified expression string
///
/// # Example
/// ```
/// use symb_algebra::evaluate_str;
///
/// assert_eq!(evaluate_str("x * y + 1", &[("x", 3.0)]).unwrap(), "3y + 1");
/// assert_eq!(evaluate_str("x * y + 1", &[("x", 3.0), ("y", 2.0)]).unwrap(), "7");
/// ```
pub fn evaluate_str(formula: &str, vars: &[(&str, f64)]) -> Result<String, MathError> {
    let expr = parser::parse(formula)?;
    let bindings = vars
        .iter()
        .fold(Bindings::new(), |b, &(name, value)| b.with(name, value));

    Ok(match expr.evaluate_partial(&bindings)? {
        Evaluation::Numeric(n) => n.to_string(),
        Evaluation::Symbolic(e) => e.to_string(),
    })
}
