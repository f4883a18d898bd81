//! Builder pattern API for differentiation, integration and simplification
//!
//! Provides a fluent interface for configuring and executing the symbolic
//! transformations with optional safety limits.
//!
//! # Example
//! ```
//! use symb_algebra::{sym, Diff, Expr};
//!
//! let x = sym("x");
//! let expr = Expr::add(x.clone().pow(2), x.clone().sin());
//!
//! let derivative = Diff::new().max_depth(50).differentiate(expr, &x).unwrap();
//! assert_eq!(derivative.to_string(), "2x + cos(x)");
//! ```

use crate::simplification::engine::Simplifier;
use crate::{Expr, MathError, Symbol, parser};

/// Reject trees beyond the configured depth or node count before doing any work
fn check_limits(
    expr: &Expr,
    max_depth: Option<usize>,
    max_nodes: Option<usize>,
) -> Result<(), MathError> {
    if let Some(max_d) = max_depth
        && expr.depth() > max_d
    {
        return Err(MathError::MaxDepthExceeded);
    }
    if let Some(max_n) = max_nodes
        && expr.size() > max_n
    {
        return Err(MathError::MaxNodesExceeded);
    }
    Ok(())
}

/// Builder for differentiation operations
#[derive(Clone, Debug)]
pub struct Diff {
    simplify: bool,
    max_depth: Option<usize>,
    max_nodes: Option<usize>,
}

impl Default for Diff {
    fn default() -> Self {
        Self {
            simplify: true,
            max_depth: None,
            max_nodes: None,
        }
    }
}

impl Diff {
    /// Create a new differentiation builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Simplify the derivative before returning it (on by default)
    pub fn simplify(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }

    /// Set maximum AST depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set maximum AST node count
    pub fn max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    /// Differentiate an expression with respect to a variable
    pub fn differentiate(&self, expr: Expr, var: &Symbol) -> Result<Expr, MathError> {
        self.differentiate_by_name(&expr, var.name())
    }

    pub(crate) fn differentiate_by_name(&self, expr: &Expr, var: &str) -> Result<Expr, MathError> {
        check_limits(expr, self.max_depth, self.max_nodes)?;

        let derivative = expr.derive(var)?;
        if self.simplify {
            Ok(derivative.simplify())
        } else {
            Ok(derivative)
        }
    }

    /// Parse and differentiate a string formula
    pub fn diff_str(&self, formula: &str, var: &str) -> Result<String, MathError> {
        let ast = parser::parse(formula)?;
        let result = self.differentiate_by_name(&ast, var)?;
        Ok(format!("{}", result))
    }
}

/// Builder for formal integration
#[derive(Clone, Debug)]
pub struct Integrate {
    simplify: bool,
    max_depth: Option<usize>,
    max_nodes: Option<usize>,
}

impl Default for Integrate {
    fn default() -> Self {
        Self {
            simplify: true,
            max_depth: None,
            max_nodes: None,
        }
    }
}

impl Integrate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simplify the antiderivative before returning it (on by default)
    pub fn simplify(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    /// Antiderivative without the constant of integration
    ///
    /// # Errors
    /// `IntegrationUnsupported` for shapes outside the linear-operand rules.
    pub fn integrate(&self, expr: Expr, var: &Symbol) -> Result<Expr, MathError> {
        check_limits(&expr, self.max_depth, self.max_nodes)?;

        let antiderivative = expr.antiderive(var.name())?;
        if self.simplify {
            Ok(antiderivative.simplify())
        } else {
            Ok(antiderivative)
        }
    }

    /// Parse and integrate a string formula
    pub fn integrate_str(&self, formula: &str, var: &str) -> Result<String, MathError> {
        let ast = parser::parse(formula)?;
        let result = self.integrate(ast, &Symbol::new(var))?;
        Ok(format!("{}", result))
    }
}

/// Builder for simplification operations
#[derive(Clone, Debug, Default)]
pub struct Simplify {
    max_depth: Option<usize>,
    max_nodes: Option<usize>,
    max_iterations: Option<usize>,
}

impl Simplify {
    /// Create a new simplification builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum AST depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set maximum AST node count
    pub fn max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    /// Cap the number of full rewrite passes
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Simplify an expression
    pub fn simplify(&self, expr: Expr) -> Result<Expr, MathError> {
        check_limits(&expr, self.max_depth, self.max_nodes)?;

        let mut simplifier = Simplifier::new();
        if let Some(iterations) = self.max_iterations {
            simplifier = simplifier.with_max_iterations(iterations);
        }
        if let Some(depth) = self.max_depth {
            simplifier = simplifier.with_max_depth(depth);
        }
        Ok(simplifier.simplify(&expr))
    }

    /// Parse and simplify a string formula
    pub fn simplify_str(&self, formula: &str) -> Result<String, MathError> {
        let ast = parser::parse(formula)?;
        let result = self.simplify(ast)?;
        Ok(format!("{}", result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::sym;

    #[test]
    fn test_diff_builder_basic() {
        let result = Diff::new().diff_str("x^2", "x").unwrap();
        assert_eq!(result, "2x");
    }

    #[test]
    fn test_diff_other_variables_are_constants() {
        let result = Diff::new().diff_str("a*x", "x").unwrap();
        assert_eq!(result, "a");
    }

    #[test]
    fn test_diff_expr() {
        let x = sym("x");
        let expr = x.clone().pow(2);

        let result = Diff::new().differentiate(expr, &x).unwrap();
        assert_eq!(format!("{}", result), "2x");
    }

    #[test]
    fn test_diff_without_simplification() {
        let x = sym("x");
        let raw = Diff::new()
            .simplify(false)
            .differentiate(x.clone().pow(2), &x)
            .unwrap();
        assert_eq!(raw.simplify(), Expr::mul(Expr::int(2), x.to_expr()));
    }

    #[test]
    fn test_limits() {
        let x = sym("x");
        let expr = x.clone().sin().cos().exp();
        assert_eq!(
            Diff::new().max_depth(2).differentiate(expr.clone(), &x),
            Err(MathError::MaxDepthExceeded)
        );
        assert_eq!(
            Simplify::new().max_nodes(3).simplify(expr.clone()),
            Err(MathError::MaxNodesExceeded)
        );
        assert!(Simplify::new().max_nodes(4).simplify(expr).is_ok());
    }

    #[test]
    fn test_simplify_builder() {
        let result = Simplify::new().simplify_str("x + x").unwrap();
        assert_eq!(result, "2x");
    }

    #[test]
    fn test_integrate_builder() {
        let result = Integrate::new().integrate_str("cos(x)", "x").unwrap();
        assert_eq!(result, "sin(x)");
        assert!(matches!(
            Integrate::new().integrate_str("sin(x^2)", "x"),
            Err(MathError::IntegrationUnsupported(_))
        ));
    }
}
