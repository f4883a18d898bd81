//! Identifiers and the math-function builder methods
//!
//! # Example
//! ```ignore
//! use symb_algebra::{sym, Expr};
//!
//! let x = sym("x");
//! let expr = Expr::add(Expr::pow(x.to_expr(), Expr::int(2)), x.sin());  // x^2 + sin(x)
//! ```

use crate::Expr;
use crate::functions::Func;

/// Named unknown appearing in an expression
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new symbol with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Symbol(name.into())
    }

    /// Get the name of the symbol
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Convert to an Expr
    pub fn to_expr(&self) -> Expr {
        Expr::Variable(self.clone())
    }

    /// Raise to a power
    pub fn pow(self, exp: impl Into<Expr>) -> Expr {
        Expr::pow(self.to_expr(), exp.into())
    }
}

// Allow Symbol to be used where &str is expected
impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

// ===== Macro for generating math function methods =====

/// Generate one-operand function methods for a type
/// - For Symbol: converts to Expr via to_expr() before wrapping in the function node
/// - For Expr: uses self directly
macro_rules! impl_math_functions {
    ($type:ty, $converter:expr, $($fn_name:ident => $func:expr),* $(,)?) => {
        impl $type {
            $(
                pub fn $fn_name(self) -> Expr {
                    Expr::func($func, $converter(self))
                }
            )*
        }
    };
}

// Define the function list once
macro_rules! math_function_list {
    ($macro_name:ident, $type:ty, $converter:expr) => {
        $macro_name!($type, $converter,
            // Trigonometric functions
            sin => Func::Sin, cos => Func::Cos, tan => Func::Tan,
            csc => Func::Csc, sec => Func::Sec, cot => Func::Cot,
            // Inverse trigonometric functions
            asin => Func::Asin, acos => Func::Acos, atan => Func::Atan,
            // Exponential and logarithmic functions
            ln => Func::Ln, exp => Func::Exp,
        );
    };
}

// Apply to Symbol (convert via to_expr())
math_function_list!(impl_math_functions, Symbol, |s: Symbol| s.to_expr());

// Apply to Expr (use directly)
math_function_list!(impl_math_functions, Expr, |e: Expr| e);

// Convert Symbol to Expr
impl From<Symbol> for Expr {
    fn from(s: Symbol) -> Self {
        s.to_expr()
    }
}

/// Convenience function to create a Symbol
pub fn sym(name: &str) -> Symbol {
    Symbol::new(name)
}
