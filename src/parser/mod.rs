//! Parser module - converts strings to AST
mod implicit_mul;
mod lexer;
mod pratt;
mod tokens;

use crate::{Expr, MathError};

/// Parse a formula string into an expression AST
///
/// Pipeline: lex, insert implicit multiplication, then Pratt-parse.
/// Builtin names (`sin`, `ln`, `log`, `abs`, `sqrt`, ...) build their dedicated
/// nodes, `pi`/`π` and `e` become named constants and any other `name(args)` is
/// a [`Expr::Call`]. A top-level `f(x, y) = body` defines a function.
///
/// # Example
/// ```
/// use symb_algebra::{parse, Bindings};
///
/// let expr = parse("2x^2 + sin(x)").unwrap();
/// let value = expr.evaluate(&Bindings::new().with("x", 0)).unwrap();
/// assert_eq!(value.to_f64(), Some(0.0));
/// ```
///
/// # Errors
/// Returns a parse error if the input is empty, contains an unknown character,
/// a malformed number or an unbalanced bracket. No partial tree is ever returned.
pub fn parse(input: &str) -> Result<Expr, MathError> {
    if input.trim().is_empty() {
        return Err(MathError::EmptyFormula);
    }

    let tokens = lexer::lex(input)?;
    let tokens = implicit_mul::insert_implicit_multiplication(tokens);
    pratt::parse_expression(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("   "), Err(MathError::EmptyFormula));
    }

    #[test]
    fn test_implicit_products() {
        let x = Expr::symbol("x");
        assert_eq!(parse("2x").unwrap(), Expr::mul(Expr::int(2), x.clone()));
        assert_eq!(
            parse("3 sin(x)").unwrap(),
            Expr::mul(Expr::int(3), x.clone().sin())
        );
    }

    #[test]
    fn test_constants_keep_their_names() {
        let expr = parse("2pi").unwrap();
        assert_eq!(expr.to_string(), "2 * π");
        assert_eq!(parse("e").unwrap().to_string(), "e");
    }

    #[test]
    fn test_number_text_round_trip() {
        assert_eq!(parse("2.50").unwrap().to_string(), "2.50");
        assert_eq!(parse("12").unwrap().to_string(), "12");
    }
}
