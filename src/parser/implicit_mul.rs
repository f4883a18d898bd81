//! Implicit multiplication insertion for natural notation
//!
//! Inserts `*` operators between tokens where multiplication is implied, e.g. `2x` → `2 * x`.

use crate::error::Span;
use crate::parser::tokens::{Operator, Spanned, Token};

/// Tokens that can end an operand
fn ends_operand(token: &Token) -> bool {
    matches!(
        token,
        Token::Number(..) | Token::Identifier(_) | Token::RightParen | Token::RightBracket
    ) || matches!(token, Token::Operator(op) if op.is_postfix())
}

fn is_named_constant(text: &str) -> bool {
    text.starts_with(char::is_alphabetic)
}

/// Check if implicit multiplication should be inserted between two tokens
fn should_insert_mul(current: &Token, next: &Token) -> bool {
    if !ends_operand(current) {
        return false;
    }
    match next {
        // Identifier followed by ( is a call, ] or ) followed by [ is indexing
        Token::LeftParen => !matches!(current, Token::Identifier(_)),
        // Two plain literals stay apart; `2pi` and `pi e` are products
        Token::Number(_, text) => match current {
            Token::Number(_, prev) => is_named_constant(prev) || is_named_constant(text),
            _ => true,
        },
        Token::Identifier(_) => true,
        // 4 sin(x), x √y
        Token::Operator(op) => op.is_function() || matches!(op, Operator::Root),
        _ => false,
    }
}

/// Insert implicit multiplication operators between appropriate tokens
///
/// Rules:
/// - Number * Identifier: `2 x` → `2 * x`
/// - Identifier * Identifier: `a x` → `a * x`
/// - Operand * Function: `x sin(y)` → `x * sin(y)`
/// - ) * Identifier/Number/(: `(a) x` → `(a) * x`
/// - Number * (: `2 (y)` → `2 * (y)`
///
/// Exception: Identifier followed by ( is a call, not multiplication
pub(crate) fn insert_implicit_multiplication(tokens: Vec<Spanned>) -> Vec<Spanned> {
    let needs_insertion = tokens
        .windows(2)
        .any(|w| should_insert_mul(&w[0].token, &w[1].token));
    if !needs_insertion {
        return tokens;
    }

    let mut result = Vec::with_capacity(tokens.len() * 3 / 2);
    let mut it = tokens.into_iter().peekable();

    while let Some(current) = it.next() {
        let inserted = it
            .peek()
            .filter(|next| should_insert_mul(&current.token, &next.token))
            .map(|next| Span::new(current.span.end, next.span.start));

        result.push(current);
        if let Some(span) = inserted {
            result.push(Spanned::new(Token::Operator(Operator::Mul), span));
        }
    }

    result
}
