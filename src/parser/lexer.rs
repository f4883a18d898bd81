//! Lexer: source text to spanned tokens

use crate::error::{MathError, Span};
use crate::number::Number;
use crate::parser::tokens::{Operator, Spanned, Token};
use std::f64::consts::{E, PI};
use std::iter::Peekable;
use std::str::CharIndices;

struct Lexer<'src> {
    input: &'src str,
    chars: Peekable<CharIndices<'src>>,
}

impl<'src> Lexer<'src> {
    fn new(input: &'src str) -> Self {
        Lexer {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Byte offset of the next unread character
    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |&(i, _)| i)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek_char() {
            if !pred(c) {
                break;
            }
            self.chars.next();
        }
    }

    /// `12`, `1.5`, `.5`, `2e-3`; a trailing `e` without digits is left for the constant
    fn number(&mut self, start: usize) -> Result<Spanned, MathError> {
        self.eat_while(|c| c.is_ascii_digit() || c == '.');

        if matches!(self.peek_char(), Some('e' | 'E')) {
            let rest = &self.input[self.offset()..];
            let mut exp = rest.chars().skip(1);
            let has_digits = match exp.next() {
                Some('+' | '-') => exp.next().is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };
            if has_digits {
                self.chars.next();
                if matches!(self.peek_char(), Some('+' | '-')) {
                    self.chars.next();
                }
                self.eat_while(|c| c.is_ascii_digit());
            }
        }

        let end = self.offset();
        let text = &self.input[start..end];
        let span = Span::new(start, end);
        let invalid = || MathError::InvalidNumber {
            value: text.to_string(),
            span: Some(span),
        };

        let is_integer = text.bytes().all(|b| b.is_ascii_digit());
        let value = if is_integer {
            // Too large for i64 falls back to a real
            match text.parse::<i64>() {
                Ok(n) => Number::Integer(n),
                Err(_) => Number::Real(text.parse::<f64>().map_err(|_| invalid())?),
            }
        } else {
            Number::Real(text.parse::<f64>().map_err(|_| invalid())?)
        };
        Ok(Spanned::new(Token::Number(value, text.to_string()), span))
    }

    fn word(&mut self, start: usize) -> Spanned {
        self.eat_while(|c| c.is_alphanumeric() || c == '_');
        let end = self.offset();
        let text = &self.input[start..end];
        let token = match text {
            "pi" | "π" => Token::Number(Number::Real(PI), "π".to_string()),
            "e" => Token::Number(Number::Real(E), "e".to_string()),
            _ => match Operator::from_name(text) {
                Some(op) => Token::Operator(op),
                None => Token::Identifier(text.to_string()),
            },
        };
        Spanned::new(token, Span::new(start, end))
    }

    fn tokens(mut self) -> Result<Vec<Spanned>, MathError> {
        let mut tokens = Vec::with_capacity(self.input.len());

        while let Some(&(start, c)) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
                continue;
            }
            if c.is_ascii_digit() || c == '.' {
                tokens.push(self.number(start)?);
                continue;
            }
            if c.is_alphabetic() || c == '_' {
                tokens.push(self.word(start));
                continue;
            }

            let token = match c {
                '+' => Token::Operator(Operator::Add),
                '-' | '−' => Token::Operator(Operator::Sub),
                '*' | '×' | '·' => Token::Operator(Operator::Mul),
                '/' | '÷' => Token::Operator(Operator::Div),
                '^' => Token::Operator(Operator::Pow),
                '!' => Token::Operator(Operator::Factorial),
                '%' => Token::Operator(Operator::Percent),
                '√' => Token::Operator(Operator::Root),
                '(' => Token::LeftParen,
                ')' => Token::RightParen,
                '[' => Token::LeftBracket,
                ']' => Token::RightBracket,
                ',' => Token::Comma,
                ':' => Token::Colon,
                '|' => Token::Pipe,
                '=' => Token::Equals,
                other => {
                    return Err(MathError::InvalidToken {
                        token: other.to_string(),
                        span: Some(Span::new(start, start + other.len_utf8())),
                    });
                }
            };
            self.chars.next();
            tokens.push(Spanned::new(token, Span::new(start, start + c.len_utf8())));
        }

        Ok(tokens)
    }
}

/// Split `input` into tokens
pub(crate) fn lex(input: &str) -> Result<Vec<Spanned>, MathError> {
    Lexer::new(input).tokens()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::Func;

    fn kinds(input: &str) -> Vec<Token> {
        lex(input).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("12 1.5 2e-3"),
            vec![
                Token::Number(Number::Integer(12), "12".into()),
                Token::Number(Number::Real(1.5), "1.5".into()),
                Token::Number(Number::Real(0.002), "2e-3".into()),
            ]
        );
        // Integer overflow lexes as a real
        assert!(matches!(
            kinds("99999999999999999999")[0],
            Token::Number(Number::Real(_), _)
        ));
    }

    #[test]
    fn test_trailing_e_is_constant() {
        let tokens = kinds("2e");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1], Token::Number(Number::Real(E), "e".into()));
    }

    #[test]
    fn test_words() {
        assert_eq!(
            kinds("sin x_1 log"),
            vec![
                Token::Operator(Operator::Func(Func::Sin)),
                Token::Identifier("x_1".into()),
                Token::Operator(Operator::Log),
            ]
        );
    }

    #[test]
    fn test_spans_and_errors() {
        let tokens = lex("ab + 1").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[1].span, Span::at(3));

        assert!(matches!(
            lex("1.2.3"),
            Err(MathError::InvalidNumber { .. })
        ));
        assert!(matches!(
            lex("x $ y"),
            Err(MathError::InvalidToken { span: Some(s), .. }) if s == Span::at(2)
        ));
    }
}
