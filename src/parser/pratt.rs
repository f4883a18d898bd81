use crate::ast::UnaryOp;
use crate::error::{MathError, Span};
use crate::parser::tokens::{Operator, Spanned, Token};
use crate::symbol::Symbol;
use crate::Expr;

/// Binding power of prefix `-`, `+` and `√`: looser than `^`, tighter than `*`
const PREFIX_PRECEDENCE: u8 = 30;

/// Parse tokens into an AST using Pratt parsing algorithm
pub(crate) fn parse_expression(tokens: &[Spanned]) -> Result<Expr, MathError> {
    if tokens.is_empty() {
        return Err(MathError::UnexpectedEndOfInput);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_statement()?;

    match parser.current() {
        None => Ok(expr),
        Some(extra) => Err(MathError::UnexpectedToken {
            expected: "end of input".to_string(),
            got: extra.token.to_user_string(),
            span: Some(extra.span),
        }),
    }
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn current(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek_is(&self, token: &Token) -> bool {
        self.current().is_some_and(|s| &s.token == token)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Consume `token` or report what was found instead
    fn expect(&mut self, token: Token) -> Result<(), MathError> {
        match self.current() {
            Some(s) if s.token == token => {
                self.advance();
                Ok(())
            }
            Some(s) => Err(MathError::UnexpectedToken {
                expected: token.to_user_string(),
                got: s.token.to_user_string(),
                span: Some(s.span),
            }),
            None => Err(MathError::UnexpectedEndOfInput),
        }
    }

    /// An expression, or a definition `f(x, y) = body`
    fn parse_statement(&mut self) -> Result<Expr, MathError> {
        let start = self.current().map(|s| s.span);
        let head = self.parse_expr(0)?;
        if !self.peek_is(&Token::Equals) {
            return Ok(head);
        }
        self.advance();

        let invalid = || {
            MathError::InvalidSyntax {
                msg: "left side of '=' must look like f(x, y)".to_string(),
                span: start,
            }
        };
        let Expr::Call { callee, args } = head else {
            return Err(invalid());
        };
        let Expr::Variable(name) = *callee else {
            return Err(invalid());
        };
        let params = args
            .into_iter()
            .map(|arg| match arg {
                Expr::Variable(param) => Ok(param),
                _ => Err(invalid()),
            })
            .collect::<Result<Vec<Symbol>, MathError>>()?;

        let body = self.parse_expr(0)?;
        Ok(Expr::function_def(name.name(), params, body))
    }

    fn parse_expr(&mut self, min_precedence: u8) -> Result<Expr, MathError> {
        // Parse left side (prefix)
        let mut left = self.parse_prefix()?;

        // Parse postfix, index and infix operators
        while let Some(spanned) = self.current() {
            match &spanned.token {
                Token::LeftBracket => {
                    left = self.parse_index(left)?;
                }
                Token::Operator(op) if op.is_postfix() => {
                    if op.precedence() < min_precedence {
                        break;
                    }
                    self.advance();
                    let unary = match op {
                        Operator::Factorial => UnaryOp::Factorial,
                        _ => UnaryOp::Percent,
                    };
                    left = Expr::unary(unary, left);
                }
                Token::Operator(op) if op.precedence() > 0 => {
                    let precedence = op.precedence();
                    if precedence < min_precedence {
                        break;
                    }
                    left = self.parse_infix(left, *op, precedence)?;
                }
                _ => break,
            }
        }

        Ok(left)
    }

    /// Comma-separated arguments up to the closing parenthesis, which is consumed
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, MathError> {
        let mut args = Vec::new();

        if self.peek_is(&Token::RightParen) {
            self.advance();
            return Ok(args); // Empty argument list
        }

        loop {
            args.push(self.parse_expr(0)?);

            match self.current() {
                Some(Spanned {
                    token: Token::Comma,
                    ..
                }) => {
                    self.advance(); // consume ,
                }
                Some(Spanned {
                    token: Token::RightParen,
                    ..
                }) => {
                    self.advance(); // consume )
                    break;
                }
                Some(other) => {
                    return Err(MathError::UnexpectedToken {
                        expected: ", or )".to_string(),
                        got: other.token.to_user_string(),
                        span: Some(other.span),
                    });
                }
                None => return Err(MathError::UnexpectedEndOfInput),
            }
        }

        Ok(args)
    }

    fn parse_prefix(&mut self) -> Result<Expr, MathError> {
        let spanned = self.current().ok_or(MathError::UnexpectedEndOfInput)?;
        let span = spanned.span;
        self.advance();

        match &spanned.token {
            Token::Number(value, text) => {
                // Keep the source text only when it prints differently
                if value.to_string() == *text {
                    Ok(Expr::number(*value))
                } else {
                    Ok(Expr::literal_text(*value, text.clone()))
                }
            }

            Token::Identifier(name) => {
                if self.peek_is(&Token::LeftParen) {
                    self.advance(); // consume (
                    let args = self.parse_arguments()?;
                    Ok(Expr::call(Expr::symbol(name), args))
                } else {
                    Ok(Expr::symbol(name))
                }
            }

            Token::Operator(op) if op.is_function() => {
                // Function must be followed by (
                self.expect(Token::LeftParen)?;
                let args = self.parse_arguments()?;
                build_function(*op, args, span)
            }

            Token::Operator(Operator::Sub) => Ok(self.parse_expr(PREFIX_PRECEDENCE)?.neg()),
            Token::Operator(Operator::Add) => Ok(Expr::unary(
                UnaryOp::Plus,
                self.parse_expr(PREFIX_PRECEDENCE)?,
            )),
            Token::Operator(Operator::Root) => Ok(self.parse_expr(PREFIX_PRECEDENCE)?.sqrt()),

            Token::LeftParen => {
                if self.peek_is(&Token::RightParen) {
                    return Err(MathError::invalid_syntax_at("empty parentheses", span));
                }
                let inner = self.parse_expr(0)?;
                self.expect(Token::RightParen)?;
                Ok(Expr::group(inner))
            }

            Token::Pipe => {
                let inner = self.parse_expr(0)?;
                self.expect(Token::Pipe)?;
                Ok(inner.abs())
            }

            other => Err(MathError::UnexpectedToken {
                expected: "expression".to_string(),
                got: other.to_user_string(),
                span: Some(span),
            }),
        }
    }

    /// `object[i]` or `object[start:end]` with either bound optional
    fn parse_index(&mut self, object: Expr) -> Result<Expr, MathError> {
        let open = self.current().map(|s| s.span);
        self.advance(); // consume [

        let start = if self.peek_is(&Token::Colon) {
            None
        } else {
            Some(self.parse_expr(0)?)
        };

        if self.peek_is(&Token::Colon) {
            self.advance();
            let end = if self.peek_is(&Token::RightBracket) {
                None
            } else {
                Some(self.parse_expr(0)?)
            };
            self.expect(Token::RightBracket)?;
            return Ok(Expr::slice(object, start, end));
        }

        self.expect(Token::RightBracket)?;
        match start {
            Some(index) => Ok(Expr::index(object, index)),
            None => Err(MathError::InvalidSyntax {
                msg: "empty index".to_string(),
                span: open,
            }),
        }
    }

    fn parse_infix(&mut self, left: Expr, op: Operator, precedence: u8) -> Result<Expr, MathError> {
        self.advance();

        // Right associative for power, left for others
        let next_precedence = if matches!(op, Operator::Pow) {
            precedence
        } else {
            precedence + 1
        };

        let right = self.parse_expr(next_precedence)?;

        let result = match op {
            Operator::Add => Expr::add(left, right),
            Operator::Sub => Expr::sub(left, right),
            Operator::Mul => Expr::mul(left, right),
            Operator::Div => Expr::div(left, right),
            Operator::Pow => Expr::pow(left, right),
            _ => {
                return Err(MathError::InvalidToken {
                    token: op.to_name().to_string(),
                    span: None,
                });
            }
        };

        Ok(result)
    }
}

/// Builtin names build their dedicated nodes; `log(x)` is base 10
fn build_function(op: Operator, mut args: Vec<Expr>, span: Span) -> Result<Expr, MathError> {
    let got = args.len();
    let arity_error = |expected: &str| {
        MathError::invalid_syntax_at(
            format!("{}() takes {}, got {}", op.to_name(), expected, got),
            span,
        )
    };

    match (op, got) {
        (Operator::Log, 2) => {
            let base = args.pop();
            let arg = args.pop();
            match (arg, base) {
                (Some(arg), Some(base)) => Ok(Expr::log(arg, base)),
                _ => Err(MathError::UnexpectedEndOfInput),
            }
        }
        (Operator::Log, 1) | (Operator::Func(_) | Operator::Abs | Operator::Sqrt, 1) => {
            let arg = args.pop().ok_or(MathError::UnexpectedEndOfInput)?;
            Ok(match op {
                Operator::Func(func) => Expr::func(func, arg),
                Operator::Log => Expr::log(arg, Expr::int(10)),
                Operator::Abs => arg.abs(),
                _ => arg.sqrt(),
            })
        }
        (Operator::Log, _) => Err(arity_error("1 or 2 arguments")),
        _ => Err(arity_error("1 argument")),
    }
}
