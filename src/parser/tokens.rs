//! Token types produced by the lexer

use crate::error::Span;
use crate::functions::Func;
use crate::number::Number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Factorial,
    Percent,
    /// Prefix `√`, applies without parentheses
    Root,

    // Builtin names that build dedicated nodes
    Func(Func),
    Log,
    Abs,
    Sqrt,
}

impl Operator {
    /// Builtin names that must be followed by an argument list
    pub(crate) fn is_function(&self) -> bool {
        matches!(
            self,
            Operator::Func(_) | Operator::Log | Operator::Abs | Operator::Sqrt
        )
    }

    pub(crate) fn is_postfix(&self) -> bool {
        matches!(self, Operator::Factorial | Operator::Percent)
    }

    /// Binding power of the binary and postfix operators
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 10,
            Operator::Mul | Operator::Div => 20,
            Operator::Pow => 40,
            Operator::Factorial | Operator::Percent => 50,
            _ => 0,
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Operator> {
        match name {
            "log" => Some(Operator::Log),
            "abs" => Some(Operator::Abs),
            "sqrt" => Some(Operator::Sqrt),
            _ => Func::from_name(name).map(Operator::Func),
        }
    }

    pub(crate) fn to_name(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "^",
            Operator::Factorial => "!",
            Operator::Percent => "%",
            Operator::Root => "√",
            Operator::Func(func) => func.name(),
            Operator::Log => "log",
            Operator::Abs => "abs",
            Operator::Sqrt => "sqrt",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// Numeric literal or named constant, with the text it was written as
    Number(Number, String),
    Identifier(String),
    Operator(Operator),
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Comma,
    Colon,
    Pipe,
    Equals,
}

impl Token {
    pub(crate) fn to_user_string(&self) -> String {
        match self {
            Token::Number(_, text) => text.clone(),
            Token::Identifier(name) => name.clone(),
            Token::Operator(op) => op.to_name().to_string(),
            Token::LeftParen => "(".to_string(),
            Token::RightParen => ")".to_string(),
            Token::LeftBracket => "[".to_string(),
            Token::RightBracket => "]".to_string(),
            Token::Comma => ",".to_string(),
            Token::Colon => ":".to_string(),
            Token::Pipe => "|".to_string(),
            Token::Equals => "=".to_string(),
        }
    }
}

/// Token plus its location in the source text
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub(crate) token: Token,
    pub(crate) span: Span,
}

impl Spanned {
    pub(crate) fn new(token: Token, span: Span) -> Self {
        Spanned { token, span }
    }
}
