use std::fmt;

/// Source location span for error reporting
/// Represents a range of characters in the input string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start position (0-indexed byte offset)
    pub start: usize,
    /// End position (exclusive, 0-indexed byte offset)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Create a span for a single position
    pub fn at(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos + 1,
        }
    }

    /// Check if this span has valid location info
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Format the span for display (1-indexed for users)
    pub fn display(&self) -> String {
        if !self.is_valid() {
            String::new()
        } else if self.end - self.start == 1 {
            format!(" at position {}", self.start + 1)
        } else {
            format!(" at positions {}-{}", self.start + 1, self.end)
        }
    }
}

/// Errors raised while parsing, evaluating or transforming expressions
#[derive(Debug, Clone, PartialEq)]
pub enum MathError {
    // Parsing errors
    EmptyFormula,
    InvalidSyntax {
        msg: String,
        span: Option<Span>,
    },
    InvalidNumber {
        value: String,
        span: Option<Span>,
    },
    InvalidToken {
        token: String,
        span: Option<Span>,
    },
    UnexpectedToken {
        expected: String,
        got: String,
        span: Option<Span>,
    },
    UnexpectedEndOfInput,

    // Numeric errors
    /// Operand outside the function's domain, e.g. `asin(2)`
    DomainError {
        function: String,
        value: String,
    },
    /// Function evaluated at a pole, e.g. `csc(0)`
    UndefinedValue {
        function: String,
        value: String,
    },
    DivisionByZero,

    // Evaluation errors
    UnboundVariable(String),
    TypeMismatch {
        expected: &'static str,
        found: String,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    NotCallable(String),
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },

    // Symbolic transformation errors
    IntegrationUnsupported(String),
    NotDifferentiable(String),
    UnsupportedOperation(String),

    /// Iterative root finder exhausted its budget
    NonConvergence {
        iterations: usize,
    },

    // Safety limits
    MaxDepthExceeded,
    MaxNodesExceeded,
}

impl MathError {
    /// Create InvalidSyntax without span
    pub fn invalid_syntax(msg: impl Into<String>) -> Self {
        MathError::InvalidSyntax {
            msg: msg.into(),
            span: None,
        }
    }

    /// Create InvalidSyntax with span
    pub fn invalid_syntax_at(msg: impl Into<String>, span: Span) -> Self {
        MathError::InvalidSyntax {
            msg: msg.into(),
            span: Some(span),
        }
    }

    pub fn domain(function: impl Into<String>, value: impl fmt::Display) -> Self {
        MathError::DomainError {
            function: function.into(),
            value: value.to_string(),
        }
    }

    pub fn undefined(function: impl Into<String>, value: impl fmt::Display) -> Self {
        MathError::UndefinedValue {
            function: function.into(),
            value: value.to_string(),
        }
    }

    pub fn integration(shape: impl fmt::Display) -> Self {
        MathError::IntegrationUnsupported(shape.to_string())
    }

    /// True for the errors produced by the text boundary
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            MathError::EmptyFormula
                | MathError::InvalidSyntax { .. }
                | MathError::InvalidNumber { .. }
                | MathError::InvalidToken { .. }
                | MathError::UnexpectedToken { .. }
                | MathError::UnexpectedEndOfInput
        )
    }
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = |span: &Option<Span>| span.map_or(String::new(), |s| s.display());
        match self {
            MathError::EmptyFormula => write!(f, "Formula cannot be empty"),
            MathError::InvalidSyntax { msg, span } => {
                write!(f, "Invalid syntax: {}{}", msg, at(span))
            }
            MathError::InvalidNumber { value, span } => {
                write!(f, "Invalid number format: '{}'{}", value, at(span))
            }
            MathError::InvalidToken { token, span } => {
                write!(f, "Invalid token: '{}'{}", token, at(span))
            }
            MathError::UnexpectedToken {
                expected,
                got,
                span,
            } => {
                write!(f, "Expected '{}', but got '{}'{}", expected, got, at(span))
            }
            MathError::UnexpectedEndOfInput => write!(f, "Unexpected end of input"),
            MathError::DomainError { function, value } => {
                write!(f, "Domain error: {}({}) is outside the domain", function, value)
            }
            MathError::UndefinedValue { function, value } => {
                write!(f, "Undefined value: {}({}) is a pole", function, value)
            }
            MathError::DivisionByZero => write!(f, "Division by zero"),
            MathError::UnboundVariable(name) => {
                write!(f, "Variable '{}' has no binding", name)
            }
            MathError::TypeMismatch { expected, found } => {
                write!(f, "Expected a {}, found {}", expected, found)
            }
            MathError::ArityMismatch {
                name,
                expected,
                got,
            } => write!(
                f,
                "Function '{}' takes {} argument(s) but {} were supplied",
                name, expected, got
            ),
            MathError::NotCallable(what) => write!(f, "'{}' is not callable", what),
            MathError::IndexOutOfBounds { index, len } => {
                write!(f, "Index {} is out of bounds for length {}", index, len)
            }
            MathError::IntegrationUnsupported(shape) => {
                write!(f, "Integration not yet supported for '{}'", shape)
            }
            MathError::NotDifferentiable(what) => {
                write!(f, "Cannot differentiate '{}'", what)
            }
            MathError::UnsupportedOperation(msg) => {
                write!(f, "Unsupported operation: {}", msg)
            }
            MathError::NonConvergence { iterations } => write!(
                f,
                "Root finder did not converge after {} iterations",
                iterations
            ),
            MathError::MaxDepthExceeded => {
                write!(f, "Expression nesting depth exceeds maximum limit")
            }
            MathError::MaxNodesExceeded => {
                write!(f, "Expression size exceeds maximum node count limit")
            }
        }
    }
}

impl std::error::Error for MathError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_display() {
        assert_eq!(Span::at(3).display(), " at position 4");
        assert_eq!(Span::new(2, 5).display(), " at positions 3-5");
        assert_eq!(Span::default().display(), "");
    }

    #[test]
    fn test_error_messages() {
        let err = MathError::domain("asin", 2);
        assert_eq!(err.to_string(), "Domain error: asin(2) is outside the domain");

        let err = MathError::invalid_syntax_at("dangling operator", Span::at(0));
        assert_eq!(
            err.to_string(),
            "Invalid syntax: dangling operator at position 1"
        );
        assert!(err.is_parse_error());
        assert!(!MathError::DivisionByZero.is_parse_error());
    }
}
