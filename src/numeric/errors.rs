// ============================================================================
// Numeric Errors
// Error types for uncertainty propagation and literal parsing
// ============================================================================

use crate::engine::BinaryOp;
use std::fmt;

/// Errors that can occur while propagating or parsing uncertain values.
#[derive(Debug, Clone, PartialEq)]
pub enum UncertaintyError {
    /// Operand is neither a quantity nor a plain number
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// Logarithm of a non-positive value
    DomainError { operation: &'static str, value: f64 },
    /// Correlation correction drove the variance below zero
    NegativeVariance {
        operation: &'static str,
        variance: f64,
    },
    /// Operation is declared but has no propagation rule
    UnsupportedOperation(BinaryOp),
    /// Input string matches no literal grammar rule
    Parse(ParseError),
}

impl fmt::Display for UncertaintyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UncertaintyError::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {}, found {}", expected, found)
            },
            UncertaintyError::DomainError { operation, value } => {
                write!(f, "domain error: {} undefined for {}", operation, value)
            },
            UncertaintyError::NegativeVariance {
                operation,
                variance,
            } => write!(
                f,
                "domain error: {} produced negative variance {}",
                operation, variance
            ),
            UncertaintyError::UnsupportedOperation(op) => {
                write!(f, "unsupported operation: {}", op)
            },
            UncertaintyError::Parse(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for UncertaintyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UncertaintyError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for UncertaintyError {
    fn from(err: ParseError) -> Self {
        UncertaintyError::Parse(err)
    }
}

/// Why a literal failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// No grammar rule matched the representation
    NotParenUncert,
    /// Exponent suffix is not an integer
    InvalidExponent,
    /// A separator-form component is not a real number
    InvalidNumber,
}

/// Literal parse failure, carrying the offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    input: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, input: &str) -> Self {
        Self {
            kind,
            input: input.to_string(),
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::NotParenUncert => {
                write!(f, "unparsable number representation: '{}'", self.input)
            },
            ParseErrorKind::InvalidExponent => {
                write!(f, "invalid exponent in representation: '{}'", self.input)
            },
            ParseErrorKind::InvalidNumber => {
                write!(f, "invalid number in representation: '{}'", self.input)
            },
        }
    }
}

impl std::error::Error for ParseError {}

/// Result type alias for uncertainty operations
pub type NumericResult<T> = Result<T, UncertaintyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        assert_eq!(
            UncertaintyError::UnsupportedOperation(BinaryOp::FloorDiv).to_string(),
            "unsupported operation: floor division"
        );
        assert_eq!(
            UncertaintyError::TypeMismatch {
                expected: "quantity or number",
                found: "&str",
            }
            .to_string(),
            "type mismatch: expected quantity or number, found &str"
        );
    }

    #[test]
    fn test_parse_error_names_input() {
        let err = ParseError::new(ParseErrorKind::NotParenUncert, "abc");
        assert_eq!(err.to_string(), "unparsable number representation: 'abc'");
        assert_eq!(err.input(), "abc");

        let wrapped = UncertaintyError::from(err.clone());
        assert_eq!(wrapped.to_string(), err.to_string());
        assert!(wrapped.source().is_some());
    }

    #[test]
    fn test_error_equality() {
        let a = UncertaintyError::UnsupportedOperation(BinaryOp::Rem);
        assert_eq!(a, UncertaintyError::UnsupportedOperation(BinaryOp::Rem));
        assert_ne!(a, UncertaintyError::UnsupportedOperation(BinaryOp::FloorDiv));
    }
}
