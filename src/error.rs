//! Parse and evaluation error types
//!
//! Every routine in this crate propagates the first error it hits unchanged
//! to its caller; there is no recovery, no partial result, and no
//! aggregation. A failed parse must restart from a fresh token stream over
//! corrected source.

use crate::parser::ast::SourceLocation;
use crate::parser::lexer::LexError;
use std::fmt;

/// Errors raised while parsing declarations or evaluating constant
/// expressions.
#[derive(Debug, Clone)]
pub enum ParseError {
    /// Expected token category not found, the stream ended early, or an
    /// unexpected token appeared at the top level.
    Syntax {
        message: String,
        location: SourceLocation,
    },

    /// A type reference named a type that is not registered.
    UnknownType {
        name: String,
        location: SourceLocation,
    },

    /// An identifier expression named a constant that is not registered.
    UnknownConstant { name: String },

    /// A constant definition's expression is (or reduced to) a string.
    NonNumericConstant { location: SourceLocation },

    /// An expression shape the evaluator does not fold. Unreachable through
    /// the current grammar; kept so the error vocabulary stays stable for
    /// downstream consumers.
    UnsupportedExpression,
}

impl ParseError {
    /// The source location associated with this error, if any.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            ParseError::Syntax { location, .. } => Some(location),
            ParseError::UnknownType { location, .. } => Some(location),
            ParseError::NonNumericConstant { location } => Some(location),
            ParseError::UnknownConstant { .. } => None,
            ParseError::UnsupportedExpression => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax { message, location } => {
                write!(
                    f,
                    "Syntax error at line {}, column {}: {}",
                    location.line, location.column, message
                )
            }
            ParseError::UnknownType { name, location } => {
                write!(
                    f,
                    "Unknown data type '{}' at line {}, column {}",
                    name, location.line, location.column
                )
            }
            ParseError::UnknownConstant { name } => {
                write!(f, "Unknown constant '{}'", name)
            }
            ParseError::NonNumericConstant { location } => {
                write!(
                    f,
                    "Expected a numeric constant at line {}, column {}",
                    location.line, location.column
                )
            }
            ParseError::UnsupportedExpression => {
                write!(f, "Unsupported constant expression")
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Syntax {
            message: err.message,
            location: err.location,
        }
    }
}
