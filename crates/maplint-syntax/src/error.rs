//! Syntax errors

use crate::span::Span;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Syntax error: unexpected {found}, expected {expected}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("Syntax error: unterminated {what}")]
    Unterminated { what: &'static str, span: Span },

    #[error("Syntax error: invalid character '{ch}'")]
    InvalidCharacter { ch: char, span: Span },

    #[error("Syntax error: {what} is missing its digits")]
    MalformedNumber { what: &'static str, span: Span },

    #[error("Syntax error: invalid unicode escape in identifier")]
    InvalidEscape { span: Span },

    #[error("Syntax error: nesting deeper than {limit} levels")]
    TooDeep { limit: usize, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::Unterminated { span, .. }
            | ParseError::InvalidCharacter { span, .. }
            | ParseError::MalformedNumber { span, .. }
            | ParseError::InvalidEscape { span }
            | ParseError::TooDeep { span, .. } => *span,
        }
    }
}
