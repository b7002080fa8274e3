use crate::span::Span;
use std::fmt;
use thiserror::Error;

/// Errors raised while evaluating an exponent expression
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("expected {expected}, found '{found}' at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unexpected end of expression at {span}, expected {expected}")]
    UnexpectedEof { expected: String, span: Span },

    #[error("invalid character '{found}' at {span}")]
    InvalidCharacter { found: String, span: Span },

    #[error("expression nests deeper than {limit} levels at {span}")]
    TooDeep { limit: usize, span: Span },

    #[error("empty expression")]
    Empty,
}

impl ExprError {
    pub fn unexpected_token(
        expected: impl Into<String>,
        found: impl Into<String>,
        span: Span,
    ) -> Self {
        ExprError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        ExprError::UnexpectedEof {
            expected: expected.into(),
            span,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            ExprError::UnexpectedToken { span, .. }
            | ExprError::UnexpectedEof { span, .. }
            | ExprError::InvalidCharacter { span, .. }
            | ExprError::TooDeep { span, .. } => Some(*span),
            ExprError::Empty => None,
        }
    }
}

/// Why an exponent could not be turned into a number
#[derive(Debug, Clone, PartialEq)]
pub enum ExponentFault {
    RestrictedCharacter(char),
    Evaluation(ExprError),
    NonFinite(f64),
}

impl fmt::Display for ExponentFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExponentFault::RestrictedCharacter(c) => {
                write!(f, "character '{}' is not allowed in exponents", c)
            }
            ExponentFault::Evaluation(err) => write!(f, "{}", err),
            ExponentFault::NonFinite(value) => write!(f, "evaluates to {}", value),
        }
    }
}

/// Errors raised while parsing a unit string
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("parentheses in unit \"{unit}\" are not all matched")]
    MalformedBrackets { unit: String },

    #[error("invalid unit string \"{token}\" in unit \"{unit}\" (cannot begin with \"{operator}\")")]
    LeadingOperator {
        operator: char,
        token: String,
        unit: String,
    },

    #[error("invalid unit string \"{token}\" in unit \"{unit}\" (cannot end with \"{operator}\")")]
    TrailingOperator {
        operator: char,
        token: String,
        unit: String,
    },

    #[error("invalid base \"{base}\" in unit \"{unit}\" (base must be a unit or enclosed in parentheses)")]
    InvalidBase { base: String, unit: String },

    #[error("invalid exponent \"{exponent}\" in unit \"{unit}\": {fault}")]
    InvalidExponent {
        exponent: String,
        unit: String,
        fault: ExponentFault,
    },

    #[error("unit \"{unit}\" could not be simplified within {limit} iterations")]
    MaxIterations { unit: String, limit: usize },
}

impl ParseError {
    pub fn leading(operator: char, token: impl Into<String>, unit: impl Into<String>) -> Self {
        ParseError::LeadingOperator {
            operator,
            token: token.into(),
            unit: unit.into(),
        }
    }

    pub fn trailing(operator: char, token: impl Into<String>, unit: impl Into<String>) -> Self {
        ParseError::TrailingOperator {
            operator,
            token: token.into(),
            unit: unit.into(),
        }
    }

    pub fn invalid_exponent(
        exponent: impl Into<String>,
        unit: impl Into<String>,
        fault: ExponentFault,
    ) -> Self {
        ParseError::InvalidExponent {
            exponent: exponent.into(),
            unit: unit.into(),
            fault,
        }
    }

    /// Structural problems with the unit string itself, as opposed to its
    /// brackets, exponents or the iteration limit
    pub fn is_invalid_unit(&self) -> bool {
        matches!(
            self,
            ParseError::LeadingOperator { .. }
                | ParseError::TrailingOperator { .. }
                | ParseError::InvalidBase { .. }
        )
    }

    /// The full unit string that failed to parse
    pub fn unit(&self) -> &str {
        match self {
            ParseError::MalformedBrackets { unit }
            | ParseError::LeadingOperator { unit, .. }
            | ParseError::TrailingOperator { unit, .. }
            | ParseError::InvalidBase { unit, .. }
            | ParseError::InvalidExponent { unit, .. }
            | ParseError::MaxIterations { unit, .. } => unit,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
