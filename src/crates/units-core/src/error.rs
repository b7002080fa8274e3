use thiserror::Error;

/// Errors raised by unit construction, algebra and conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("unit system must have at least one base unit")]
    EmptyUnitSystem,

    #[error("dimension vector has {found} exponents but the unit system has {expected} base units")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("units \"{from}\" and \"{to}\" are not compatible")]
    IncompatibleUnits { from: String, to: String },

    #[error("invalid unit math: {0}")]
    InvalidUnitMath(String),

    #[error("invalid conversion direction {0:?}, expected \"to\" or \"from\"")]
    InvalidDirection(String),
}

impl UnitError {
    pub fn invalid_math(message: impl Into<String>) -> Self {
        UnitError::InvalidUnitMath(message.into())
    }

    pub fn incompatible(from: impl Into<String>, to: impl Into<String>) -> Self {
        UnitError::IncompatibleUnits {
            from: from.into(),
            to: to.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, UnitError>;
