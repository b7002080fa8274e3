use thiserror::Error;
use units_core::UnitError;
use units_parser::ParseError;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unit \"{0}\" was not found in the unit registry")]
    UnitNotFound(String),

    #[error("unit \"{0}\" is already defined, pass overwrite to replace it")]
    UnitAlreadyDefined(String),

    #[error("unit key \"{0}\" is not a fully-simplified unit")]
    NotSimplified(String),

    #[error("unit \"{key}\" belongs to unit system {found}, but the registry uses {expected}")]
    SystemMismatch {
        key: String,
        expected: String,
        found: String,
    },

    #[error("invalid search field \"{0}\", expected one of: key, name, tags, description")]
    InvalidSearchField(String),

    #[error("invalid search term: {0}")]
    SearchPattern(#[from] regex::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Unit(#[from] UnitError),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
