//! Converter configuration
//!
//! Settings come from, in order of precedence:
//! 1. Command-line flags
//! 2. A JSON configuration file (`--config` or `UNIT_CONVERTER_CONFIG`)
//! 3. Built-in defaults
//!
//! Every field of the file is optional.

use crate::error::{RegistryError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use units_core::{ConstantMathConvention, DIMENSION_TOLERANCE};
use units_parser::{UnitParser, DEFAULT_MAX_ITERATIONS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Simplification passes allowed when parsing a unit string
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Absolute tolerance when comparing dimension vectors
    #[serde(default = "default_dimension_tolerance")]
    pub dimension_tolerance: f64,
    /// How numeric constants combine with units
    #[serde(default)]
    pub constant_math: ConstantMathConvention,
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

fn default_dimension_tolerance() -> f64 {
    DIMENSION_TOLERANCE
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            max_iterations: default_max_iterations(),
            dimension_tolerance: default_dimension_tolerance(),
            constant_math: ConstantMathConvention::default(),
        }
    }
}

impl ConverterConfig {
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: ConverterConfig = serde_json::from_str(content)
            .map_err(|e| RegistryError::Config(format!("invalid JSON config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        debug!("loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            RegistryError::Config(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.dimension_tolerance.is_finite() || self.dimension_tolerance < 0.0 {
            return Err(RegistryError::Config(format!(
                "dimension_tolerance must be a non-negative number, got {}",
                self.dimension_tolerance
            )));
        }
        Ok(())
    }

    /// Unit parser honoring the configured iteration limit
    pub fn parser(&self) -> UnitParser {
        UnitParser::new().with_max_iterations(self.max_iterations)
    }
}
