//! Unit registry and conversions
//!
//! Units are registered under simple keys (`"m"`, `"kg"`, `"degC"`) and
//! any product, quotient or power of those keys can be converted:
//!
//! ```
//! use units_converter::UnitRegistry;
//!
//! let registry = UnitRegistry::si().unwrap();
//! let newtons = registry.convert(20.0, "kg*m/s^2", "N").unwrap();
//! assert!((newtons - 20.0).abs() < 1e-12);
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod search;
pub mod si;

pub use config::ConverterConfig;
pub use error::{RegistryError, Result};
pub use registry::{UnitEntry, UnitRegistry};
pub use search::{SearchField, SearchHit, SearchOptions};
