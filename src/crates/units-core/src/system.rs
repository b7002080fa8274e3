use crate::error::{Result, UnitError};
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Identifiers of the SI base units, in dimension-vector order
pub const SI_BASE_UNITS: [&str; 7] = ["m", "s", "mol", "A", "K", "cd", "kg"];

/// A set of mutually independent base units
///
/// Units can only be compared or converted when their systems share the
/// same concrete type, which `kind` reports.
pub trait UnitSystem: fmt::Debug + Send + Sync + 'static {
    /// Length of every dimension vector in this system
    fn num_base_units(&self) -> usize;

    fn name(&self) -> Option<&str> {
        None
    }

    fn description(&self) -> Option<&str> {
        None
    }

    fn kind(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

/// Shared handle to a unit system
pub type SystemRef = Arc<dyn UnitSystem>;

impl fmt::Display for dyn UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), self.description()) {
            (Some(name), Some(description)) => write!(f, "{} ({})", name, description),
            (Some(name), None) => write!(f, "{}", name),
            _ => write!(f, "unit system with {} base units", self.num_base_units()),
        }
    }
}

/// A user-defined unit system with an arbitrary number of base units
#[derive(Debug, Clone, PartialEq)]
pub struct CustomUnitSystem {
    num_base_units: usize,
    name: Option<String>,
    description: Option<String>,
}

impl CustomUnitSystem {
    pub fn new(num_base_units: usize) -> Result<Self> {
        if num_base_units == 0 {
            return Err(UnitError::EmptyUnitSystem);
        }
        Ok(CustomUnitSystem {
            num_base_units,
            name: None,
            description: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn shared(self) -> SystemRef {
        Arc::new(self)
    }
}

impl UnitSystem for CustomUnitSystem {
    fn num_base_units(&self) -> usize {
        self.num_base_units
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// The International System of Units
///
/// Base units, in order: length (m), time (s), amount of substance (mol),
/// electric current (A), temperature (K), luminous intensity (cd) and
/// mass (kg).
#[derive(Debug, Clone, PartialEq)]
pub struct SiUnitSystem {
    name: String,
    description: String,
}

impl SiUnitSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn shared() -> SystemRef {
        Arc::new(Self::default())
    }
}

impl Default for SiUnitSystem {
    fn default() -> Self {
        SiUnitSystem {
            name: "SI".to_string(),
            description: "International System of Units".to_string(),
        }
    }
}

impl UnitSystem for SiUnitSystem {
    fn num_base_units(&self) -> usize {
        SI_BASE_UNITS.len()
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn description(&self) -> Option<&str> {
        Some(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_system() {
        let system = CustomUnitSystem::new(3).unwrap().with_name("LTM");
        assert_eq!(system.num_base_units(), 3);
        assert_eq!(system.name(), Some("LTM"));
        assert_eq!(system.description(), None);
    }

    #[test]
    fn test_empty_system_rejected() {
        assert_eq!(CustomUnitSystem::new(0), Err(UnitError::EmptyUnitSystem));
    }

    #[test]
    fn test_si_defaults() {
        let si = SiUnitSystem::shared();
        assert_eq!(si.num_base_units(), 7);
        assert_eq!(si.name(), Some("SI"));
        assert_eq!(si.to_string(), "SI (International System of Units)");
    }

    #[test]
    fn test_kind_distinguishes_types() {
        let si = SiUnitSystem::shared();
        let renamed: SystemRef = Arc::new(SiUnitSystem::new().with_name("Metric"));
        let custom = CustomUnitSystem::new(7).unwrap().shared();

        assert_eq!(si.kind(), renamed.kind());
        assert_ne!(si.kind(), custom.kind());
    }
}
