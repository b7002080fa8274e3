use crate::config::ConverterConfig;
use crate::error::{RegistryError, Result};
use log::{debug, trace};
use std::collections::BTreeMap;
use std::sync::Arc;
use units_core::{Measure, Quantity, SystemRef, Unit};
use units_parser::UnitTerms;

/// A unit stored in a registry, with its searchable metadata
#[derive(Debug, Clone)]
pub struct UnitEntry {
    pub unit: Unit,
    pub tags: Vec<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UnitEntry {
    /// An entry named after the unit itself
    pub fn new(unit: impl Into<Unit>) -> Self {
        let unit = unit.into();
        let name = unit.name().map(str::to_string);
        UnitEntry {
            unit,
            tags: Vec::new(),
            name,
            description: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Units of a single unit system, keyed by fully-simplified identifiers
///
/// Aliases share their entry with the key they were created from. Any
/// product, quotient or power of registered keys can be resolved to a
/// [`Unit`] with [`UnitRegistry::str_to_unit`].
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    system: SystemRef,
    config: ConverterConfig,
    units: BTreeMap<String, Arc<UnitEntry>>,
    order: Vec<String>,
}

impl UnitRegistry {
    pub fn new(system: SystemRef) -> Self {
        Self::with_config(system, ConverterConfig::default())
    }

    pub fn with_config(system: SystemRef, config: ConverterConfig) -> Self {
        UnitRegistry {
            system,
            config,
            units: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    pub fn unit_system(&self) -> &SystemRef {
        &self.system
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Keys in the order they were defined
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Keys paired with their entries, in the order they were defined
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Arc<UnitEntry>)> {
        self.order
            .iter()
            .filter_map(|key| self.units.get(key).map(|entry| (key.as_str(), entry)))
    }

    /// Register a unit under `key`
    ///
    /// Fails if `key` is already defined and `overwrite` is false, if `key`
    /// is not a fully-simplified unit, or if the unit belongs to a different
    /// unit system.
    pub fn add_unit(&mut self, key: &str, entry: UnitEntry, overwrite: bool) -> Result<()> {
        if self.units.contains_key(key) && !overwrite {
            return Err(RegistryError::UnitAlreadyDefined(key.to_string()));
        }
        self.insert(key, Arc::new(entry))
    }

    /// Register alternate keys for an existing unit
    pub fn add_alias<I, S>(&mut self, key: &str, aliases: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.get(key)?.clone();
        for alias in aliases {
            let alias = alias.as_ref();
            if self.units.contains_key(alias) {
                return Err(RegistryError::UnitAlreadyDefined(alias.to_string()));
            }
            self.insert(alias, entry.clone())?;
        }
        Ok(())
    }

    fn insert(&mut self, key: &str, entry: Arc<UnitEntry>) -> Result<()> {
        if !self.is_simplified_unit(key) {
            return Err(RegistryError::NotSimplified(key.to_string()));
        }

        let system = entry.unit.unit_system();
        if system.kind() != self.system.kind()
            || system.num_base_units() != self.system.num_base_units()
        {
            return Err(RegistryError::SystemMismatch {
                key: key.to_string(),
                expected: self.system.to_string(),
                found: system.to_string(),
            });
        }

        trace!("registering unit {:?}", key);
        if self.units.insert(key.to_string(), entry).is_none() {
            self.order.push(key.to_string());
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<&Arc<UnitEntry>> {
        self.units
            .get(key)
            .ok_or_else(|| RegistryError::UnitNotFound(key.to_string()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.units.contains_key(key)
    }

    /// Other keys sharing the entry of `key`, in definition order
    pub fn get_aliases(&self, key: &str) -> Result<Vec<String>> {
        let entry = self.get(key)?;
        Ok(self
            .entries()
            .filter(|(other, other_entry)| *other != key && Arc::ptr_eq(entry, other_entry))
            .map(|(other, _)| other.to_string())
            .collect())
    }

    /// Whether `unit` parses to exactly itself with exponent one
    pub fn is_simplified_unit(&self, unit: &str) -> bool {
        match self.parse(unit) {
            Ok(terms) => terms.len() == 1 && terms.get(unit) == Some(&1.0),
            Err(_) => false,
        }
    }

    /// Whether `unit` resolves to a unit made of registered keys
    pub fn is_defined_unit(&self, unit: &str) -> bool {
        self.str_to_unit(unit).is_ok()
    }

    pub fn parse(&self, unit: &str) -> Result<UnitTerms> {
        Ok(self.config.parser().parse(unit)?)
    }

    /// Resolve a simple or compound unit string to a [`Unit`]
    ///
    /// Each parsed token is looked up, raised to its exponent and
    /// multiplied into the result. An empty string is the dimensionless
    /// identity unit.
    pub fn str_to_unit(&self, unit: &str) -> Result<Unit> {
        let terms = self.parse(unit)?;

        let mut output = Unit::dimensionless(self.system.clone());
        for (token, exponent) in &terms {
            let entry = self.get(token)?;
            output = output.try_mul(&entry.unit.powf(*exponent))?;
        }

        debug!("resolved {:?} to dimensions {}", unit, output.dimensions());
        Ok(output.with_identifier(unit.trim()))
    }

    /// Whether two unit strings can be converted into each other
    pub fn is_convertible(&self, unit1: &str, unit2: &str) -> Result<bool> {
        self.are_convertible(&[unit1, unit2])
    }

    /// Whether every unit string can be converted into every other
    pub fn are_convertible(&self, units: &[&str]) -> Result<bool> {
        let resolved = units
            .iter()
            .map(|unit| self.str_to_unit(unit))
            .collect::<Result<Vec<_>>>()?;

        let Some((first, rest)) = resolved.split_first() else {
            return Ok(true);
        };
        Ok(rest
            .iter()
            .all(|unit| first.is_convertible_within(unit, self.config.dimension_tolerance)))
    }

    /// Convert a quantity between two simple or compound unit strings
    pub fn convert<Q: Quantity>(&self, quantity: Q, from_unit: &str, to_unit: &str) -> Result<Q::Output> {
        let from = self.str_to_unit(from_unit)?;
        let to = self.str_to_unit(to_unit)?;

        if !from.is_convertible_within(&to, self.config.dimension_tolerance) {
            return Err(units_core::UnitError::incompatible(from_unit, to_unit).into());
        }

        Ok(quantity.map_values(|v| to.from_base_value(from.to_base_value(v, 1.0), 1.0)))
    }

    /// `unit * value` under the configured constant-math convention
    pub fn mul_constant(&self, unit: &str, value: f64) -> Result<Unit> {
        let unit = self.str_to_unit(unit)?;
        Ok(unit.mul_constant(value, self.config.constant_math)?)
    }

    /// `unit / value` under the configured constant-math convention
    pub fn div_constant(&self, unit: &str, value: f64) -> Result<Unit> {
        let unit = self.str_to_unit(unit)?;
        Ok(unit.div_constant(value, self.config.constant_math)?)
    }
}
