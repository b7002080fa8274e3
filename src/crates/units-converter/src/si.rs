//! Built-in table of common SI units
//!
//! All units are linear in the seven SI base units, ordered as
//! length, time, amount of substance, electric current, temperature,
//! luminous intensity and mass.

use crate::config::ConverterConfig;
use crate::error::Result;
use crate::registry::{UnitEntry, UnitRegistry};
use std::f64::consts::PI;
use units_core::{SiUnitSystem, SystemRef, UnitLinear};

type Dims = [f64; 7];

const DIMENSIONLESS: Dims = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const LENGTH: Dims = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const AREA: Dims = [2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const VOLUME: Dims = [3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const TIME: Dims = [0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const FREQUENCY: Dims = [0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const SPEED: Dims = [1.0, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
const AMOUNT: Dims = [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
const CURRENT: Dims = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0];
const TEMPERATURE: Dims = [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0];
const LUMINOUS_INTENSITY: Dims = [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0];
const MASS: Dims = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0];
const FORCE: Dims = [1.0, -2.0, 0.0, 0.0, 0.0, 0.0, 1.0];
const PRESSURE: Dims = [-1.0, -2.0, 0.0, 0.0, 0.0, 0.0, 1.0];
const ENERGY: Dims = [2.0, -2.0, 0.0, 0.0, 0.0, 0.0, 1.0];
const POWER: Dims = [2.0, -3.0, 0.0, 0.0, 0.0, 0.0, 1.0];

const INCH: f64 = 0.0254;
const FOOT: f64 = 0.3048;
const MILE: f64 = 1609.344;
const GALLON: f64 = 3.785411784e-3;
const POUND_MASS: f64 = 0.45359237;
const FAHRENHEIT: f64 = 5.0 / 9.0;

/// One row of the built-in table
struct SiUnit {
    key: &'static str,
    name: &'static str,
    dims: Dims,
    scale: f64,
    offset: f64,
    tags: &'static [&'static str],
    aliases: &'static [&'static str],
    description: Option<&'static str>,
}

const fn unit(
    key: &'static str,
    name: &'static str,
    dims: Dims,
    scale: f64,
    tags: &'static [&'static str],
) -> SiUnit {
    SiUnit {
        key,
        name,
        dims,
        scale,
        offset: 0.0,
        tags,
        aliases: &[],
        description: None,
    }
}

impl SiUnit {
    const fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    const fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    const fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

static SI_UNITS: &[SiUnit] = &[
    // base units
    unit("m", "meter", LENGTH, 1.0, &["length"]).aliases(&["meter", "meters"]),
    unit("s", "second", TIME, 1.0, &["time"]).aliases(&["sec", "second"]),
    unit("mol", "mole", AMOUNT, 1.0, &["amount"]).aliases(&["moles", "mole"]),
    unit("A", "ampere", CURRENT, 1.0, &["current"])
        .aliases(&["amp", "amps"])
        .describe("Unit of measure of electric current"),
    unit("K", "Kelvin", TEMPERATURE, 1.0, &["temperature"]),
    unit("cd", "candela", LUMINOUS_INTENSITY, 1.0, &["luminance"]),
    unit("kg", "kilogram", MASS, 1.0, &["mass"])
        .aliases(&["kilogram", "kilograms"])
        .describe("Unit of measure of mass"),
    // length
    unit("mm", "millimeter", LENGTH, 1e-3, &["length"]),
    unit("cm", "centimeter", LENGTH, 1e-2, &["length"]),
    unit("km", "kilometer", LENGTH, 1e3, &["length"]),
    unit("μm", "micrometer", LENGTH, 1e-6, &["length"]).aliases(&["micron", "um"]),
    unit("nm", "nanometer", LENGTH, 1e-9, &["length"]),
    unit("in", "inch", LENGTH, INCH, &["length"]).aliases(&["inch", "inches"]),
    unit("ft", "foot", LENGTH, FOOT, &["length"]).aliases(&["foot", "feet"]),
    unit("yd", "yard", LENGTH, 0.9144, &["length"]),
    unit("mi", "mile", LENGTH, MILE, &["length"]).aliases(&["mile", "miles"]),
    unit("league", "league", LENGTH, 3.0 * MILE, &["length"]),
    // area
    unit("acre", "acre", AREA, 4046.8564224, &["area"]),
    // volume
    unit("L", "liter", VOLUME, 1e-3, &["volume"]).aliases(&["liter", "liters"]),
    unit("mL", "milliliter", VOLUME, 1e-6, &["volume"]),
    unit("gal", "gallon", VOLUME, GALLON, &["volume"])
        .aliases(&["gallon", "gallons"])
        .describe("US liquid gallon"),
    unit("qt", "quart", VOLUME, GALLON / 4.0, &["volume"]),
    unit("pt", "pint", VOLUME, GALLON / 8.0, &["volume"]),
    unit("cup", "cup", VOLUME, GALLON / 16.0, &["volume"]).aliases(&["cups"]),
    unit("fl_oz", "fluid ounce", VOLUME, GALLON / 128.0, &["volume"]),
    unit("tbsp", "tablespoon", VOLUME, GALLON / 256.0, &["volume"]),
    unit("tsp", "teaspoon", VOLUME, GALLON / 768.0, &["volume"]),
    // time
    unit("ms", "millisecond", TIME, 1e-3, &["time"]),
    unit("μs", "microsecond", TIME, 1e-6, &["time"]).aliases(&["us"]),
    unit("ns", "nanosecond", TIME, 1e-9, &["time"]),
    unit("min", "minute", TIME, 60.0, &["time"]).aliases(&["minute", "minutes"]),
    unit("hr", "hour", TIME, 3600.0, &["time"]).aliases(&["hour", "hours"]),
    unit("day", "day", TIME, 86400.0, &["time"]).aliases(&["days"]),
    unit("week", "week", TIME, 604800.0, &["time"]).aliases(&["weeks"]),
    // frequency
    unit("Hz", "hertz", FREQUENCY, 1.0, &["frequency"]),
    unit("kHz", "kilohertz", FREQUENCY, 1e3, &["frequency"]),
    unit("MHz", "megahertz", FREQUENCY, 1e6, &["frequency"]),
    unit("GHz", "gigahertz", FREQUENCY, 1e9, &["frequency"]),
    // speed
    unit("mph", "miles per hour", SPEED, MILE / 3600.0, &["speed"]),
    // mass
    unit("g", "gram", MASS, 1e-3, &["mass"]).aliases(&["gram", "grams"]),
    unit("mg", "milligram", MASS, 1e-6, &["mass"]),
    unit("μg", "microgram", MASS, 1e-9, &["mass"]).aliases(&["ug"]),
    unit("lbm", "pound-mass", MASS, POUND_MASS, &["mass"]),
    unit("t", "metric ton", MASS, 1e3, &["mass"]).aliases(&["tonne"]),
    unit("ton", "short ton", MASS, 2000.0 * POUND_MASS, &["mass"]),
    unit("long_ton", "long ton", MASS, 2240.0 * POUND_MASS, &["mass"]),
    unit("carat", "carat", MASS, 2e-4, &["mass"]),
    // angle
    unit("rad", "radian", DIMENSIONLESS, 1.0, &["angle"]).aliases(&["radian", "radians"]),
    unit("deg", "degree", DIMENSIONLESS, PI / 180.0, &["angle"]).aliases(&["degree", "degrees"]),
    unit("rev", "revolution", DIMENSIONLESS, 2.0 * PI, &["angle"]),
    // force
    unit("N", "newton", FORCE, 1.0, &["force"]).aliases(&["newton", "newtons"]),
    unit("kN", "kilonewton", FORCE, 1e3, &["force"]),
    unit("lbf", "pound-force", FORCE, 4.4482216152605, &["force"]),
    // pressure
    unit("Pa", "pascal", PRESSURE, 1.0, &["pressure"]),
    unit("kPa", "kilopascal", PRESSURE, 1e3, &["pressure"]),
    unit("MPa", "megapascal", PRESSURE, 1e6, &["pressure"]),
    unit("GPa", "gigapascal", PRESSURE, 1e9, &["pressure"]),
    unit("bar", "bar", PRESSURE, 1e5, &["pressure"]),
    unit("psi", "pounds per square inch", PRESSURE, 6894.757293168361, &["pressure"]),
    // temperature
    unit("degC", "degree Celsius", TEMPERATURE, 1.0, &["temperature"]).offset(273.15),
    unit("degF", "degree Fahrenheit", TEMPERATURE, FAHRENHEIT, &["temperature"])
        .offset(273.15 - 32.0 * FAHRENHEIT),
    unit("degR", "degree Rankine", TEMPERATURE, FAHRENHEIT, &["temperature"]),
    unit("degC_diff", "Celsius difference", TEMPERATURE, 1.0, &["temperature"])
        .describe("Temperature difference in degrees Celsius"),
    unit("degF_diff", "Fahrenheit difference", TEMPERATURE, FAHRENHEIT, &["temperature"])
        .describe("Temperature difference in degrees Fahrenheit"),
    // energy
    unit("J", "joule", ENERGY, 1.0, &["energy"]).aliases(&["joule", "joules"]),
    unit("mJ", "millijoule", ENERGY, 1e-3, &["energy"]),
    unit("kJ", "kilojoule", ENERGY, 1e3, &["energy"]),
    unit("MJ", "megajoule", ENERGY, 1e6, &["energy"]),
    unit("GJ", "gigajoule", ENERGY, 1e9, &["energy"]),
    // power
    unit("W", "watt", POWER, 1.0, &["power"]).aliases(&["watt", "watts"]),
    unit("mW", "milliwatt", POWER, 1e-3, &["power"]),
    unit("kW", "kilowatt", POWER, 1e3, &["power"]),
    unit("MW", "megawatt", POWER, 1e6, &["power"]),
    unit("GW", "gigawatt", POWER, 1e9, &["power"]),
];

impl UnitRegistry {
    /// A registry preloaded with the built-in SI units
    pub fn si() -> Result<Self> {
        Self::si_with_config(ConverterConfig::default())
    }

    pub fn si_with_config(config: ConverterConfig) -> Result<Self> {
        let system = SiUnitSystem::shared();
        let mut registry = UnitRegistry::with_config(system.clone(), config);
        for row in SI_UNITS {
            add_row(&mut registry, &system, row)?;
        }
        log::debug!("loaded {} SI unit keys", registry.len());
        Ok(registry)
    }
}

fn add_row(registry: &mut UnitRegistry, system: &SystemRef, row: &SiUnit) -> Result<()> {
    let unit = UnitLinear::new(system.clone(), row.dims, row.scale, row.offset)?
        .with_identifier(row.key)
        .with_name(row.name);

    let mut entry = UnitEntry::new(unit).with_tags(row.tags.iter().copied());
    if let Some(description) = row.description {
        entry = entry.with_description(description);
    }

    registry.add_unit(row.key, entry, false)?;
    registry.add_alias(row.key, row.aliases)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_loads() {
        let registry = UnitRegistry::si().unwrap();
        assert!(registry.len() > SI_UNITS.len());
        for key in ["m", "s", "mol", "A", "K", "cd", "kg"] {
            assert!(registry.contains_key(key), "missing base unit {}", key);
        }
    }

    #[test]
    fn test_base_unit_metadata() {
        let registry = UnitRegistry::si().unwrap();
        let kg = registry.get("kg").unwrap();
        assert_eq!(kg.name.as_deref(), Some("kilogram"));
        assert_eq!(kg.description.as_deref(), Some("Unit of measure of mass"));
        assert_eq!(kg.tags, vec!["mass"]);
        assert_eq!(
            registry.get_aliases("kg").unwrap(),
            vec!["kilogram", "kilograms"]
        );
    }

    #[test]
    fn test_keys_are_unique_and_simple() {
        let registry = UnitRegistry::si().unwrap();
        let mut keys: Vec<&str> = registry.keys().collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
        assert!(keys.iter().all(|key| units_core::is_simple_token(key)));
    }
}
