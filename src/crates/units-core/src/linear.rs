use crate::dimension::DimensionVector;
use crate::error::Result;
use crate::measure::Measure;
use crate::system::{SiUnitSystem, SystemRef};
use crate::unit::Unit;
use std::fmt;

/// A unit related to its base units by `base = scale^e * x + offset`
///
/// Most everyday units are linear; `degC` is the common case with a
/// nonzero offset.
#[derive(Debug, Clone)]
pub struct UnitLinear {
    unit: Unit,
    scale: f64,
    offset: f64,
}

impl UnitLinear {
    pub fn new(
        system: SystemRef,
        dimensions: impl Into<DimensionVector>,
        scale: f64,
        offset: f64,
    ) -> Result<Self> {
        let unit = Unit::new(
            system,
            dimensions,
            move |x, e| scale.powf(e) * x + offset,
            move |x, e| (x - offset) / scale.powf(e),
        )?;
        Ok(UnitLinear {
            unit,
            scale,
            offset,
        })
    }

    /// A linear unit in a fresh SI unit system
    pub fn si(dimensions: [f64; 7], scale: f64, offset: f64) -> Result<Self> {
        Self::new(SiUnitSystem::shared(), dimensions, scale, offset)
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.unit = self.unit.with_identifier(identifier);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.unit = self.unit.with_name(name);
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn name(&self) -> Option<&str> {
        self.unit.name()
    }

    pub fn as_unit(&self) -> &Unit {
        &self.unit
    }

    pub fn into_unit(self) -> Unit {
        self.unit
    }
}

impl Measure for UnitLinear {
    fn unit_system(&self) -> &SystemRef {
        self.unit.unit_system()
    }

    fn dimensions(&self) -> &DimensionVector {
        self.unit.dimensions()
    }

    fn identifier(&self) -> Option<&str> {
        self.unit.identifier()
    }

    fn to_base_value(&self, value: f64, exponent: f64) -> f64 {
        self.scale.powf(exponent) * value + self.offset
    }

    fn from_base_value(&self, value: f64, exponent: f64) -> f64 {
        (value - self.offset) / self.scale.powf(exponent)
    }
}

impl From<UnitLinear> for Unit {
    fn from(linear: UnitLinear) -> Unit {
        linear.unit
    }
}

impl fmt::Display for UnitLinear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - scale: {:?} - offset: {:?}",
            self.unit, self.scale, self.offset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::Direction;

    const LENGTH: [f64; 7] = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    const TEMPERATURE: [f64; 7] = [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0];

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "expected {} but got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_display() {
        let mm = UnitLinear::si(LENGTH, 0.001, 0.0)
            .unwrap()
            .with_identifier("mm")
            .with_name("millimeter");
        assert_eq!(
            mm.to_string(),
            "mm - millimeter - [1, 0, 0, 0, 0, 0, 0] - scale: 0.001 - offset: 0.0"
        );
    }

    #[test]
    fn test_exponent_conversion() {
        let mm = UnitLinear::si(LENGTH, 0.001, 0.0).unwrap();
        assert_close(mm.to_base(100.0), 0.1);
        assert_close(mm.from_base_exp(1.0, 2.0), 1e6);
        assert_close(mm.to_base_exp(1e9, 3.0), 1.0);
    }

    #[test]
    fn test_offset_units() {
        let deg_c = UnitLinear::si(TEMPERATURE, 1.0, 273.15)
            .unwrap()
            .with_identifier("degC");
        let deg_f = UnitLinear::si(TEMPERATURE, 5.0 / 9.0, 273.15 - 32.0 * 5.0 / 9.0)
            .unwrap()
            .with_identifier("degF");

        assert_close(deg_c.to_base(0.0), 273.15);
        assert_close(deg_c.convert(100.0, Direction::To, &deg_f).unwrap(), 212.0);
        assert_close(deg_c.convert(212.0, Direction::From, &deg_f).unwrap(), 100.0);
    }

    #[test]
    fn test_collection_values() {
        let mm = UnitLinear::si(LENGTH, 0.001, 0.0).unwrap();
        let m = UnitLinear::si(LENGTH, 1.0, 0.0).unwrap();

        let converted = mm.convert(vec![1.0, 1000.0], Direction::To, &m).unwrap();
        assert_close(converted[0], 0.001);
        assert_close(converted[1], 1.0);

        let arr = m.convert([0.5, 2.0], Direction::To, &mm).unwrap();
        assert_close(arr[0], 500.0);
        assert_close(arr[1], 2000.0);
    }

    #[test]
    fn test_matches_generic_unit() {
        let linear = UnitLinear::si(LENGTH, 0.3048, 0.0).unwrap();
        let unit: Unit = linear.clone().into();
        for x in [-3.0, 0.0, 12.5] {
            assert_close(unit.to_base_exp(x, 2.0), linear.to_base_exp(x, 2.0));
            assert_close(unit.from_base(x), linear.from_base(x));
        }
        assert!(unit.is_convertible(&linear));
    }
}
