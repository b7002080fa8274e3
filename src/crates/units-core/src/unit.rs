use crate::convention::ConstantMathConvention;
use crate::dimension::DimensionVector;
use crate::error::{Result, UnitError};
use crate::measure::Measure;
use crate::system::SystemRef;
use crate::token::is_simple_token;
use std::fmt;
use std::ops::{Div, Mul};
use std::sync::Arc;

/// A transform `(value, exponent) -> value` between a unit and its base units
pub type Transform = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// A unit of measure
///
/// Couples a dimension vector with a pair of transforms converting values
/// to and from the base units of the unit system. The `exponent` argument of
/// a transform is the power the unit is raised to, so `km` with exponent 2
/// converts square kilometers to square meters.
///
/// Units are immutable; multiplication, division and exponentiation build
/// new units whose transforms close over the operands' transforms.
#[derive(Clone)]
pub struct Unit {
    system: SystemRef,
    dimensions: DimensionVector,
    to_base_fn: Transform,
    from_base_fn: Transform,
    identifier: Option<String>,
    name: Option<String>,
}

impl Unit {
    /// Create a unit from a pair of transforms
    ///
    /// `from_base` must invert `to_base` for every exponent. Fails with
    /// [`UnitError::DimensionMismatch`] when `dimensions` does not have one
    /// exponent per base unit of `system`.
    pub fn new<F, G>(
        system: SystemRef,
        dimensions: impl Into<DimensionVector>,
        to_base: F,
        from_base: G,
    ) -> Result<Self>
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
        G: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self::from_transforms(system, dimensions, Arc::new(to_base), Arc::new(from_base))
    }

    pub fn from_transforms(
        system: SystemRef,
        dimensions: impl Into<DimensionVector>,
        to_base: Transform,
        from_base: Transform,
    ) -> Result<Self> {
        let dimensions = dimensions.into();
        if dimensions.len() != system.num_base_units() {
            return Err(UnitError::DimensionMismatch {
                expected: system.num_base_units(),
                found: dimensions.len(),
            });
        }

        Ok(Unit {
            system,
            dimensions,
            to_base_fn: to_base,
            from_base_fn: from_base,
            identifier: None,
            name: None,
        })
    }

    /// The dimensionless identity unit of a system
    pub fn dimensionless(system: SystemRef) -> Self {
        let dimensions = DimensionVector::zeros(system.num_base_units());
        Unit {
            system,
            dimensions,
            to_base_fn: Arc::new(|x, _| x),
            from_base_fn: Arc::new(|x, _| x),
            identifier: None,
            name: None,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn to_base_transform(&self) -> &Transform {
        &self.to_base_fn
    }

    pub fn from_base_transform(&self) -> &Transform {
        &self.from_base_fn
    }

    fn check_same_system(&self, other: &Unit, operation: &str) -> Result<()> {
        if self.system.kind() != other.system.kind()
            || self.system.num_base_units() != other.system.num_base_units()
        {
            return Err(UnitError::invalid_math(format!(
                "cannot {} units from different unit systems ({} and {})",
                operation,
                self.label(),
                other.label()
            )));
        }
        Ok(())
    }

    /// Product of two units
    pub fn try_mul(&self, other: &Unit) -> Result<Unit> {
        self.check_same_system(other, "multiply")?;

        let (a_to, b_to) = (self.to_base_fn.clone(), other.to_base_fn.clone());
        let (a_from, b_from) = (self.from_base_fn.clone(), other.from_base_fn.clone());

        Ok(Unit {
            system: self.system.clone(),
            dimensions: &self.dimensions + &other.dimensions,
            to_base_fn: Arc::new(move |x, e| a_to(b_to(x, e), e)),
            from_base_fn: Arc::new(move |x, e| b_from(a_from(x, e), e)),
            identifier: join(self.identifier(), other.identifier(), |a, b| {
                format!("{}*{}", a, b)
            }),
            name: join(self.name(), other.name(), |a, b| format!("{}*{}", a, b)),
        })
    }

    /// Quotient of two units, equivalent to `self * other^-1`
    pub fn try_div(&self, other: &Unit) -> Result<Unit> {
        self.check_same_system(other, "divide")?;

        let (a_to, b_to) = (self.to_base_fn.clone(), other.to_base_fn.clone());
        let (a_from, b_from) = (self.from_base_fn.clone(), other.from_base_fn.clone());

        Ok(Unit {
            system: self.system.clone(),
            dimensions: &self.dimensions - &other.dimensions,
            to_base_fn: Arc::new(move |x, e| a_to(b_to(x, -e), e)),
            from_base_fn: Arc::new(move |x, e| b_from(a_from(x, e), -e)),
            identifier: join(self.identifier(), other.identifier(), |a, b| {
                format!("{}/{}", a, group(b))
            }),
            name: join(self.name(), other.name(), |a, b| format!("{}/{}", a, group(b))),
        })
    }

    /// The unit raised to the power `power`
    pub fn powf(&self, power: f64) -> Unit {
        let to = self.to_base_fn.clone();
        let from = self.from_base_fn.clone();

        let exponent = if power < 0.0 {
            format!("({:?})", power)
        } else {
            format!("{:?}", power)
        };

        Unit {
            system: self.system.clone(),
            dimensions: &self.dimensions * power,
            to_base_fn: Arc::new(move |x, e| to(x, e * power)),
            from_base_fn: Arc::new(move |x, e| from(x, e * power)),
            identifier: self
                .identifier()
                .map(|id| format!("{}^{}", group(id), exponent)),
            name: self.name().map(|name| format!("{}^{}", group(name), exponent)),
        }
    }

    /// A dimensionless unit standing for the numeric constant `value`
    ///
    /// Fails when `convention` is disabled or `value` is not finite.
    pub fn constant(
        system: SystemRef,
        value: f64,
        convention: ConstantMathConvention,
    ) -> Result<Unit> {
        if !value.is_finite() {
            return Err(UnitError::invalid_math(format!(
                "constant {} is not finite",
                value
            )));
        }

        let dimensions = DimensionVector::zeros(system.num_base_units());
        let unit = match convention {
            ConstantMathConvention::Disabled => {
                return Err(UnitError::invalid_math(
                    "math between units and constants is disabled",
                ))
            }
            ConstantMathConvention::UnitBased => Unit::new(
                system,
                dimensions,
                move |x, e| value.powf(e) * x,
                move |x, e| x / value.powf(e),
            )?,
            ConstantMathConvention::QuantityBased => Unit::new(
                system,
                dimensions,
                move |x, e| x / value.powf(e),
                move |x, e| value.powf(e) * x,
            )?,
        };

        let label = format!("{:?}", value);
        Ok(unit.with_identifier(label.clone()).with_name(label))
    }

    /// `self * value`, with `value` interpreted per `convention`
    ///
    /// The constant scales the result of this unit's transform, so for a
    /// unit-based constant `to_base(x, e) = value^e * self.to_base(x, e)`.
    pub fn mul_constant(&self, value: f64, convention: ConstantMathConvention) -> Result<Unit> {
        let constant = Unit::constant(self.system.clone(), value, convention)?;
        let scaled = constant.try_mul(self)?;
        Ok(scaled.relabel(self, &constant, '*'))
    }

    /// `self / value`, with `value` interpreted per `convention`
    pub fn div_constant(&self, value: f64, convention: ConstantMathConvention) -> Result<Unit> {
        let constant = Unit::constant(self.system.clone(), value, convention)?;
        let scaled = constant.powf(-1.0).try_mul(self)?;
        Ok(scaled.relabel(self, &constant, '/'))
    }

    /// Labels of `unit` followed by `operator` and the constant's labels
    fn relabel(mut self, unit: &Unit, constant: &Unit, operator: char) -> Unit {
        let combine = |a: &str, b: &str| format!("{}{}{}", a, operator, b);
        self.identifier = join(unit.identifier(), constant.identifier(), combine);
        self.name = join(unit.name(), constant.name(), combine);
        self
    }

    /// `value / self`, with `value` interpreted per `convention`
    pub fn constant_div(&self, value: f64, convention: ConstantMathConvention) -> Result<Unit> {
        let constant = Unit::constant(self.system.clone(), value, convention)?;
        constant.try_div(self)
    }
}

fn join(
    lhs: Option<&str>,
    rhs: Option<&str>,
    combine: impl Fn(&str, &str) -> String,
) -> Option<String> {
    match (lhs, rhs) {
        (Some(a), Some(b)) => Some(combine(a, b)),
        _ => None,
    }
}

/// Parenthesize a compound label so it binds as a single operand
fn group(label: &str) -> String {
    if is_simple_token(label) || label.parse::<f64>().is_ok() {
        label.to_string()
    } else {
        format!("({})", label)
    }
}

impl Measure for Unit {
    fn unit_system(&self) -> &SystemRef {
        &self.system
    }

    fn dimensions(&self) -> &DimensionVector {
        &self.dimensions
    }

    fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    fn to_base_value(&self, value: f64, exponent: f64) -> f64 {
        (self.to_base_fn)(value, exponent)
    }

    fn from_base_value(&self, value: f64, exponent: f64) -> f64 {
        (self.from_base_fn)(value, exponent)
    }
}

impl Mul for &Unit {
    type Output = Result<Unit>;

    fn mul(self, other: &Unit) -> Result<Unit> {
        self.try_mul(other)
    }
}

impl Div for &Unit {
    type Output = Result<Unit>;

    fn div(self, other: &Unit) -> Result<Unit> {
        self.try_div(other)
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("system", &self.system)
            .field("dimensions", &self.dimensions)
            .field("identifier", &self.identifier)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(identifier) = &self.identifier {
            write!(f, "{} - ", identifier)?;
        }
        if let Some(name) = &self.name {
            write!(f, "{} - ", name)?;
        }
        write!(f, "{}", self.dimensions)
    }
}
