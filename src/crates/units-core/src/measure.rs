use crate::dimension::{DimensionVector, DIMENSION_TOLERANCE};
use crate::error::{Result, UnitError};
use crate::quantity::Quantity;
use crate::system::SystemRef;
use std::fmt;
use std::str::FromStr;

/// Direction of a unit-to-unit conversion, relative to the receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Convert a quantity expressed in the receiver into the other unit
    To,
    /// Convert a quantity expressed in the other unit into the receiver
    From,
}

impl FromStr for Direction {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "to" => Ok(Direction::To),
            "from" => Ok(Direction::From),
            other => Err(UnitError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::To => write!(f, "to"),
            Direction::From => write!(f, "from"),
        }
    }
}

/// Conversion interface shared by every kind of unit
pub trait Measure {
    fn unit_system(&self) -> &SystemRef;

    fn dimensions(&self) -> &DimensionVector;

    fn identifier(&self) -> Option<&str>;

    /// Apply the to-base transform to a single value
    fn to_base_value(&self, value: f64, exponent: f64) -> f64;

    /// Apply the from-base transform to a single value
    fn from_base_value(&self, value: f64, exponent: f64) -> f64;

    /// Identifier if set, otherwise the dimension vector
    fn label(&self) -> String {
        match self.identifier() {
            Some(id) => id.to_string(),
            None => self.dimensions().to_string(),
        }
    }

    /// Same unit-system type and dimension vectors within `tolerance`
    fn is_convertible_within<M: Measure + ?Sized>(&self, other: &M, tolerance: f64) -> bool
    where
        Self: Sized,
    {
        self.unit_system().kind() == other.unit_system().kind()
            && self.dimensions().approx_eq(other.dimensions(), tolerance)
    }

    fn is_convertible<M: Measure + ?Sized>(&self, other: &M) -> bool
    where
        Self: Sized,
    {
        self.is_convertible_within(other, DIMENSION_TOLERANCE)
    }

    fn to_base<Q: Quantity>(&self, value: Q) -> Q::Output
    where
        Self: Sized,
    {
        self.to_base_exp(value, 1.0)
    }

    fn to_base_exp<Q: Quantity>(&self, value: Q, exponent: f64) -> Q::Output
    where
        Self: Sized,
    {
        value.map_values(|v| self.to_base_value(v, exponent))
    }

    fn from_base<Q: Quantity>(&self, value: Q) -> Q::Output
    where
        Self: Sized,
    {
        self.from_base_exp(value, 1.0)
    }

    fn from_base_exp<Q: Quantity>(&self, value: Q, exponent: f64) -> Q::Output
    where
        Self: Sized,
    {
        value.map_values(|v| self.from_base_value(v, exponent))
    }

    /// Convert `value` between this unit and `other`
    ///
    /// Fails with [`UnitError::IncompatibleUnits`] unless the two units are
    /// convertible.
    fn convert<Q: Quantity, M: Measure + ?Sized>(
        &self,
        value: Q,
        direction: Direction,
        other: &M,
    ) -> Result<Q::Output>
    where
        Self: Sized,
    {
        if !self.is_convertible(other) {
            return Err(match direction {
                Direction::To => UnitError::incompatible(self.label(), other.label()),
                Direction::From => UnitError::incompatible(other.label(), self.label()),
            });
        }

        Ok(match direction {
            Direction::To => {
                value.map_values(|v| other.from_base_value(self.to_base_value(v, 1.0), 1.0))
            }
            Direction::From => {
                value.map_values(|v| self.from_base_value(other.to_base_value(v, 1.0), 1.0))
            }
        })
    }
}
