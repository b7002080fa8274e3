use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Absolute tolerance used when comparing dimension vectors
///
/// Exponents produced by the unit parser pass through floating-point
/// arithmetic, so vectors are compared elementwise within this bound
/// rather than for exact equality.
pub const DIMENSION_TOLERANCE: f64 = 1e-16;

/// Exponents relating a unit to each base unit of its unit system
///
/// The vector is never mutated in place; the arithmetic operators
/// produce new vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionVector(Vec<f64>);

impl DimensionVector {
    pub fn new(exponents: Vec<f64>) -> Self {
        DimensionVector(exponents)
    }

    /// A dimensionless vector for a system with `len` base units
    pub fn zeros(len: usize) -> Self {
        DimensionVector(vec![0.0; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(|e| *e == 0.0)
    }

    /// Elementwise equality within an absolute tolerance
    ///
    /// Vectors of different lengths are never equal.
    pub fn approx_eq(&self, other: &DimensionVector, tolerance: f64) -> bool {
        self.len() == other.len()
            && self
                .0
                .iter()
                .zip(&other.0)
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    fn zip_with(&self, other: &DimensionVector, op: impl Fn(f64, f64) -> f64) -> DimensionVector {
        debug_assert_eq!(self.len(), other.len(), "dimension vectors differ in length");
        DimensionVector(self.0.iter().zip(&other.0).map(|(a, b)| op(*a, *b)).collect())
    }
}

impl From<Vec<f64>> for DimensionVector {
    fn from(exponents: Vec<f64>) -> Self {
        DimensionVector(exponents)
    }
}

impl From<&[f64]> for DimensionVector {
    fn from(exponents: &[f64]) -> Self {
        DimensionVector(exponents.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for DimensionVector {
    fn from(exponents: [f64; N]) -> Self {
        DimensionVector(exponents.to_vec())
    }
}

impl Add for &DimensionVector {
    type Output = DimensionVector;

    fn add(self, other: &DimensionVector) -> DimensionVector {
        self.zip_with(other, |a, b| a + b)
    }
}

impl Sub for &DimensionVector {
    type Output = DimensionVector;

    fn sub(self, other: &DimensionVector) -> DimensionVector {
        self.zip_with(other, |a, b| a - b)
    }
}

impl Mul<f64> for &DimensionVector {
    type Output = DimensionVector;

    fn mul(self, factor: f64) -> DimensionVector {
        DimensionVector(self.0.iter().map(|e| e * factor).collect())
    }
}

impl Neg for &DimensionVector {
    type Output = DimensionVector;

    fn neg(self) -> DimensionVector {
        self * -1.0
    }
}

impl fmt::Display for DimensionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, exponent) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", exponent)?;
        }
        write!(f, "]")
    }
}
