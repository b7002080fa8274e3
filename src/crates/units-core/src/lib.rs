//! Core types for working with units of measure
//!
//! This crate provides the foundational types for describing a system of
//! base units and the units derived from it. A unit couples a dimension
//! vector (the exponents relating it to each base unit) with a pair of
//! transforms that move values to and from the base units.
//!
//! # Examples
//!
//! ```
//! use units_core::{Measure, SiUnitSystem, UnitLinear};
//!
//! let system = SiUnitSystem::shared();
//! let mm = UnitLinear::new(system.clone(), [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 0.001, 0.0)
//!     .unwrap()
//!     .with_identifier("mm");
//!
//! assert!((mm.to_base(100.0) - 0.1).abs() < 1e-12);
//! assert!((mm.from_base_exp(1.0, 2.0) - 1e6).abs() < 1e-6);
//! ```
//!
//! # Main Components
//!
//! - **DimensionVector**: exponents relating a unit to the base units
//! - **UnitSystem**: the set of base units a unit belongs to
//! - **Unit**: dimension vector plus to/from-base transforms, with algebra
//! - **UnitLinear**: a unit with a `scale * x + offset` transform
//! - **Measure**: the conversion interface shared by all unit kinds

pub mod convention;
pub mod dimension;
pub mod error;
pub mod linear;
pub mod measure;
pub mod quantity;
pub mod system;
pub mod token;
pub mod unit;

pub use convention::ConstantMathConvention;
pub use dimension::{DimensionVector, DIMENSION_TOLERANCE};
pub use error::{Result, UnitError};
pub use linear::UnitLinear;
pub use measure::{Direction, Measure};
pub use quantity::Quantity;
pub use system::{CustomUnitSystem, SiUnitSystem, SystemRef, UnitSystem, SI_BASE_UNITS};
pub use token::{is_simple_token, RESERVED_CHARS};
pub use unit::{Transform, Unit};
