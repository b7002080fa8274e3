//! Parser for compound unit strings
//!
//! This crate reduces strings such as `kg*m/s^2` or
//! `kg / (m^(1/2+3.14) / s^(5-7))^3` to a map from fully-simplified unit
//! tokens to the exponents they are raised to.
//!
//! # Examples
//!
//! ```
//! use units_parser::{parse_unit, UnitParser};
//!
//! let terms = parse_unit("kg*(m/s)^2").unwrap();
//! assert_eq!(terms["kg"], 1.0);
//! assert_eq!(terms["m"], 2.0);
//! assert_eq!(terms["s"], -2.0);
//!
//! // Tighter iteration limit
//! let parser = UnitParser::new().with_max_iterations(2);
//! assert!(parser.parse("((a/b)^2/c)^3/d").is_err());
//! ```
//!
//! # Unit Syntax
//!
//! - Multiplication: `kg*m`
//! - Division: `m/s`
//! - Exponents: `m^2`, `m**2`, `s^-1`, `m^(1/2)`
//! - Grouping: `(m/s)^2`
//!
//! Tokens containing none of `0-9 . * / ^ ( )` are fully simplified.
//! Whitespace is ignored.
//!
//! # Main Components
//!
//! - [`parse_unit`] / [`UnitParser`]: unit string to [`UnitTerms`]
//! - [`Brackets`]: bracket matching and bracket-aware search
//! - [`evaluate`]: arithmetic evaluator used for exponents

pub mod brackets;
pub mod error;
pub mod expr;
pub mod lexer;
pub mod parser;
pub mod span;


pub use brackets::{BracketError, Brackets, SearchDirection};
pub use error::{ExponentFault, ExprError, ParseError, Result};
pub use expr::{evaluate, MAX_NESTING_DEPTH};
pub use lexer::{Lexer, Token};
pub use parser::{parse_unit, UnitParser, UnitTerms, DEFAULT_MAX_ITERATIONS};
pub use span::Span;
