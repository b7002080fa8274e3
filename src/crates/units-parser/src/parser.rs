use crate::brackets::{BracketError, Brackets};
use crate::error::{ExponentFault, ParseError, Result};
use crate::expr::evaluate;
use std::collections::BTreeMap;
use units_core::is_simple_token;

/// Fully-simplified unit tokens mapped to their exponents
pub type UnitTerms = BTreeMap<String, f64>;

/// Default number of simplification passes before giving up
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Characters an exponent may contain before it is evaluated
const EXPONENT_CHARS: &str = "0123456789.*/^()e+-";

/// Parse a unit string with the default iteration limit
///
/// ```
/// let terms = units_parser::parse_unit("kg*m/s^2").unwrap();
/// assert_eq!(terms["kg"], 1.0);
/// assert_eq!(terms["m"], 1.0);
/// assert_eq!(terms["s"], -2.0);
/// ```
pub fn parse_unit(unit: &str) -> Result<UnitTerms> {
    UnitParser::default().parse(unit)
}

/// Reduces compound unit strings to fully-simplified tokens and exponents
///
/// Parentheses are evaluated first, then exponents, then multiplication
/// and division. Exponents may be arithmetic expressions such as
/// `m^(1/2+3.14)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitParser {
    max_iterations: usize,
}

impl Default for UnitParser {
    fn default() -> Self {
        UnitParser {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl UnitParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn parse(&self, unit: &str) -> Result<UnitTerms> {
        let brackets = Brackets::PAREN;
        if !brackets.contains_all_matched(unit) {
            return Err(ParseError::MalformedBrackets {
                unit: unit.to_string(),
            });
        }

        let normalized: String = unit
            .replace("**", "^")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let mut pass = Pass {
            unit,
            brackets,
            terms: UnitTerms::new(),
            pending: Vec::new(),
        };
        if !normalized.is_empty() {
            pass.push(&normalized, 1.0);
        }

        let mut iterations = 0;
        while !pass.pending.is_empty() {
            if iterations == self.max_iterations {
                return Err(ParseError::MaxIterations {
                    unit: unit.to_string(),
                    limit: self.max_iterations,
                });
            }
            log::trace!(
                "pass {} over {} pending token(s) of {:?}",
                iterations,
                pass.pending.len(),
                unit
            );
            pass.run()?;
            iterations += 1;
        }

        let mut terms = pass.terms;
        terms.retain(|_, exponent| *exponent != 0.0);
        log::debug!(
            "parsed {:?} into {} term(s) after {} pass(es)",
            unit,
            terms.len(),
            iterations
        );
        Ok(terms)
    }
}

/// State of one parse: simplified terms plus tokens still to process
struct Pass<'u> {
    unit: &'u str,
    brackets: Brackets,
    terms: UnitTerms,
    pending: Vec<(String, f64)>,
}

impl<'u> Pass<'u> {
    /// Queue a token, accumulating it straight into the result when it is
    /// already fully simplified
    fn push(&mut self, token: &str, exponent: f64) {
        let token = self.brackets.strip_matched(token, None);
        if is_simple_token(token) {
            if !token.is_empty() {
                *self.terms.entry(token.to_string()).or_insert(0.0) += exponent;
            }
        } else {
            self.pending.push((token.to_string(), exponent));
        }
    }

    fn run(&mut self) -> Result<()> {
        for (token, exponent) in std::mem::take(&mut self.pending) {
            if self.split_products(&token, exponent)?
                || self.split_quotients(&token, exponent)?
                || self.split_power(&token, exponent)?
            {
                continue;
            }
            self.pending.push((token, exponent));
        }
        Ok(())
    }

    /// Split at every top-level `*`, left to right
    fn split_products(&mut self, token: &str, exponent: f64) -> Result<bool> {
        let mut rest = token;
        let mut split = false;

        while let Some(i) = self.find(rest, '*')? {
            if i == 0 {
                return Err(ParseError::leading('*', rest, self.unit));
            }
            if i == rest.len() - 1 {
                return Err(ParseError::trailing('*', rest, self.unit));
            }
            self.push(&rest[..i], exponent);
            rest = self.brackets.strip_matched(&rest[i + 1..], None);
            split = true;
        }

        if split {
            self.push(rest, exponent);
        }
        Ok(split)
    }

    /// Split at every top-level `/`, right to left
    fn split_quotients(&mut self, token: &str, exponent: f64) -> Result<bool> {
        let mut rest = token;
        let mut split = false;

        while let Some(i) = self.rfind(rest, '/')? {
            if i == rest.len() - 1 {
                return Err(ParseError::trailing('/', rest, self.unit));
            }
            if i == 0 {
                return Err(ParseError::leading('/', rest, self.unit));
            }
            self.push(&rest[i + 1..], -exponent);
            rest = self.brackets.strip_matched(&rest[..i], None);
            split = true;
        }

        if split {
            self.push(rest, exponent);
        }
        Ok(split)
    }

    /// Split at the last top-level `^` into base and exponent
    fn split_power(&mut self, token: &str, exponent: f64) -> Result<bool> {
        let Some(i) = self.rfind(token, '^')? else {
            return Ok(false);
        };
        if i == 0 {
            return Err(ParseError::leading('^', token, self.unit));
        }
        if i == token.len() - 1 {
            return Err(ParseError::trailing('^', token, self.unit));
        }

        let (base, power) = (&token[..i], &token[i + 1..]);
        let value = self.evaluate_exponent(power)?;

        let stripped = self.brackets.strip_matched(base, None);
        if !(is_simple_token(base) || stripped != base) {
            return Err(ParseError::InvalidBase {
                base: base.to_string(),
                unit: self.unit.to_string(),
            });
        }

        self.push(stripped, exponent * value);
        Ok(true)
    }

    fn evaluate_exponent(&self, power: &str) -> Result<f64> {
        let stripped = self.brackets.strip_matched(power, None);
        let fail = |fault| ParseError::invalid_exponent(power, self.unit, fault);

        if let Some(c) = stripped.chars().find(|c| !EXPONENT_CHARS.contains(*c)) {
            return Err(fail(ExponentFault::RestrictedCharacter(c)));
        }

        let value = evaluate(stripped).map_err(|e| fail(ExponentFault::Evaluation(e)))?;
        if !value.is_finite() {
            return Err(fail(ExponentFault::NonFinite(value)));
        }
        Ok(value)
    }

    fn find(&self, s: &str, operator: char) -> Result<Option<usize>> {
        self.brackets
            .find_top_level(s, operator)
            .map_err(|e| self.bracket_error(e))
    }

    fn rfind(&self, s: &str, operator: char) -> Result<Option<usize>> {
        self.brackets
            .rfind_top_level(s, operator)
            .map_err(|e| self.bracket_error(e))
    }

    // Brackets were validated for the whole string, so every substring
    // handed to the matcher is balanced as well.
    fn bracket_error(&self, err: BracketError) -> ParseError {
        log::warn!("bracket search failed in {:?}: {}", self.unit, err);
        ParseError::MalformedBrackets {
            unit: self.unit.to_string(),
        }
    }
}
