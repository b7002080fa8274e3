use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a bare numeric constant behaves in unit algebra
///
/// Under `UnitBased`, `mm * 1000` means "a unit 1000 times larger than mm",
/// so `to_base(x) = 1000 * scale * x`. Under `QuantityBased` the constant
/// multiplies the quantity instead, so the unit's base value shrinks by the
/// same factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstantMathConvention {
    #[default]
    Disabled,
    UnitBased,
    QuantityBased,
}

impl ConstantMathConvention {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, ConstantMathConvention::Disabled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConstantMathConvention::Disabled => "disabled",
            ConstantMathConvention::UnitBased => "unit_based",
            ConstantMathConvention::QuantityBased => "quantity_based",
        }
    }
}

impl fmt::Display for ConstantMathConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstantMathConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "disabled" | "none" => Ok(ConstantMathConvention::Disabled),
            "unit_based" | "unit" => Ok(ConstantMathConvention::UnitBased),
            "quantity_based" | "quantity" => Ok(ConstantMathConvention::QuantityBased),
            _ => Err(format!("unknown constant math convention: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(
            "unit-based".parse::<ConstantMathConvention>(),
            Ok(ConstantMathConvention::UnitBased)
        );
        assert_eq!(
            "quantity_based".parse::<ConstantMathConvention>(),
            Ok(ConstantMathConvention::QuantityBased)
        );
        assert!("sideways".parse::<ConstantMathConvention>().is_err());
    }

    #[test]
    fn test_default_is_disabled() {
        assert!(!ConstantMathConvention::default().is_enabled());
    }
}
