use proptest::prelude::*;
use std::f64::consts::PI;
use std::sync::OnceLock;
use units_converter::{ConverterConfig, RegistryError, SearchOptions, UnitRegistry};
use units_core::{ConstantMathConvention, Measure, UnitError};

fn assert_close(actual: f64, expected: f64, context: &str) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "{}: got {}, expected {}",
        context,
        actual,
        expected
    );
}

#[test]
fn test_si_conversion_table() {
    let registry = UnitRegistry::si().unwrap();
    let cases: &[(f64, &str, &str, f64)] = &[
        (1.0, "m", "m", 1.0),
        (1.0, "mm", "m", 0.001),
        (1.0, "m", "cm", 100.0),
        (1.0, "m", "km", 0.001),
        (1.0, "in", "cm", 2.54),
        (1.0, "ft", "in", 12.0),
        (1.0, "mi", "ft", 5280.0),
        (1.0, "yd", "ft", 3.0),
        (20000.0, "league", "m", 96560640.0),
        (1.0, "m", "micron", 1e6),
        (4.5, "cm", "μm", 4.5e4),
        (1.0, "acre", "ft^2", 43560.0),
        (10.0, "L", "m^3", 0.01),
        (1000.0, "mL", "L", 1.0),
        (1.0, "gal", "L", 3.785411784),
        (1.0, "gal", "qt", 4.0),
        (1.0, "gal", "pt", 8.0),
        (1.0, "gal", "cup", 16.0),
        (1.0, "gal", "fl_oz", 128.0),
        (1.0, "cup", "tbsp", 16.0),
        (1.0, "tbsp", "tsp", 3.0),
        (1.0, "s", "ms", 1000.0),
        (1.0, "s", "μs", 1e6),
        (7e9, "ns", "s", 7.0),
        (1.0, "min", "s", 60.0),
        (1.0, "hr", "min", 60.0),
        (1.0, "week", "day", 7.0),
        (7.0, "Hz", "s^-1", 7.0),
        (7.0, "kHz", "Hz", 7000.0),
        (7.0, "MHz", "Hz", 7e6),
        (7.0, "GHz", "Hz", 7e9),
        (1.0, "mi/hr", "mph", 1.0),
        (24.0, "hr", "day", 1.0),
        (60.0, "mi/hr", "ft/s", 88.0),
        (20.0, "kg*m/s^2", "N", 20.0),
        (1.0, "kN", "N", 1000.0),
        (1e3, "g", "kg", 1.0),
        (1e6, "mg", "kg", 1.0),
        (1e9, "μg", "kg", 1.0),
        (1.0, "lbm", "g", 453.59237),
        (1.0, "t", "kg", 1000.0),
        (1.0, "ton", "lbm", 2000.0),
        (1.0, "long_ton", "lbm", 2240.0),
        (200.0, "mg", "carat", 1.0),
        (PI / 6.0, "rad", "deg", 30.0),
        (1080.0, "deg", "rev", 3.0),
        (1.0, "lbf", "N", 4.4482216152605),
        (1.0, "Pa", "N/m^2", 1.0),
        (1.0, "kPa", "Pa", 1000.0),
        (1.0, "MPa", "Pa", 1e6),
        (1.0, "GPa", "Pa", 1e9),
        (1.0, "bar", "Pa", 100000.0),
        (1.0, "psi", "Pa", 6894.757293168361),
        (273.15, "K", "degC", 0.0),
        (303.15, "K", "degC", 30.0),
        (32.0, "degF", "degC", 0.0),
        (-40.0, "degF", "degC", -40.0),
        (212.0, "degF", "degC", 100.0),
        (0.0, "degR", "K", 0.0),
        (25.0, "degF", "degR", 484.67),
        (25.0, "degC_diff", "K", 25.0),
        (25.0, "degF_diff", "degR", 25.0),
        (7.0, "kg*m^2/s^2", "J", 7.0),
        (7.0, "mJ", "J", 0.007),
        (7.0, "kJ", "J", 7000.0),
        (7.0, "MJ", "J", 7e6),
        (7.0, "GJ", "J", 7e9),
        (7.0, "kg*m^2/s^3", "W", 7.0),
        (7.0, "J/s", "W", 7.0),
        (7.0, "mW", "W", 0.007),
        (7.0, "kW", "W", 7000.0),
        (7.0, "MW", "W", 7e6),
        (7.0, "GW", "W", 7e9),
    ];

    for (quantity, from, to, expected) in cases {
        let context = format!("{} {} -> {}", quantity, from, to);
        let actual = registry
            .convert(*quantity, from, to)
            .unwrap_or_else(|e| panic!("{}: {}", context, e));
        assert_close(actual, *expected, &context);
    }
}

#[test]
fn test_convert_list() {
    let registry = UnitRegistry::si().unwrap();
    let result = registry.convert(vec![1.0, 1000.0], "mm", "m").unwrap();
    assert_close(result[0], 0.001, "1 mm");
    assert_close(result[1], 1.0, "1000 mm");

    let result = registry.convert([0.0, 100.0], "degC", "degF").unwrap();
    assert_close(result[0], 32.0, "0 degC");
    assert_close(result[1], 212.0, "100 degC");
}

#[test]
fn test_incompatible_and_unknown_units() {
    let registry = UnitRegistry::si().unwrap();

    assert!(!registry.is_convertible("kg", "N").unwrap());
    assert!(matches!(
        registry.convert(1.0, "kg", "N"),
        Err(RegistryError::Unit(UnitError::IncompatibleUnits { .. }))
    ));
    assert!(matches!(
        registry.convert(1.0, "furlong", "m"),
        Err(RegistryError::UnitNotFound(key)) if key == "furlong"
    ));
    assert!(matches!(
        registry.convert(1.0, "m/(s", "m"),
        Err(RegistryError::Parse(_))
    ));
}

#[test]
fn test_compound_units_resolve_through_aliases() {
    let registry = UnitRegistry::si().unwrap();
    let speed = registry.str_to_unit("meters/second").unwrap();
    let mph = registry.str_to_unit("mph").unwrap();

    assert!(speed.is_convertible(&mph));
    assert_close(mph.to_base(1.0), 0.44704, "mph to m/s");
    assert_eq!(speed.identifier(), Some("meters/second"));
}

#[test]
fn test_search_si_units() {
    let registry = UnitRegistry::si().unwrap();
    let options = SearchOptions::default()
        .with_tags(["pressure"])
        .hide_aliases(true);
    let keys: Vec<&str> = registry
        .search("*pa", &options)
        .unwrap()
        .iter()
        .map(|hit| hit.key)
        .collect();
    assert_eq!(keys, vec!["Pa", "kPa", "MPa", "GPa"]);
}

#[test]
fn test_configured_registry() {
    let config = ConverterConfig::from_json_str(
        r#"{"constant_math": "unit_based", "max_iterations": 3}"#,
    )
    .unwrap();
    let registry = UnitRegistry::si_with_config(config).unwrap();

    let kilometer = registry.mul_constant("m", 1000.0).unwrap();
    assert_close(kilometer.to_base(2.0), 2000.0, "1000 m");

    assert!(matches!(
        registry.convert(1.0, "((kg*m/s^2)/(m^2/s))^2", "N"),
        Err(RegistryError::Parse(_))
    ));
    assert_eq!(registry.config().constant_math, ConstantMathConvention::UnitBased);
}

fn shared_si() -> &'static UnitRegistry {
    static REGISTRY: OnceLock<UnitRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| UnitRegistry::si().unwrap())
}

const COMPATIBLE_GROUPS: &[&[&str]] = &[
    &["m", "mm", "km", "μm", "in", "ft", "mi", "meters"],
    &["K", "degC", "degF", "degR"],
    &["s", "min", "hr", "day", "ns"],
    &["kg", "g", "lbm", "ton", "carat"],
    &["Pa", "kPa", "psi", "bar", "N/m^2"],
    &["J", "kJ", "kg*m^2/s^2", "N*m"],
    &["L", "gal", "m^3", "tsp", "ft^3"],
    &["mph", "mi/hr", "m/s", "km/hr"],
];

fn compatible_pair() -> impl Strategy<Value = (&'static str, &'static str)> {
    proptest::sample::select(COMPATIBLE_GROUPS).prop_flat_map(|group| {
        (
            proptest::sample::select(group),
            proptest::sample::select(group),
        )
    })
}

proptest! {
    #[test]
    fn prop_conversion_round_trips((from, to) in compatible_pair(), value in -1e6f64..1e6) {
        let registry = shared_si();
        let there = registry.convert(value, from, to).unwrap();
        let back = registry.convert(there, to, from).unwrap();
        prop_assert!(
            (back - value).abs() <= 1e-9 * value.abs().max(1.0),
            "{} {} -> {} -> {}",
            value,
            from,
            to,
            back
        );
    }

    #[test]
    fn prop_convertibility_is_symmetric((from, to) in compatible_pair()) {
        let registry = shared_si();
        prop_assert!(registry.is_convertible(from, to).unwrap());
        prop_assert!(registry.is_convertible(to, from).unwrap());
    }
}
