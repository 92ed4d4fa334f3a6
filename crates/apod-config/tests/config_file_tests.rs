//! Integration tests for assumption files.

use std::io::Write;

use apod_config::prelude::*;
use apod_core::batch::{evaluate_batch, BatchConfig, SourceRow};
use apod_core::types::{Assumptions, PropertyRecord};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const SAMPLE: &str = r#"
[defaults]
monthly_rent_per_unit = 1450
vacancy_rate = 0.06

[[overrides]]
address = "9 Pine Rd"
assumptions = { units = 4 }

[[overrides]]
row = 3
reason = "seller financing"
assumptions = { down_payment_pct = 0.25, interest_rate_annual = 0.05 }
"#;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(SAMPLE);
    let set = AssumptionSet::from_file(file.path()).unwrap();

    assert_eq!(set.defaults.monthly_rent_per_unit, dec!(1450));
    assert_eq!(set.defaults.vacancy_rate, dec!(0.06));
    assert_eq!(set.overrides.len(), 2);
    assert_eq!(set.overrides[1].reason.as_deref(), Some("seller financing"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = AssumptionSet::from_file("/nonexistent/apod.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_set_drives_batch() {
    let set = AssumptionSet::from_toml_str(SAMPLE).unwrap();
    let rows: Vec<SourceRow> = vec![
        PropertyRecord::new("1 Oak Rd", dec!(300000)).into(),
        PropertyRecord::new("9 Pine Rd", dec!(410000)).into(),
        PropertyRecord::new("3 Birch Ln", dec!(275000)).into(),
    ];

    let report = evaluate_batch(&rows, &set, &BatchConfig::sequential());
    let evaluated: Vec<_> = report.successes().collect();
    assert_eq!(evaluated.len(), 3);

    assert_eq!(evaluated[0].assumptions.units, 2);
    assert_eq!(evaluated[1].assumptions.units, 4);
    assert_eq!(evaluated[2].assumptions.down_payment_pct, dec!(0.25));
    assert_eq!(evaluated[2].assumptions.interest_rate_annual, dec!(0.05));
    assert!(evaluated
        .iter()
        .all(|e| e.assumptions.monthly_rent_per_unit == dec!(1450)));
}

#[test]
fn test_toml_output_loads_back() {
    let set = AssumptionSet::new(Assumptions::default().with_units(3)).with_override(
        AssumptionOverride::for_address(
            "9 Pine Rd",
            AssumptionPatch {
                monthly_rent_per_unit: Some(dec!(1600)),
                ..AssumptionPatch::default()
            },
        ),
    );

    let text = set.to_toml_string().unwrap();
    let loaded = AssumptionSet::from_toml_str(&text).unwrap();
    assert_eq!(loaded.defaults.units, 3);
    assert_eq!(
        loaded.overrides[0].assumptions.monthly_rent_per_unit,
        Some(dec!(1600))
    );
}

#[test]
fn test_override_pushing_value_out_of_range() {
    let err = AssumptionSet::from_toml_str(
        r#"
        [[overrides]]
        address = "9 Pine Rd"
        assumptions = { vacancy_rate = 0.5 }
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("overrides[1].vacancy_rate"));
}

proptest! {
    #[test]
    fn prop_in_range_values_validate(
        rent in 500i64..=5000,
        units in 1u32..=20,
        vacancy_bps in 0i64..=1500,
        down_pct in 0i64..=100,
        interest_bps in 0i64..=1500,
    ) {
        let a = Assumptions::default()
            .with_monthly_rent_per_unit(Decimal::from(rent))
            .with_units(units)
            .with_vacancy_rate(Decimal::new(vacancy_bps, 4))
            .with_down_payment_pct(Decimal::new(down_pct, 2))
            .with_interest_rate_annual(Decimal::new(interest_bps, 4));
        prop_assert!(a.is_valid());
    }
}
