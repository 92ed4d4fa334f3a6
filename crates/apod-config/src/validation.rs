//! Allowed ranges for assumption values.

use apod_core::types::Assumptions;
use rust_decimal::Decimal;

use crate::error::{Validate, ValidationError};

/// Inclusive bounds for each adjustable assumption.
pub mod limits {
    use rust_decimal::Decimal;

    /// Monthly rent per unit.
    pub const RENT: (Decimal, Decimal) = (
        Decimal::from_parts(500, 0, 0, false, 0),
        Decimal::from_parts(5000, 0, 0, false, 0),
    );
    /// Unit count.
    pub const UNITS: (u32, u32) = (1, 20);
    /// Vacancy rate.
    pub const VACANCY: (Decimal, Decimal) = (Decimal::ZERO, Decimal::from_parts(15, 0, 0, false, 2));
    /// Down payment fraction.
    pub const DOWN_PAYMENT: (Decimal, Decimal) = (Decimal::ZERO, Decimal::ONE);
    /// Annual interest rate.
    pub const INTEREST: (Decimal, Decimal) = (Decimal::ZERO, Decimal::from_parts(15, 0, 0, false, 2));
}

fn check_range(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: Decimal,
    (min, max): (Decimal, Decimal),
) {
    if value < min || value > max {
        errors.push(ValidationError::with_rule(
            field,
            format!("{value} is outside {min}..={max}"),
            "range",
        ));
    }
}

fn check_fraction(errors: &mut Vec<ValidationError>, field: &str, value: Decimal) {
    check_range(errors, field, value, (Decimal::ZERO, Decimal::ONE));
}

impl Validate for Assumptions {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        check_range(
            &mut errors,
            "monthly_rent_per_unit",
            self.monthly_rent_per_unit,
            limits::RENT,
        );

        let (min_units, max_units) = limits::UNITS;
        if self.units < min_units || self.units > max_units {
            errors.push(ValidationError::with_rule(
                "units",
                format!("{} is outside {min_units}..={max_units}", self.units),
                "range",
            ));
        }

        check_range(&mut errors, "vacancy_rate", self.vacancy_rate, limits::VACANCY);
        check_fraction(&mut errors, "insurance_rate", self.insurance_rate);

        if self.maintenance_per_unit_monthly < Decimal::ZERO {
            errors.push(ValidationError::with_rule(
                "maintenance_per_unit_monthly",
                "must not be negative",
                "non_negative",
            ));
        }

        check_fraction(
            &mut errors,
            "property_management_rate",
            self.property_management_rate,
        );
        check_range(
            &mut errors,
            "down_payment_pct",
            self.down_payment_pct,
            limits::DOWN_PAYMENT,
        );
        check_range(
            &mut errors,
            "interest_rate_annual",
            self.interest_rate_annual,
            limits::INTEREST,
        );

        if self.loan_term_years == 0 {
            errors.push(ValidationError::with_rule(
                "loan_term_years",
                "must be at least 1",
                "positive",
            ));
        }

        errors
    }
}
