//! Income, expense, and financing assumptions.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Parameters applied to a listing when computing its metrics.
///
/// All rates are fractions (0.05 = 5%). Every field has a default, so a
/// partially specified configuration file deserializes cleanly.
///
/// # Example
///
/// ```rust
/// use apod_core::types::Assumptions;
/// use rust_decimal_macros::dec;
///
/// let assumptions = Assumptions::default()
///     .with_monthly_rent_per_unit(dec!(1450))
///     .with_units(4);
/// assert_eq!(assumptions.vacancy_rate, dec!(0.05));
/// assert_eq!(assumptions.loan_term_years, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Assumptions {
    /// Monthly rent collected per unit.
    #[serde(default = "default_monthly_rent_per_unit")]
    pub monthly_rent_per_unit: Decimal,

    /// Number of rentable units.
    #[serde(default = "default_units")]
    pub units: u32,

    /// Fraction of gross income lost to vacancy.
    #[serde(default = "default_vacancy_rate")]
    pub vacancy_rate: Decimal,

    /// Annual insurance as a fraction of list price.
    #[serde(default = "default_insurance_rate")]
    pub insurance_rate: Decimal,

    /// Monthly maintenance reserve per unit.
    #[serde(default = "default_maintenance_per_unit_monthly")]
    pub maintenance_per_unit_monthly: Decimal,

    /// Property management fee as a fraction of effective income.
    #[serde(default = "default_property_management_rate")]
    pub property_management_rate: Decimal,

    /// Down payment as a fraction of list price.
    #[serde(default = "default_down_payment_pct")]
    pub down_payment_pct: Decimal,

    /// Annual mortgage interest rate.
    #[serde(default = "default_interest_rate_annual")]
    pub interest_rate_annual: Decimal,

    /// Mortgage term in years.
    #[serde(default = "default_loan_term_years")]
    pub loan_term_years: u32,
}

fn default_monthly_rent_per_unit() -> Decimal {
    dec!(1300)
}

fn default_units() -> u32 {
    2
}

fn default_vacancy_rate() -> Decimal {
    dec!(0.05)
}

fn default_insurance_rate() -> Decimal {
    dec!(0.004)
}

fn default_maintenance_per_unit_monthly() -> Decimal {
    dec!(100)
}

fn default_property_management_rate() -> Decimal {
    dec!(0.08)
}

fn default_down_payment_pct() -> Decimal {
    dec!(0.20)
}

fn default_interest_rate_annual() -> Decimal {
    dec!(0.07)
}

fn default_loan_term_years() -> u32 {
    30
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            monthly_rent_per_unit: default_monthly_rent_per_unit(),
            units: default_units(),
            vacancy_rate: default_vacancy_rate(),
            insurance_rate: default_insurance_rate(),
            maintenance_per_unit_monthly: default_maintenance_per_unit_monthly(),
            property_management_rate: default_property_management_rate(),
            down_payment_pct: default_down_payment_pct(),
            interest_rate_annual: default_interest_rate_annual(),
            loan_term_years: default_loan_term_years(),
        }
    }
}

impl Assumptions {
    /// Creates the standard assumption set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the monthly rent per unit.
    #[must_use]
    pub fn with_monthly_rent_per_unit(mut self, rent: Decimal) -> Self {
        self.monthly_rent_per_unit = rent;
        self
    }

    /// Sets the unit count.
    #[must_use]
    pub fn with_units(mut self, units: u32) -> Self {
        self.units = units;
        self
    }

    /// Sets the vacancy rate.
    #[must_use]
    pub fn with_vacancy_rate(mut self, rate: Decimal) -> Self {
        self.vacancy_rate = rate;
        self
    }

    /// Sets the insurance rate.
    #[must_use]
    pub fn with_insurance_rate(mut self, rate: Decimal) -> Self {
        self.insurance_rate = rate;
        self
    }

    /// Sets the monthly maintenance reserve per unit.
    #[must_use]
    pub fn with_maintenance_per_unit_monthly(mut self, amount: Decimal) -> Self {
        self.maintenance_per_unit_monthly = amount;
        self
    }

    /// Sets the property management rate.
    #[must_use]
    pub fn with_property_management_rate(mut self, rate: Decimal) -> Self {
        self.property_management_rate = rate;
        self
    }

    /// Sets the down payment fraction.
    #[must_use]
    pub fn with_down_payment_pct(mut self, pct: Decimal) -> Self {
        self.down_payment_pct = pct;
        self
    }

    /// Sets the annual interest rate.
    #[must_use]
    pub fn with_interest_rate_annual(mut self, rate: Decimal) -> Self {
        self.interest_rate_annual = rate;
        self
    }

    /// Sets the loan term in years.
    #[must_use]
    pub fn with_loan_term_years(mut self, years: u32) -> Self {
        self.loan_term_years = years;
        self
    }
}
