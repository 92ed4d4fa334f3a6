//! Per-property assumption overrides.
//!
//! An override pairs a scope (all rows, one row, or one address) with a
//! partial set of assumption values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use apod_core::types::{Assumptions, PropertyRecord};

use crate::error::{Validate, ValidationError};

// =============================================================================
// OVERRIDE SCOPE
// =============================================================================

/// Which rows an override applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum OverrideScope {
    /// Every row.
    #[default]
    Global,
    /// The row at this zero-based index.
    Row(usize),
    /// Rows whose address matches, ignoring case and surrounding whitespace.
    Address(String),
}

impl OverrideScope {
    /// Returns true if this scope matches the given row.
    pub fn matches(&self, row_index: usize, record: &PropertyRecord) -> bool {
        match self {
            Self::Global => true,
            Self::Row(index) => *index == row_index,
            Self::Address(address) => address
                .trim()
                .eq_ignore_ascii_case(record.address.trim()),
        }
    }
}

// =============================================================================
// ASSUMPTION PATCH
// =============================================================================

/// A partial [`Assumptions`]: only the fields that are set are applied.
///
/// Field meanings and units match [`Assumptions`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssumptionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rent_per_unit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacancy_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_per_unit_monthly: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_management_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_payment_pct: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate_annual: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_term_years: Option<u32>,
}

impl AssumptionPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes every set field into `target`.
    pub fn apply_to(&self, target: &mut Assumptions) {
        if let Some(v) = self.monthly_rent_per_unit {
            target.monthly_rent_per_unit = v;
        }
        if let Some(v) = self.units {
            target.units = v;
        }
        if let Some(v) = self.vacancy_rate {
            target.vacancy_rate = v;
        }
        if let Some(v) = self.insurance_rate {
            target.insurance_rate = v;
        }
        if let Some(v) = self.maintenance_per_unit_monthly {
            target.maintenance_per_unit_monthly = v;
        }
        if let Some(v) = self.property_management_rate {
            target.property_management_rate = v;
        }
        if let Some(v) = self.down_payment_pct {
            target.down_payment_pct = v;
        }
        if let Some(v) = self.interest_rate_annual {
            target.interest_rate_annual = v;
        }
        if let Some(v) = self.loan_term_years {
            target.loan_term_years = v;
        }
    }

    /// Returns a copy of `base` with this patch applied.
    pub fn applied(&self, base: &Assumptions) -> Assumptions {
        let mut out = base.clone();
        self.apply_to(&mut out);
        out
    }
}

// =============================================================================
// ASSUMPTION OVERRIDE
// =============================================================================

/// A scoped patch as written in a configuration file.
///
/// `row` is one-based to match how rows are numbered for users. Setting
/// neither `row` nor `address` makes the override global.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssumptionOverride {
    /// One-based row number this override targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,

    /// Address this override targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Optional note on why the override exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Values to apply.
    #[serde(default)]
    pub assumptions: AssumptionPatch,
}

impl AssumptionOverride {
    /// Creates a global override.
    pub fn global(patch: AssumptionPatch) -> Self {
        Self {
            assumptions: patch,
            ..Self::default()
        }
    }

    /// Creates an override for one zero-based row index.
    pub fn for_row(row_index: usize, patch: AssumptionPatch) -> Self {
        Self {
            row: Some(row_index + 1),
            assumptions: patch,
            ..Self::default()
        }
    }

    /// Creates an override for one address.
    pub fn for_address(address: impl Into<String>, patch: AssumptionPatch) -> Self {
        Self {
            address: Some(address.into()),
            assumptions: patch,
            ..Self::default()
        }
    }

    /// Builder method to set reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Resolves the scope. `None` if both `row` and `address` are set or
    /// the row number is zero.
    pub fn scope(&self) -> Option<OverrideScope> {
        match (self.row, &self.address) {
            (None, None) => Some(OverrideScope::Global),
            (Some(row), None) if row > 0 => Some(OverrideScope::Row(row - 1)),
            (None, Some(address)) => Some(OverrideScope::Address(address.clone())),
            _ => None,
        }
    }

    /// Returns true if this override applies to the given row.
    pub fn applies_to(&self, row_index: usize, record: &PropertyRecord) -> bool {
        self.scope()
            .is_some_and(|scope| scope.matches(row_index, record))
    }
}

impl Validate for AssumptionOverride {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.row.is_some() && self.address.is_some() {
            errors.push(ValidationError::new(
                "scope",
                "Set either row or address, not both",
            ));
        }

        if self.row == Some(0) {
            errors.push(ValidationError::new("row", "Row numbers start at 1"));
        }

        if self.address.as_deref().is_some_and(|a| a.trim().is_empty()) {
            errors.push(ValidationError::new("address", "Address cannot be empty"));
        }

        if self.assumptions.is_empty() {
            errors.push(ValidationError::new(
                "assumptions",
                "Override does not change any value",
            ));
        }

        errors
    }
}
