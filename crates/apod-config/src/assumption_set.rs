//! Assumption sets loaded from TOML.
//!
//! ```toml
//! [defaults]
//! monthly_rent_per_unit = 1450
//! vacancy_rate = 0.06
//!
//! [[overrides]]
//! address = "123 Main St"
//! assumptions = { units = 4 }
//!
//! [[overrides]]
//! row = 3
//! reason = "seller financing"
//! assumptions = { down_payment_pct = 0.1, interest_rate_annual = 0.05 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use apod_core::batch::AssumptionsProvider;
use apod_core::types::{Assumptions, PropertyRecord};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::override_system::{AssumptionOverride, AssumptionPatch};

/// Default assumptions plus scoped overrides.
///
/// Resolving a row starts from `defaults` and applies every matching
/// override in declaration order, so later overrides win per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssumptionSet {
    /// Assumptions for rows no override touches.
    #[serde(default)]
    pub defaults: Assumptions,

    /// Scoped overrides, applied in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<AssumptionOverride>,
}

impl AssumptionSet {
    /// Creates a set with the given defaults and no overrides.
    pub fn new(defaults: Assumptions) -> Self {
        Self {
            defaults,
            overrides: Vec::new(),
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let set: Self = toml::from_str(content)?;
        set.check()?;
        Ok(set)
    }

    /// Reads, parses, and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let set = Self::from_toml_str(&content)?;
        log::info!(
            "loaded assumptions from {} ({} overrides)",
            path.display(),
            set.overrides.len()
        );
        Ok(set)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builder method to append an override.
    pub fn with_override(mut self, override_item: AssumptionOverride) -> Self {
        self.overrides.push(override_item);
        self
    }

    /// Applies a patch to the defaults. Overrides keep precedence.
    pub fn patch_defaults(&mut self, patch: &AssumptionPatch) {
        patch.apply_to(&mut self.defaults);
    }

    /// Resolves the assumptions for one row.
    pub fn resolve(&self, row_index: usize, record: &PropertyRecord) -> Assumptions {
        let mut resolved = self.defaults.clone();
        for override_item in &self.overrides {
            if override_item.applies_to(row_index, record) {
                override_item.assumptions.apply_to(&mut resolved);
            }
        }
        resolved
    }

    /// Validates and converts the first structural problem into an error.
    fn check(&self) -> ConfigResult<()> {
        for (i, override_item) in self.overrides.iter().enumerate() {
            if let Some(err) = override_item.validate().into_iter().next() {
                return Err(ConfigError::InvalidOverride {
                    index: i + 1,
                    reason: err.to_string(),
                });
            }
        }
        self.validate_or_error()
    }
}

impl Validate for AssumptionSet {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors: Vec<_> = self
            .defaults
            .validate()
            .into_iter()
            .map(|e| prefixed("defaults", e))
            .collect();

        for (i, override_item) in self.overrides.iter().enumerate() {
            let prefix = format!("overrides[{}]", i + 1);
            errors.extend(
                override_item
                    .validate()
                    .into_iter()
                    .map(|e| prefixed(&prefix, e)),
            );
            errors.extend(
                override_item
                    .assumptions
                    .applied(&self.defaults)
                    .validate()
                    .into_iter()
                    .map(|e| prefixed(&prefix, e)),
            );
        }

        errors
    }
}

fn prefixed(prefix: &str, err: ValidationError) -> ValidationError {
    ValidationError {
        field: format!("{prefix}.{}", err.field),
        ..err
    }
}

impl AssumptionsProvider for AssumptionSet {
    fn assumptions_for(&self, row_index: usize, record: &PropertyRecord) -> Assumptions {
        self.resolve(row_index, record)
    }
}
