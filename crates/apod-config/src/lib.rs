//! APOD Configuration Layer
//!
//! Supplies the assumptions the calculator runs with. Defaults come from
//! [`apod_core::Assumptions`]; a TOML file can change them globally and
//! override them per row or per address.
//!
//! # Features
//!
//! - **Validation**: Allowed ranges for rent, units, vacancy, down payment,
//!   and interest, checked through the [`Validate`] trait
//! - **Override System**: Scoped patches applied in declaration order
//! - **Assumptions Provider**: [`AssumptionSet`] plugs straight into
//!   [`apod_core::batch::evaluate_batch`]
//!
//! # Example
//!
//! ```rust
//! use apod_config::{AssumptionSet, Validate};
//! use apod_core::batch::AssumptionsProvider;
//! use apod_core::types::PropertyRecord;
//! use rust_decimal_macros::dec;
//!
//! let set = AssumptionSet::from_toml_str(r#"
//!     [defaults]
//!     monthly_rent_per_unit = 1450
//!
//!     [[overrides]]
//!     address = "9 Pine Rd"
//!     assumptions = { units = 4 }
//! "#).unwrap();
//!
//! let pine = PropertyRecord::new("9 Pine Rd", dec!(410000));
//! let resolved = set.assumptions_for(0, &pine);
//! assert_eq!(resolved.units, 4);
//! assert_eq!(resolved.monthly_rent_per_unit, dec!(1450));
//! assert!(set.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod assumption_set;
mod error;
mod override_system;
mod validation;

pub use assumption_set::AssumptionSet;
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use override_system::{AssumptionOverride, AssumptionPatch, OverrideScope};
pub use validation::limits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::assumption_set::AssumptionSet;
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::override_system::{AssumptionOverride, AssumptionPatch, OverrideScope};
}
