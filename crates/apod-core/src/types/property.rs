//! Listing record type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ApodError, ApodResult};

/// One row of listing data.
///
/// # Example
///
/// ```rust
/// use apod_core::types::PropertyRecord;
/// use rust_decimal_macros::dec;
///
/// let record = PropertyRecord::new("12 Elm St", dec!(300000))
///     .with_property_tax(dec!(3600));
/// assert_eq!(record.property_tax, dec!(3600));
/// assert!(record.photo_url.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Street address as it appears in the listing.
    pub address: String,
    /// Asking price. Must be positive to evaluate.
    pub list_price: Decimal,
    /// Annual property tax. Zero when the listing has none.
    #[serde(default)]
    pub property_tax: Decimal,
    /// Listing photo, if the export carries one.
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl PropertyRecord {
    /// Creates a record with no property tax and no photo.
    #[must_use]
    pub fn new(address: impl Into<String>, list_price: Decimal) -> Self {
        Self {
            address: address.into(),
            list_price,
            property_tax: Decimal::ZERO,
            photo_url: None,
        }
    }

    /// Sets the annual property tax.
    #[must_use]
    pub fn with_property_tax(mut self, property_tax: Decimal) -> Self {
        self.property_tax = property_tax;
        self
    }

    /// Sets the annual property tax, treating a missing value as zero.
    #[must_use]
    pub fn with_optional_tax(mut self, property_tax: Option<Decimal>) -> Self {
        self.property_tax = property_tax.unwrap_or(Decimal::ZERO);
        self
    }

    /// Sets the photo URL.
    #[must_use]
    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    /// Checks the fields the calculator divides by or sums.
    ///
    /// # Errors
    ///
    /// Returns `InvalidListPrice` for a non-positive price and
    /// `InvalidPropertyTax` for a negative tax.
    pub fn validate(&self) -> ApodResult<()> {
        if self.list_price <= Decimal::ZERO {
            return Err(ApodError::invalid_list_price(self.list_price));
        }
        if self.property_tax < Decimal::ZERO {
            return Err(ApodError::InvalidPropertyTax {
                value: self.property_tax,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_positive_price() {
        let record = PropertyRecord::new("1 Main St", dec!(250000));
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_and_negative_price() {
        let zero = PropertyRecord::new("1 Main St", Decimal::ZERO);
        assert!(matches!(
            zero.validate(),
            Err(ApodError::InvalidListPrice { .. })
        ));

        let negative = PropertyRecord::new("1 Main St", dec!(-5));
        assert!(matches!(
            negative.validate(),
            Err(ApodError::InvalidListPrice { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_tax() {
        let record = PropertyRecord::new("1 Main St", dec!(250000)).with_property_tax(dec!(-1));
        assert_eq!(
            record.validate(),
            Err(ApodError::InvalidPropertyTax { value: dec!(-1) })
        );
    }

    #[test]
    fn test_missing_tax_is_zero() {
        let record = PropertyRecord::new("1 Main St", dec!(250000)).with_optional_tax(None);
        assert_eq!(record.property_tax, Decimal::ZERO);
    }
}
