//! Assumption providers.

use crate::types::{Assumptions, PropertyRecord};

/// Supplies the assumptions to use for one row of a batch.
///
/// The calculator never reads configuration or UI state itself; whatever
/// decides per-row parameters implements this trait.
pub trait AssumptionsProvider {
    /// Returns the assumptions for the row at `row_index` (zero-based).
    fn assumptions_for(&self, row_index: usize, record: &PropertyRecord) -> Assumptions;
}

/// A single assumption set applies to every row.
impl AssumptionsProvider for Assumptions {
    fn assumptions_for(&self, _row_index: usize, _record: &PropertyRecord) -> Assumptions {
        self.clone()
    }
}

impl<F> AssumptionsProvider for F
where
    F: Fn(usize, &PropertyRecord) -> Assumptions,
{
    fn assumptions_for(&self, row_index: usize, record: &PropertyRecord) -> Assumptions {
        self(row_index, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_uniform_provider() {
        let base = Assumptions::default().with_units(3);
        let record = PropertyRecord::new("1 A St", dec!(100000));
        assert_eq!(base.assumptions_for(7, &record).units, 3);
    }

    #[test]
    fn test_closure_provider() {
        let provider = |row: usize, _: &PropertyRecord| {
            Assumptions::default().with_units(u32::try_from(row + 1).unwrap_or(1))
        };
        let record = PropertyRecord::new("1 A St", dec!(100000));
        assert_eq!(provider.assumptions_for(4, &record).units, 5);
    }
}
