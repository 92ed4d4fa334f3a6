//! Batch evaluation settings and conditional parallel mapping.

use serde::{Deserialize, Serialize};

/// Controls how a batch is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Enable parallel evaluation (requires the `parallel` feature).
    pub parallel: bool,

    /// Minimum row count to evaluate in parallel.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 500,
        }
    }
}

impl BatchConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always evaluates sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the threshold for parallel evaluation.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if a batch of `len` rows should run in parallel.
    #[must_use]
    pub fn should_parallelize(&self, len: usize) -> bool {
        self.parallel && len > self.parallel_threshold
    }
}

/// Maps `f` over `items` with their indices, in parallel when the
/// `parallel` feature is enabled and `config` allows it. Output order
/// always matches input order.
#[allow(unused_variables)]
pub(crate) fn maybe_parallel_map<T, U, F>(items: &[T], config: &BatchConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(usize, &T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items
                .par_iter()
                .enumerate()
                .map(|(index, item)| f(index, item))
                .collect();
        }
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| f(index, item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parallelize() {
        let config = BatchConfig::default().with_threshold(10);
        assert!(!config.should_parallelize(10));
        assert!(config.should_parallelize(11));
        assert!(!BatchConfig::sequential().should_parallelize(10_000));
    }

    #[test]
    fn test_map_preserves_order() {
        let items: Vec<u32> = (0..1000).collect();
        let config = BatchConfig::default().with_threshold(0);
        let out = maybe_parallel_map(&items, &config, |i, v| (i, v * 2));
        for (i, (index, doubled)) in out.iter().enumerate() {
            assert_eq!(*index, i);
            assert_eq!(*doubled, items[i] * 2);
        }
    }
}
