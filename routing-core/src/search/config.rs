//! Search configuration.

/// Configuration parameters for one search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of rounds (transit boardings) to consider.
    pub max_rounds: u32,

    /// Capacity of the per-search transfer-rule memo cache.
    pub transfer_cache_capacity: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_rounds: 8,
            transfer_cache_capacity: 1000,
        }
    }
}
