//! Error types for the sharded Bloom filter

use thiserror::Error;

/// Errors surfaced by the filter engine
#[derive(Debug, Error)]
pub enum FilterError {
    /// Construction-time misconfiguration. No filter is created.
    #[error("Invalid filter configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// A single bit get/set call against the backing store failed.
    #[error("Bit store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// Reasons a [`FilterConfig`](crate::FilterConfig) is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("capacity must be greater than zero")]
    ZeroCapacity,

    #[error("error rate {rate} must be strictly between 0 and 1")]
    InvalidErrorRate { rate: f64 },

    #[error("key prefix cannot be empty")]
    EmptyKeyPrefix,

    #[error("shard width of {bits} bits is outside 1..=2^32")]
    InvalidShardWidth { bits: u64 },

    #[error("capacity {capacity} needs more filter bits than fit in 64 bits")]
    CapacityTooLarge { capacity: u64 },

    #[error("{required} hash functions required but only {available} seeds are available")]
    InsufficientSeeds { required: usize, available: usize },

    #[error("malformed configuration document: {0}")]
    Parse(String),
}

/// Errors from bit store adapters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Backend error: {0}")]
    Backend(String),
}

impl FilterError {
    /// True when the error came from the store rather than the configuration.
    ///
    /// Store failures are transient from the filter's point of view; retrying
    /// an `add` is always safe.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FilterError::StoreUnavailable(_))
    }
}
