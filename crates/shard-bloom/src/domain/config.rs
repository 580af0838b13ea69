//! Filter configuration and validation
//!
//! # Example
//!
//! ```
//! use shard_bloom::FilterConfigBuilder;
//!
//! let config = FilterConfigBuilder::new()
//!     .key_prefix("visited_urls")
//!     .capacity(10_000_000)
//!     .error_rate(0.0001)
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.capacity, 10_000_000);
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, FilterError};

/// Default per-shard address space: 2^32 bits, the largest value a single
/// Redis string can address.
pub const DEFAULT_SHARD_BIT_WIDTH: u64 = 1 << 32;

/// Upper bound for the shard width. Offsets travel as `u32`.
pub const MAX_SHARD_BIT_WIDTH: u64 = 1 << 32;

pub const DEFAULT_KEY_PREFIX: &str = "bloomfilter";
pub const DEFAULT_CAPACITY: u64 = 100_000_000;
pub const DEFAULT_ERROR_RATE: f64 = 0.0000001;

/// Sharded Bloom filter configuration
///
/// Every client sharing one logical filter must use an identical
/// configuration. Changing `capacity` or `error_rate` changes `m`, `k` and
/// the shard count, which invalidates every bit already written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Namespace for shard keys (`{key_prefix}_{shard_index}`)
    pub key_prefix: String,
    /// Expected number of inserted elements
    pub capacity: u64,
    /// Target false positive probability, strictly between 0 and 1
    pub error_rate: f64,
    /// Bits addressable inside one shard
    #[serde(default = "default_shard_bit_width")]
    pub shard_bit_width: u64,
}

fn default_shard_bit_width() -> u64 {
    DEFAULT_SHARD_BIT_WIDTH
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            capacity: DEFAULT_CAPACITY,
            error_rate: DEFAULT_ERROR_RATE,
            shard_bit_width: DEFAULT_SHARD_BIT_WIDTH,
        }
    }
}

impl FilterConfig {
    /// Create a new configuration with validation
    pub fn new(
        key_prefix: impl Into<String>,
        capacity: u64,
        error_rate: f64,
    ) -> Result<Self, FilterError> {
        let config = Self {
            key_prefix: key_prefix.into(),
            capacity,
            error_rate,
            shard_bit_width: DEFAULT_SHARD_BIT_WIDTH,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// The seed-pool bound on `k` is checked later, when parameters are
    /// derived, since it depends on `m`.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity.into());
        }

        // NaN fails both comparisons
        if !(self.error_rate > 0.0 && self.error_rate < 1.0) {
            return Err(ConfigError::InvalidErrorRate {
                rate: self.error_rate,
            }
            .into());
        }

        if self.key_prefix.is_empty() {
            return Err(ConfigError::EmptyKeyPrefix.into());
        }

        if self.shard_bit_width == 0 || self.shard_bit_width > MAX_SHARD_BIT_WIDTH {
            return Err(ConfigError::InvalidShardWidth {
                bits: self.shard_bit_width,
            }
            .into());
        }

        Ok(())
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BLOOM_KEY_PREFIX`: shard key namespace (default: bloomfilter)
    /// - `BLOOM_CAPACITY`: expected element count (default: 100000000)
    /// - `BLOOM_ERROR_RATE`: target false positive rate (default: 0.0000001)
    /// - `BLOOM_SHARD_BITS`: bits per shard (default: 4294967296)
    ///
    /// Missing or unparsable values fall back to the defaults. The result is
    /// validated.
    pub fn from_env() -> Result<Self, FilterError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    pub(crate) fn from_vars<F>(lookup: F) -> Result<Self, FilterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            key_prefix: lookup("BLOOM_KEY_PREFIX")
                .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),

            capacity: lookup("BLOOM_CAPACITY")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_CAPACITY),

            error_rate: lookup("BLOOM_ERROR_RATE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_ERROR_RATE),

            shard_bit_width: lookup("BLOOM_SHARD_BITS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_SHARD_BIT_WIDTH),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self, FilterError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Builder for FilterConfig with validation
///
/// ```
/// use shard_bloom::FilterConfigBuilder;
///
/// let config = FilterConfigBuilder::new()
///     .key_prefix("sessions")
///     .capacity(1_000)
///     .error_rate(0.01)
///     .shard_bit_width(1 << 20)
///     .build()
///     .unwrap();
/// assert_eq!(config.shard_bit_width, 1 << 20);
/// ```
#[derive(Default)]
pub struct FilterConfigBuilder {
    key_prefix: Option<String>,
    capacity: Option<u64>,
    error_rate: Option<f64>,
    shard_bit_width: Option<u64>,
}

impl FilterConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shard key namespace
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Set the expected number of elements
    pub fn capacity(mut self, capacity: u64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set the target false positive rate
    pub fn error_rate(mut self, rate: f64) -> Self {
        self.error_rate = Some(rate);
        self
    }

    /// Set the per-shard bit width (at most 2^32)
    pub fn shard_bit_width(mut self, bits: u64) -> Self {
        self.shard_bit_width = Some(bits);
        self
    }

    /// Build the FilterConfig, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let defaults = FilterConfig::default();

        let config = FilterConfig {
            key_prefix: self.key_prefix.unwrap_or(defaults.key_prefix),
            capacity: self.capacity.unwrap_or(defaults.capacity),
            error_rate: self.error_rate.unwrap_or(defaults.error_rate),
            shard_bit_width: self.shard_bit_width.unwrap_or(defaults.shard_bit_width),
        };

        config.validate()?;
        Ok(config)
    }
}
