//! Optimal Bloom filter parameter calculation
//!
//! Formulas:
//! - m = ceil(n * log2(e) * log2(1/fpr))   -- optimal bits
//! - k = ceil(ln(2) * m / n)               -- optimal hash functions
//! - shards = ceil(m / shard_bit_width)    -- computed in bits throughout

use std::f64::consts::{LN_2, LOG2_E};

use serde::{Deserialize, Serialize};

use super::config::FilterConfig;
use super::hash_functions::SEED_POOL;
use crate::error::{ConfigError, FilterError};

/// Parameters derived once from a [`FilterConfig`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Total number of bits in the logical filter (m)
    pub size_bits: u64,
    /// Number of hash functions (k)
    pub hash_count: usize,
    /// Bits addressable inside one shard
    pub shard_bit_width: u64,
    /// Number of shards backing the filter
    pub shard_count: u64,
}

impl FilterParams {
    /// Derive `m`, `k` and the shard count for a configuration
    ///
    /// Fails with `InvalidConfig` when the configuration itself is invalid or
    /// when `k` exceeds the seed pool.
    pub fn derive(config: &FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;

        let size_bits = optimal_bits(config.capacity, config.error_rate)?;
        let hash_count = optimal_hash_count(size_bits, config.capacity);

        if hash_count > SEED_POOL.len() {
            return Err(ConfigError::InsufficientSeeds {
                required: hash_count,
                available: SEED_POOL.len(),
            }
            .into());
        }

        Ok(Self {
            size_bits,
            hash_count,
            shard_bit_width: config.shard_bit_width,
            shard_count: shard_count_for(size_bits, config.shard_bit_width),
        })
    }

    /// Expected false positive rate after `n` insertions
    pub fn expected_fpr(&self, n: u64) -> f64 {
        calculate_fpr(self.size_bits, n, self.hash_count)
    }

    /// Store memory the shards may occupy once fully written, in bytes
    pub fn allocated_bytes(&self) -> u64 {
        self.shard_count.saturating_mul(self.shard_bit_width / 8)
    }
}

/// Minimum bit count for `capacity` elements at `error_rate`
///
/// Never below `capacity`: for loose error rates (above ~0.62) the raw
/// formula drops under one bit per element. Fails when the bit count does
/// not fit in a `u64`.
pub fn optimal_bits(capacity: u64, error_rate: f64) -> Result<u64, ConfigError> {
    let m = (capacity as f64 * LOG2_E * (1.0 / error_rate).log2()).ceil();
    // `u64::MAX as f64` rounds up to 2^64, so `<` rejects every value a cast would clamp
    if !m.is_finite() || m >= u64::MAX as f64 {
        return Err(ConfigError::CapacityTooLarge { capacity });
    }
    Ok((m as u64).max(capacity))
}

/// Hash count minimizing false positives for `m` bits and `capacity` elements
pub fn optimal_hash_count(size_bits: u64, capacity: u64) -> usize {
    if capacity == 0 {
        return 1;
    }
    let k = (LN_2 * size_bits as f64 / capacity as f64).ceil() as usize;
    k.max(1)
}

/// Number of `shard_bit_width`-bit shards needed to hold `size_bits`
pub fn shard_count_for(size_bits: u64, shard_bit_width: u64) -> u64 {
    if shard_bit_width == 0 {
        return 0;
    }
    size_bits.div_ceil(shard_bit_width).max(1)
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: u64, n: u64, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
