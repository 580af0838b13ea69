//! Bit offsets inside a shard
//!
//! Each of the `k` hash functions contributes one offset:
//! `|murmur3_32(seed_i, bytes)| mod shard_bit_width`.

use super::hash_functions::{build_hashes, HashFunction};
use crate::error::FilterError;

/// Computes the `k` bit offsets of an element within its shard
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OffsetCalculator {
    hashes: Vec<HashFunction>,
    shard_bit_width: u64,
}

impl OffsetCalculator {
    /// Build a calculator with the first `k` hash functions
    pub fn new(k: usize, shard_bit_width: u64) -> Result<Self, FilterError> {
        Ok(Self {
            hashes: build_hashes(k)?,
            shard_bit_width: shard_bit_width.max(1),
        })
    }

    pub fn hash_count(&self) -> usize {
        self.hashes.len()
    }

    /// Offsets of `bytes`, one per hash function, in seed order
    ///
    /// Duplicates are kept; setting the same bit twice is harmless.
    pub fn offsets(&self, bytes: &[u8]) -> Vec<u32> {
        self.hashes
            .iter()
            // shard_bit_width <= 2^32, so the reduced value fits in u32
            .map(|h| h.offset(bytes, self.shard_bit_width) as u32)
            .collect()
    }
}
