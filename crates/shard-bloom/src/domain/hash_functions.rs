//! Seeded hash family
//!
//! Every hash function is MurmurHash3 (x86, 32-bit) parameterized by one seed
//! from a fixed pool. The pool and its order are part of the on-store format:
//! two clients that disagree on either compute different bit offsets for the
//! same element and will not see each other's inserts.

use std::io::Cursor;

use crate::error::{ConfigError, FilterError};

/// Fixed, ordered seed pool. A filter with `k` hash functions uses the first
/// `k` entries.
pub const SEED_POOL: [u32; 100] = [
    543, 460, 171, 876, 796, 607, 650, 81, 837, 545, 591, 946, 846, 521, 913, 636, 878, 735, 414,
    372, 344, 324, 223, 180, 327, 891, 798, 933, 493, 293, 836, 10, 6, 544, 924, 849, 438, 41, 862,
    648, 338, 465, 562, 693, 979, 52, 763, 103, 387, 374, 349, 94, 384, 680, 574, 480, 307, 580,
    71, 535, 300, 53, 481, 519, 644, 219, 686, 236, 424, 326, 244, 212, 909, 202, 951, 56, 812,
    901, 926, 250, 507, 739, 371, 63, 584, 154, 7, 284, 617, 332, 472, 140, 605, 262, 355, 526,
    647, 923, 199, 518,
];

/// Hash `bytes` with 32-bit MurmurHash3 and return the signed reading of the
/// result, the convention most MurmurHash3 bindings follow.
pub fn murmur3_32(bytes: &[u8], seed: u32) -> i32 {
    let mut cursor = Cursor::new(bytes);
    // Reading from an in-memory cursor cannot fail
    let hash = murmur3::murmur3_32(&mut cursor, seed).unwrap_or(0);
    hash as i32
}

/// One member of the hash family
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashFunction {
    seed: u32,
}

impl HashFunction {
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Signed 32-bit hash of `bytes`
    pub fn hash(&self, bytes: &[u8]) -> i32 {
        murmur3_32(bytes, self.seed)
    }

    /// Absolute hash value reduced into `[0, width)`
    ///
    /// `i32::MIN` maps to 2^31 rather than overflowing.
    pub fn offset(&self, bytes: &[u8], width: u64) -> u64 {
        u64::from(self.hash(bytes).unsigned_abs()) % width
    }
}

/// Build the first `k` hash functions of the family
pub fn build_hashes(k: usize) -> Result<Vec<HashFunction>, FilterError> {
    if k > SEED_POOL.len() {
        return Err(ConfigError::InsufficientSeeds {
            required: k,
            available: SEED_POOL.len(),
        }
        .into());
    }

    Ok(SEED_POOL[..k].iter().copied().map(HashFunction::new).collect())
}
