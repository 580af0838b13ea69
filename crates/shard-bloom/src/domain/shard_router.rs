//! Shard selection
//!
//! An element lives in exactly one shard. The shard index is the MD5 digest
//! of the canonical bytes, read as a big-endian 128-bit integer, modulo the
//! shard count. MD5 is only used for its uniform spread here.

use md5::{Digest, Md5};

/// Maps elements to shard keys of the form `{prefix}_{index}`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShardRouter {
    key_prefix: String,
    shard_count: u64,
}

impl ShardRouter {
    /// `shard_count` of zero is treated as one shard.
    pub fn new(key_prefix: impl Into<String>, shard_count: u64) -> Self {
        Self {
            key_prefix: key_prefix.into(),
            shard_count: shard_count.max(1),
        }
    }

    pub fn shard_count(&self) -> u64 {
        self.shard_count
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Index of the shard holding `bytes`, in `[0, shard_count)`
    pub fn shard_index(&self, bytes: &[u8]) -> u64 {
        (digest_u128(bytes) % u128::from(self.shard_count)) as u64
    }

    /// Store key of the shard holding `bytes`
    pub fn shard_key(&self, bytes: &[u8]) -> String {
        self.key_for_index(self.shard_index(bytes))
    }

    pub fn key_for_index(&self, index: u64) -> String {
        format!("{}_{}", self.key_prefix, index)
    }

    /// Every shard key this router can produce
    pub fn all_keys(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.shard_count).map(|i| self.key_for_index(i))
    }
}

fn digest_u128(bytes: &[u8]) -> u128 {
    let digest = Md5::digest(bytes);
    let mut buf = [0u8; 16];
    buf.copy_from_slice(&digest);
    u128::from_be_bytes(buf)
}
