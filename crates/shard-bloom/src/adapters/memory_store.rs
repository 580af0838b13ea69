//! In-memory bit store
//!
//! Mirrors Redis string-bit semantics: bit 0 is the most significant bit of
//! byte 0, values grow in whole bytes, and reads past the end return 0.
//! Storage is paged so that a shard addressed up to 2^32 only allocates the
//! pages it actually touches.

use async_trait::async_trait;
use bitvec::prelude::*;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::ports::BitStore;

const PAGE_BYTES: usize = 512;
const PAGE_BITS: u64 = (PAGE_BYTES * 8) as u64;

type Page = BitArray<[u8; PAGE_BYTES], Msb0>;

#[derive(Default)]
struct StoredValue {
    pages: BTreeMap<u64, Page>,
    /// Logical length in bytes (Redis STRLEN)
    len_bytes: u64,
}

impl StoredValue {
    fn set(&mut self, offset: u64, value: bool) {
        self.len_bytes = self.len_bytes.max(offset / 8 + 1);

        let index = offset / PAGE_BITS;
        let bit = (offset % PAGE_BITS) as usize;
        if value {
            self.pages.entry(index).or_insert(Page::ZERO).set(bit, true);
        } else if let Some(page) = self.pages.get_mut(&index) {
            page.set(bit, false);
        }
    }

    fn get(&self, offset: u64) -> bool {
        let index = offset / PAGE_BITS;
        let bit = (offset % PAGE_BITS) as usize;
        self.pages.get(&index).map(|page| page[bit]).unwrap_or(false)
    }

    fn count_ones(&self) -> u64 {
        self.pages.values().map(|page| page.count_ones() as u64).sum()
    }

    fn byte(&self, index: u64) -> u8 {
        let page_index = index * 8 / PAGE_BITS;
        let byte_in_page = (index % PAGE_BYTES as u64) as usize;
        self.pages
            .get(&page_index)
            .map(|page| page.as_raw_slice()[byte_in_page])
            .unwrap_or(0)
    }
}

/// In-process [`BitStore`] keyed by shard key
///
/// Suitable for tests and for single-process use. It never fails.
#[derive(Default)]
pub struct InMemoryBitStore {
    values: RwLock<HashMap<String, StoredValue>>,
}

impl InMemoryBitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of set bits under `key` (Redis BITCOUNT)
    pub async fn count_ones(&self, key: &str) -> u64 {
        let values = self.values.read().await;
        values.get(key).map(StoredValue::count_ones).unwrap_or(0)
    }

    /// Length in bytes of the value under `key` (Redis STRLEN)
    pub async fn len_bytes(&self, key: &str) -> u64 {
        let values = self.values.read().await;
        values.get(key).map(|v| v.len_bytes).unwrap_or(0)
    }

    /// Bytes `start..end` of the value under `key`, clamped to its length
    /// (Redis GETRANGE with an exclusive end)
    pub async fn get_range(&self, key: &str, start: u64, end: u64) -> Vec<u8> {
        let values = self.values.read().await;
        match values.get(key) {
            Some(value) => {
                let end = end.min(value.len_bytes);
                (start..end).map(|i| value.byte(i)).collect()
            }
            None => Vec::new(),
        }
    }

    /// Keys currently present, sorted
    pub async fn keys(&self) -> Vec<String> {
        let values = self.values.read().await;
        let mut keys: Vec<String> = values.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Total set bits across all keys
    pub async fn total_ones(&self) -> u64 {
        let values = self.values.read().await;
        values.values().map(StoredValue::count_ones).sum()
    }

    /// Drop every key
    pub async fn clear(&self) {
        self.values.write().await.clear();
    }
}

#[async_trait]
impl BitStore for InMemoryBitStore {
    async fn set_bit(&self, key: &str, offset: u32, value: bool) -> Result<(), StoreError> {
        let mut values = self.values.write().await;
        values
            .entry(key.to_string())
            .or_default()
            .set(u64::from(offset), value);
        Ok(())
    }

    async fn get_bit(&self, key: &str, offset: u32) -> Result<bool, StoreError> {
        let values = self.values.read().await;
        Ok(values
            .get(key)
            .map(|v| v.get(u64::from(offset)))
            .unwrap_or(false))
    }
}
