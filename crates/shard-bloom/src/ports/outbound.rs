//! Outbound Ports (Driven Ports)
//!
//! The filter needs exactly two operations from its backing store, modeled on
//! Redis `SETBIT` and `GETBIT`.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::StoreError;

/// Bit-addressable key-value store (Driven Port)
///
/// Implementations must honor these semantics:
/// - `set_bit` creates the key when absent and zero-fills any bits between
///   the current end of the value and `offset`.
/// - `get_bit` reads an absent key, or an offset past the end of the value,
///   as `false`.
///
/// Every call either completes or fails on its own. The filter never retries.
#[async_trait]
pub trait BitStore: Send + Sync {
    /// Set the bit at `offset` inside the value stored at `key`
    async fn set_bit(&self, key: &str, offset: u32, value: bool) -> Result<(), StoreError>;

    /// Read the bit at `offset` inside the value stored at `key`
    async fn get_bit(&self, key: &str, offset: u32) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S: BitStore + ?Sized> BitStore for Arc<S> {
    async fn set_bit(&self, key: &str, offset: u32, value: bool) -> Result<(), StoreError> {
        (**self).set_bit(key, offset, value).await
    }

    async fn get_bit(&self, key: &str, offset: u32) -> Result<bool, StoreError> {
        (**self).get_bit(key, offset).await
    }
}
