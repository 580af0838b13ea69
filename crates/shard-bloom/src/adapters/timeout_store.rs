//! Per-call deadline for any bit store
//!
//! A call that does not finish in time fails with [`StoreError::Timeout`].
//! The deadline applies to each bit call on its own; calls that already
//! completed are unaffected.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;

use crate::error::StoreError;
use crate::ports::BitStore;

/// Default deadline for a single bit call
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Wraps a [`BitStore`] and bounds every call with a timeout
pub struct TimeoutBitStore<S> {
    inner: S,
    call_timeout: Duration,
}

impl<S: BitStore> TimeoutBitStore<S> {
    pub fn new(inner: S) -> Self {
        Self::with_timeout(inner, DEFAULT_CALL_TIMEOUT)
    }

    pub fn with_timeout(inner: S, call_timeout: Duration) -> Self {
        Self {
            inner,
            call_timeout,
        }
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: BitStore> BitStore for TimeoutBitStore<S> {
    async fn set_bit(&self, key: &str, offset: u32, value: bool) -> Result<(), StoreError> {
        timeout(self.call_timeout, self.inner.set_bit(key, offset, value))
            .await
            .map_err(|_| {
                warn!(key = key, offset = offset, "SETBIT timed out");
                StoreError::Timeout
            })?
    }

    async fn get_bit(&self, key: &str, offset: u32) -> Result<bool, StoreError> {
        timeout(self.call_timeout, self.inner.get_bit(key, offset))
            .await
            .map_err(|_| {
                warn!(key = key, offset = offset, "GETBIT timed out");
                StoreError::Timeout
            })?
    }
}
