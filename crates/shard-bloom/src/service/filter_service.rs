//! Sharded Bloom Filter Service
//!
//! Composes the shard router and offset calculator and drives the bit store.
//!
//! INVARIANTS:
//! - INVARIANT-1: an element always maps to the same shard key and offsets
//!   for a given configuration, in every process
//! - INVARIANT-2: No false negatives - once `add` succeeded, `contains` is true

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::{Element, FilterConfig, FilterParams, OffsetCalculator, ShardRouter};
use crate::error::{FilterError, StoreError};
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::{BitStore, MembershipFilter};

/// Where an element's bits live in the store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitLocation {
    pub shard_key: String,
    pub offsets: Vec<u32>,
}

/// Bloom filter whose bit array lives in a [`BitStore`]
///
/// Holds only immutable state, so one instance can be shared across tasks
/// behind an `Arc` without locking.
pub struct ShardedBloomFilter<S: BitStore> {
    store: S,
    config: FilterConfig,
    params: FilterParams,
    router: ShardRouter,
    offsets: OffsetCalculator,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<S: BitStore> ShardedBloomFilter<S> {
    /// Create a filter over `store`
    ///
    /// Fails with `InvalidConfig` before touching the store.
    pub fn new(store: S, config: FilterConfig) -> Result<Self, FilterError> {
        Self::with_metrics(store, config, Arc::new(NoOpMetrics))
    }

    /// Create a filter that reports to `metrics`
    pub fn with_metrics(
        store: S,
        config: FilterConfig,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Result<Self, FilterError> {
        let params = FilterParams::derive(&config)?;
        let router = ShardRouter::new(config.key_prefix.clone(), params.shard_count);
        let offsets = OffsetCalculator::new(params.hash_count, params.shard_bit_width)?;

        info!(
            key_prefix = %config.key_prefix,
            capacity = config.capacity,
            error_rate = config.error_rate,
            size_bits = params.size_bits,
            hash_count = params.hash_count,
            shard_count = params.shard_count,
            "Sharded Bloom filter created"
        );
        metrics.record_filter_created(params.size_bits, params.hash_count, params.shard_count);

        Ok(Self {
            store,
            config,
            params,
            router,
            offsets,
            metrics,
        })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Shard key holding `element`
    pub fn shard_key_for<E: Element + ?Sized>(&self, element: &E) -> String {
        self.router.shard_key(&element.canonical_bytes())
    }

    /// Bit offsets of `element` within its shard
    pub fn offsets_for<E: Element + ?Sized>(&self, element: &E) -> Vec<u32> {
        self.offsets.offsets(&element.canonical_bytes())
    }

    /// Shard key and offsets of `element`
    pub fn locate<E: Element + ?Sized>(&self, element: &E) -> BitLocation {
        let bytes = element.canonical_bytes();
        BitLocation {
            shard_key: self.router.shard_key(&bytes),
            offsets: self.offsets.offsets(&bytes),
        }
    }

    /// Add every element in order, stopping at the first failure
    ///
    /// Returns the number of elements fully added before the failure, if any.
    pub async fn add_all<I, E>(&self, elements: I) -> Result<usize, FilterError>
    where
        I: IntoIterator<Item = E>,
        E: Element + Sync,
    {
        let mut added = 0;
        for element in elements {
            self.add(&element).await?;
            added += 1;
        }
        Ok(added)
    }

    fn store_failure(
        &self,
        op: &'static str,
        shard_key: &str,
        offset: u32,
        err: StoreError,
    ) -> FilterError {
        warn!(
            op = op,
            shard_key = shard_key,
            offset = offset,
            error = %err,
            "Bit store call failed"
        );
        self.metrics.record_store_failure();
        FilterError::StoreUnavailable(err)
    }
}

#[async_trait]
impl<S: BitStore> MembershipFilter for ShardedBloomFilter<S> {
    async fn add<E>(&self, element: &E) -> Result<(), FilterError>
    where
        E: Element + Sync + ?Sized,
    {
        let start = Instant::now();
        let location = self.locate(element);
        debug!(
            shard_key = %location.shard_key,
            hash_count = location.offsets.len(),
            "Adding element"
        );

        // Sequential: if bit i fails, bits 0..i stay set and the rest are skipped
        for &offset in &location.offsets {
            self.store
                .set_bit(&location.shard_key, offset, true)
                .await
                .map_err(|e| self.store_failure("SETBIT", &location.shard_key, offset, e))?;
        }

        self.metrics.record_add(start.elapsed(), location.offsets.len());
        Ok(())
    }

    async fn contains<E>(&self, element: &E) -> Result<bool, FilterError>
    where
        E: Element + Sync + ?Sized,
    {
        let start = Instant::now();
        let location = self.locate(element);

        let mut probed = 0;
        let mut found = true;
        for &offset in &location.offsets {
            probed += 1;
            let bit = self
                .store
                .get_bit(&location.shard_key, offset)
                .await
                .map_err(|e| self.store_failure("GETBIT", &location.shard_key, offset, e))?;
            if !bit {
                found = false;
                break;
            }
        }

        debug!(
            shard_key = %location.shard_key,
            probed = probed,
            found = found,
            "Membership checked"
        );
        self.metrics.record_lookup(start.elapsed(), probed, found);
        Ok(found)
    }
}
