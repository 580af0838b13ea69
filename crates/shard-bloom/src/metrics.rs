//! Metrics hooks for filter operations
//!
//! Counts adds, lookups and the individual bit calls they issue against the
//! store, plus store failures and cumulative latency.
//!
//! ## Usage
//!
//! ```
//! use shard_bloom::metrics::Metrics;
//! use std::time::Duration;
//!
//! let metrics = Metrics::new();
//! metrics.record_add(Duration::from_micros(120), 7);
//! metrics.record_lookup(Duration::from_micros(80), 7, true);
//! assert_eq!(metrics.snapshot().bits_written, 7);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for filter operations
///
/// Thread-safe counters; one instance may be shared by many filters.
#[derive(Default, Debug)]
pub struct Metrics {
    /// Filters constructed against this collector
    pub filters_created: AtomicU64,
    /// Completed `add` calls
    pub adds: AtomicU64,
    /// Completed `contains` calls
    pub lookups_performed: AtomicU64,
    /// `contains` calls that answered true
    pub lookups_positive: AtomicU64,
    /// Individual set-bit calls that succeeded
    pub bits_written: AtomicU64,
    /// Individual get-bit calls that succeeded
    pub bits_read: AtomicU64,
    /// Bit calls that failed
    pub store_failures: AtomicU64,
    /// Cumulative add time in nanoseconds
    pub add_time_ns: AtomicU64,
    /// Cumulative lookup time in nanoseconds
    pub lookup_time_ns: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record filter construction
    ///
    /// Shape parameters are only forwarded through [`MetricsRecorder`]; this
    /// collector counts filters.
    pub fn record_filter_created(&self) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed add
    ///
    /// # Arguments
    /// * `duration` - Time taken for the whole add
    /// * `bits` - Set-bit calls issued
    pub fn record_add(&self, duration: Duration, bits: usize) {
        self.adds.fetch_add(1, Ordering::Relaxed);
        self.bits_written.fetch_add(bits as u64, Ordering::Relaxed);
        self.add_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record a completed lookup
    ///
    /// # Arguments
    /// * `duration` - Time taken for the lookup
    /// * `bits` - Get-bit calls issued (fewer than k when short-circuited)
    /// * `found` - Whether the element was reported present
    pub fn record_lookup(&self, duration: Duration, bits: usize, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        self.bits_read.fetch_add(bits as u64, Ordering::Relaxed);
        self.lookup_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a failed bit call
    pub fn record_store_failure(&self) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            adds: self.adds.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            bits_written: self.bits_written.load(Ordering::Relaxed),
            bits_read: self.bits_read.load(Ordering::Relaxed),
            store_failures: self.store_failures.load(Ordering::Relaxed),
            avg_add_ns: self.avg_add_time_ns(),
            avg_lookup_ns: self.avg_lookup_time_ns(),
        }
    }

    /// Calculate average add time in nanoseconds
    pub fn avg_add_time_ns(&self) -> u64 {
        let total = self.add_time_ns.load(Ordering::Relaxed);
        let count = self.adds.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Calculate average lookup time in nanoseconds
    pub fn avg_lookup_time_ns(&self) -> u64 {
        let total = self.lookup_time_ns.load(Ordering::Relaxed);
        let count = self.lookups_performed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Ratio of positive lookups to total lookups
    ///
    /// Includes true positives; only equals the false positive rate when every
    /// probe is known to be absent.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.filters_created.store(0, Ordering::Relaxed);
        self.adds.store(0, Ordering::Relaxed);
        self.lookups_performed.store(0, Ordering::Relaxed);
        self.lookups_positive.store(0, Ordering::Relaxed);
        self.bits_written.store(0, Ordering::Relaxed);
        self.bits_read.store(0, Ordering::Relaxed);
        self.store_failures.store(0, Ordering::Relaxed);
        self.add_time_ns.store(0, Ordering::Relaxed);
        self.lookup_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub adds: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub bits_written: u64,
    pub bits_read: u64,
    pub store_failures: u64,
    pub avg_add_ns: u64,
    pub avg_lookup_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to integrate with external metrics systems
/// like Prometheus, StatsD, or OpenTelemetry.
pub trait MetricsRecorder: Send + Sync {
    fn record_filter_created(&self, size_bits: u64, hash_count: usize, shard_count: u64);

    fn record_add(&self, duration: Duration, bits: usize);

    fn record_lookup(&self, duration: Duration, bits: usize, found: bool);

    fn record_store_failure(&self);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default, Debug)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: u64, _: usize, _: u64) {}
    fn record_add(&self, _: Duration, _: usize) {}
    fn record_lookup(&self, _: Duration, _: usize, _: bool) {}
    fn record_store_failure(&self) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, _: u64, _: usize, _: u64) {
        Metrics::record_filter_created(self);
    }

    fn record_add(&self, duration: Duration, bits: usize) {
        Metrics::record_add(self, duration, bits);
    }

    fn record_lookup(&self, duration: Duration, bits: usize, found: bool) {
        Metrics::record_lookup(self, duration, bits, found);
    }

    fn record_store_failure(&self) {
        Metrics::record_store_failure(self);
    }
}
