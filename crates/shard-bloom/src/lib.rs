//! # Shard Bloom
//!
//! A Bloom filter whose bit array lives in a remote bit-addressable
//! key-value store (Redis `SETBIT`/`GETBIT` style) instead of local memory,
//! so membership state can be shared between processes and can outgrow a
//! single process's memory.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `FilterConfig` / `FilterConfigBuilder`: configuration with validation
//!   - `FilterParams`: derived m, k and shard count
//!   - `HashFunction`: seeded MurmurHash3 family
//!   - `ShardRouter`: MD5-based shard selection
//!   - `OffsetCalculator`: k bit offsets inside a shard
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MembershipFilter`: Driving port (add / contains)
//!   - `BitStore`: Driven port (set-bit / get-bit)
//!
//! - **Service Layer** (`service/`): `ShardedBloomFilter`
//!
//! - **Adapters Layer** (`adapters/`): `InMemoryBitStore`, `TimeoutBitStore`
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: m, k and the shard count are fixed for the filter's life
//! - **INVARIANT-2**: No false negatives - if added, contains() MUST return true
//! - **INVARIANT-3**: Every client built from the same `FilterConfig` computes
//!   the same shard key and offsets for an element
//!
//! ## Usage Example
//!
//! ```
//! use shard_bloom::{FilterConfigBuilder, InMemoryBitStore, MembershipFilter, ShardedBloomFilter};
//!
//! # tokio_test::block_on(async {
//! let config = FilterConfigBuilder::new()
//!     .key_prefix("crawled")
//!     .capacity(1_000_000)
//!     .error_rate(0.0001)
//!     .build()?;
//!
//! let filter = ShardedBloomFilter::new(InMemoryBitStore::new(), config)?;
//! filter.add("https://example.com/").await?;
//!
//! assert!(filter.contains("https://example.com/").await?);
//! # Ok::<(), shard_bloom::FilterError>(())
//! # }).unwrap();
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{InMemoryBitStore, TimeoutBitStore};
pub use domain::{
    Element, FilterConfig, FilterConfigBuilder, FilterParams, HashFunction, OffsetCalculator,
    ShardRouter, SEED_POOL,
};
pub use error::{ConfigError, FilterError, StoreError};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{BitStore, MembershipFilter};
pub use service::{BitLocation, ShardedBloomFilter};
