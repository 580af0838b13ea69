//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Configuration and validation
//! - Parameter derivation (m, k, shard count)
//! - The seeded MurmurHash3 family
//! - Element canonicalization
//! - Shard routing and bit offset calculation
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod config;
pub mod element;
pub mod hash_functions;
pub mod offsets;
pub mod parameters;
pub mod shard_router;

pub use config::{FilterConfig, FilterConfigBuilder, DEFAULT_SHARD_BIT_WIDTH};
pub use element::Element;
pub use hash_functions::{build_hashes, murmur3_32, HashFunction, SEED_POOL};
pub use offsets::OffsetCalculator;
pub use parameters::{calculate_fpr, FilterParams};
pub use shard_router::ShardRouter;
