//! Service Layer
//!
//! The filter engine: composes the domain pieces and drives the bit store
//! through the outbound port.

pub mod filter_service;

pub use filter_service::{BitLocation, ShardedBloomFilter};
