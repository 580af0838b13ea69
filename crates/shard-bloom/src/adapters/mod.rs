//! Adapters Layer (Driven Adapters)
//!
//! Implementations of the [`BitStore`](crate::ports::BitStore) port.
//!
//! ## Adapters
//!
//! - `InMemoryBitStore` - Sparse in-process store with Redis bit semantics
//! - `TimeoutBitStore` - Bounds every bit call of an inner store with a deadline

pub mod memory_store;
pub mod timeout_store;

pub use memory_store::InMemoryBitStore;
pub use timeout_store::TimeoutBitStore;
