//! Inbound Ports (Driving Ports)
//!
//! The API callers use to interact with a sharded filter.

use async_trait::async_trait;

use crate::domain::Element;
use crate::error::FilterError;

/// Probabilistic set membership (Driving Port)
///
/// INVARIANTS:
/// - No false negatives: once `add(v)` has returned `Ok`, `contains(v)`
///   returns `Ok(true)`.
/// - `add` is idempotent.
#[async_trait]
pub trait MembershipFilter: Send + Sync {
    /// Insert an element
    ///
    /// On error some of the element's bits may already be set. Calling `add`
    /// again with the same element is always safe.
    async fn add<E>(&self, element: &E) -> Result<(), FilterError>
    where
        E: Element + Sync + ?Sized;

    /// Test whether an element might have been inserted
    ///
    /// Returns:
    /// - `Ok(true)` if the element might be in the set (could be false positive)
    /// - `Ok(false)` if the element is definitely NOT in the set
    /// - `Err` if the store could not answer; never reported as absent
    async fn contains<E>(&self, element: &E) -> Result<bool, FilterError>
    where
        E: Element + Sync + ?Sized;
}
