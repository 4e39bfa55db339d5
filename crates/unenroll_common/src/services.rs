// --- File: crates/unenroll_common/src/services.rs ---
//! Service abstractions for the sequence provider.
//!
//! The orchestration in the integration crates is written against
//! [`SequenceService`] so it can run against the real Apollo client or an
//! in-memory fake in tests.

use std::future::Future;
use std::pin::Pin;

use crate::models::SequenceMode;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Operations on a CRM that keeps contacts enrolled in email sequences.
pub trait SequenceService: Send + Sync {
    /// Error type returned by sequence service operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up a contact by email. `Ok(None)` means the search succeeded and
    /// matched nothing.
    fn find_contact_id(&self, api_key: &str, email: &str)
        -> BoxFuture<'_, Option<String>, Self::Error>;

    /// Remove the contact from the sequence, or mark it finished there.
    /// Returns the provider's response body unchanged.
    fn update_membership(
        &self,
        api_key: &str,
        contact_id: &str,
        campaign_id: &str,
        mode: SequenceMode,
    ) -> BoxFuture<'_, serde_json::Value, Self::Error>;
}
