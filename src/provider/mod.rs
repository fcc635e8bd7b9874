//! Update submission to the DNS provider.
//!
//! This module provides:
//! - The submitter abstraction used by the update cycle ([`UpdateSubmitter`])
//! - The dynv6-style HTTP implementation ([`Dynv6Provider`])
//! - Submission errors ([`SubmitError`])

mod dynv6;
mod error;


pub use dynv6::{Dynv6Provider, HOSTNAME_KEY, TOKEN_KEY};
pub use error::SubmitError;

use crate::network::AddressSet;

/// Trait for reporting an address set to a DNS provider.
///
/// There is no retry inside a single submission; the periodic loop is the
/// retry mechanism.
pub trait UpdateSubmitter: Send + Sync {
    /// Submits `addresses` and returns the provider's response body.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] on transport failure or a non-2xx status.
    fn submit(
        &self,
        addresses: &AddressSet,
    ) -> impl std::future::Future<Output = Result<String, SubmitError>> + Send;
}
