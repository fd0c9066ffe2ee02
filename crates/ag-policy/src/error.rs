// error.rs — Error types for the policy crate.
//
// Policy outcomes (deny, needs_review) are decision values, not errors.
// PolicyError only covers wire payloads that cannot be turned into a
// request at all — a caller bug, not a policy result.

use thiserror::Error;

/// Errors that can occur before policy evaluation begins.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The raw request payload does not deserialize into a policy request.
    #[error("malformed policy request: {0}")]
    MalformedRequest(#[from] serde_json::Error),
}
