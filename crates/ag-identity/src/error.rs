// error.rs — Error types for attestation verification.

use thiserror::Error;

/// Errors an [`AttestationVerifier`](crate::AttestationVerifier)
/// implementation may surface.
///
/// These are verifier failures (unreachable issuer, unusable key), not
/// verdicts — a verifier that inspects evidence and finds it bad returns
/// `Ok(false)`, not an error.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The issuer's verification key could not be resolved.
    #[error("unknown issuer '{issuer}'")]
    UnknownIssuer { issuer: String },

    /// The evidence blob could not be decoded into a checkable form.
    #[error("malformed evidence: {reason}")]
    MalformedEvidence { reason: String },

    /// The verifier backend failed (network, key store, timeout).
    #[error("verifier unavailable: {reason}")]
    Unavailable { reason: String },
}
