// verifier.rs — Attestation verification extension point.
//
// The gate itself never checks attestation evidence. Deployments that
// need real verification (signature check of `evidence` against the
// issuer's public key) implement AttestationVerifier and inject it at
// the call site; the gate's control flow does not change.

use crate::error::VerifyError;
use crate::identity::Attestation;

/// Verifies attestation evidence against its issuer.
///
/// Implementations may perform network or cryptographic work; callers are
/// free to time out or cancel a verification, since nothing in the gate
/// holds state across calls.
pub trait AttestationVerifier {
    /// Check whether `attestation.evidence` is genuine for its issuer.
    ///
    /// Returns `Ok(false)` for evidence that was checked and found bad;
    /// `Err` only for verifier failures (unknown issuer, backend down).
    fn verify(&self, attestation: &Attestation) -> Result<bool, VerifyError>;
}

/// Placeholder verifier: accepts every structurally valid attestation.
///
/// **This is not a security guarantee.** No signature is checked, no
/// issuer key is consulted. It exists so the gate can run end to end
/// before a real verifier is wired in, and so tests can exercise the
/// control flow. Production deployments must substitute an implementation
/// that actually verifies `evidence` against the issuer's public key.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubVerifier;

impl AttestationVerifier for StubVerifier {
    fn verify(&self, attestation: &Attestation) -> Result<bool, VerifyError> {
        tracing::debug!(
            issuer = %attestation.issuer,
            trust_tier = %attestation.trust_tier,
            "stub verifier accepting attestation without checking evidence"
        );
        Ok(true)
    }
}
