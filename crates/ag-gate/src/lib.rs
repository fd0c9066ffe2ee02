//! # ag-gate
//!
//! The composed authorization gate: identity validation chained into
//! policy evaluation. This is the crate consumers depend on; it re-exports
//! the full public surface of `ag-identity` and `ag-policy`.
//!
//! ## Quick Example
//!
//! ```rust
//! use ag_gate::{authorize, PolicyRequest, WriteRisk};
//! use serde_json::json;
//!
//! let raw_identity = json!({
//!     "agent_id": "agent:ops/001",
//!     "owner_id": "org:acme",
//!     "control_class": "human-directed",
//!     "attestation": {
//!         "issuer": "org-verifier",
//!         "evidence": "signed-token",
//!         "issued_at": "2026-08-29T12:00:00Z",
//!         "trust_tier": "high"
//!     }
//! });
//! let request = PolicyRequest {
//!     action: "deploy".to_string(),
//!     resource: "prod:api".to_string(),
//!     write_risk: WriteRisk::WriteLowRisk,
//!     ..Default::default()
//! };
//!
//! let decision = authorize(&raw_identity, true, &request);
//! assert!(decision.is_allowed());
//! ```

pub mod gate;

pub use gate::{authorize, IDENTITY_INVALID_PREFIX};

pub use ag_identity::{
    validate, AgentIdentity, Attestation, AttestationVerifier, ControlClass, StubVerifier,
    ValidationResult, VerifyError, ATTESTATION_REQUIRED,
};
pub use ag_policy::{
    evaluate, evaluate_with_trace, reason, Decision, EvaluationStep, EvaluationTrace,
    PolicyDecision, PolicyError, PolicyRequest, WriteRisk,
};
