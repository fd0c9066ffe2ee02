//! # ag-identity
//!
//! Agent identity model and validation for the authorization gate.
//!
//! An [`AgentIdentity`] is what an agent claims about itself: who it is,
//! who owns it, how much human oversight governs it ([`ControlClass`]),
//! and optionally an [`Attestation`] of its trust tier backed by an issuer.
//!
//! The identity gate ([`validate`]) performs structural checks on a raw
//! JSON payload and enforces contextual attestation requirements. It never
//! verifies attestation evidence cryptographically — that lives behind the
//! [`AttestationVerifier`] extension point, whose shipped implementation
//! ([`StubVerifier`]) accepts everything and is a placeholder only.
//!
//! ## Key invariants
//!
//! - **Failures are data**: validation returns a [`ValidationResult`],
//!   never panics or raises across the gate boundary.
//! - **Pure**: validation is a function of its input alone; no state is
//!   held between calls.

pub mod error;
pub mod identity;
pub mod validator;
pub mod verifier;

pub use error::VerifyError;
pub use identity::{AgentIdentity, Attestation, ControlClass};
pub use validator::{validate, ValidationResult, ATTESTATION_REQUIRED};
pub use verifier::{AttestationVerifier, StubVerifier};
