//! # ag-policy
//!
//! Risk-based policy evaluation for the agent authorization gate.
//!
//! [`evaluate`] applies ordered rules to a validated identity and a
//! [`PolicyRequest`] and produces a [`PolicyDecision`]: allow, deny, or
//! needs_review, with an ordered list of stable reason codes. Callers map
//! reason codes to user-facing text; the codes themselves never change.
//!
//! ## Key invariants
//!
//! - **Deterministic**: identical input always yields the identical
//!   decision, so every decision is auditable and reproducible.
//! - **Reasons iff not allowed**: `reasons` is empty exactly when the
//!   decision is Allow.
//! - **Failures are data**: policy outcomes are values, never errors.
//!   Only a malformed wire payload produces a [`PolicyError`].

pub mod error;
pub mod evaluator;
pub mod request;

pub use error::PolicyError;
pub use evaluator::{
    evaluate, evaluate_with_trace, reason, Decision, EvaluationStep, EvaluationTrace,
    PolicyDecision,
};
pub use request::{PolicyRequest, WriteRisk};
