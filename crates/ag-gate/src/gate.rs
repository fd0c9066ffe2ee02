// gate.rs — Identity gate chained into the policy gate.
//
// The single entry point callers put in front of a higher-risk operation.
// Identity validation runs first; a rejected identity short-circuits to
// Deny and the policy gate never runs. A valid identity is handed to the
// policy evaluator and its decision is returned unmodified.

use serde_json::Value;

use ag_identity::{validate, ValidationResult};
use ag_policy::{evaluate, PolicyDecision, PolicyRequest};

/// Prefix wrapping identity errors when the gate short-circuits, so a
/// caller can tell an identity rejection from a policy deny by reason
/// code alone.
pub const IDENTITY_INVALID_PREFIX: &str = "IDENTITY_INVALID:";

/// Authorize a requested action.
///
/// `raw_identity` is the untyped identity payload as received;
/// `require_attestation` marks call contexts where an attestation block
/// is mandatory (any policy-gated flow). Pure function: same inputs,
/// same decision.
pub fn authorize(
    raw_identity: &Value,
    require_attestation: bool,
    request: &PolicyRequest,
) -> PolicyDecision {
    match validate(raw_identity, require_attestation) {
        ValidationResult::Invalid { errors } => {
            tracing::debug!(
                action = %request.action,
                resource = %request.resource,
                error_count = errors.len(),
                "identity gate rejected request"
            );
            PolicyDecision::deny(
                errors
                    .into_iter()
                    .map(|err| format!("{IDENTITY_INVALID_PREFIX}{err}"))
                    .collect(),
            )
        }
        ValidationResult::Valid { identity } => evaluate(&identity, request),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ag_policy::{reason, Decision, WriteRisk};
    use serde_json::json;

    fn raw_identity() -> Value {
        json!({
            "agent_id": "agent:ops/001",
            "owner_id": "org:acme",
            "control_class": "human-directed",
            "attestation": {
                "issuer": "org-verifier",
                "evidence": "signed-token",
                "issued_at": "2026-08-29T12:00:00Z",
                "trust_tier": "high"
            }
        })
    }

    fn request() -> PolicyRequest {
        PolicyRequest {
            action: "deploy".to_string(),
            resource: "prod:api".to_string(),
            write_risk: WriteRisk::WriteLowRisk,
            ..Default::default()
        }
    }

    #[test]
    fn valid_identity_passes_policy_result_through() {
        let decision = authorize(&raw_identity(), true, &request());
        assert!(decision.is_allowed());
        assert!(decision.reasons.is_empty());
    }

    #[test]
    fn missing_attestation_short_circuits_with_prefixed_reason() {
        let mut identity = raw_identity();
        identity.as_object_mut().unwrap().remove("attestation");

        let decision = authorize(&identity, true, &request());
        assert_eq!(decision.decision, Decision::Deny);
        assert_eq!(decision.reasons, vec!["IDENTITY_INVALID:ATTESTATION_REQUIRED"]);
    }

    #[test]
    fn structural_errors_are_each_wrapped_in_order() {
        let identity = json!({ "agent_id": "", "owner_id": "org:acme" });

        let decision = authorize(&identity, false, &request());
        assert_eq!(decision.decision, Decision::Deny);
        assert!(decision.reasons.len() >= 2);
        for reason in &decision.reasons {
            assert!(reason.starts_with(IDENTITY_INVALID_PREFIX));
        }
        assert!(decision.reasons[0].starts_with("IDENTITY_INVALID:agent_id:"));
    }

    #[test]
    fn policy_deny_is_not_prefixed() {
        let decision = authorize(
            &raw_identity(),
            true,
            &PolicyRequest {
                allowed_control_classes: Some(vec![ag_identity::ControlClass::Autonomous]),
                ..request()
            },
        );
        assert_eq!(decision.decision, Decision::Deny);
        assert_eq!(decision.reasons, vec![reason::CONTROL_CLASS_BLOCKED]);
    }
}
