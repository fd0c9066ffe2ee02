// validator.rs — Structural validation of raw identity payloads.
//
// The identity gate runs in two stages:
//
// 1. Structural: does the raw JSON look like an AgentIdentity? Every
//    violation is collected as a path-qualified error string, in field
//    traversal order (agent_id, owner_id, control_class, attestation.*).
// 2. Contextual: if the call site requires attestation and none is
//    present, that is its own single-error failure — a structurally
//    valid identity without attestation passes stage 1.
//
// Failures never raise; the caller always gets a ValidationResult.

use serde_json::Value;

use crate::identity::{AgentIdentity, Attestation, ControlClass};

/// Error token returned when attestation is contextually mandatory but absent.
pub const ATTESTATION_REQUIRED: &str = "ATTESTATION_REQUIRED";

/// The outcome of identity validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The payload is a well-formed identity for this call context.
    Valid {
        /// The typed identity extracted from the payload.
        identity: AgentIdentity,
    },
    /// The payload was rejected; one entry per violation.
    Invalid {
        /// Path-qualified errors ("<field-path>: <message>"), in traversal
        /// order, or the single `ATTESTATION_REQUIRED` token.
        errors: Vec<String>,
    },
}

impl ValidationResult {
    /// True if validation produced a typed identity.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid { .. })
    }
}

/// Validate a raw identity payload.
///
/// `require_attestation` marks call contexts (any policy-gated flow) where
/// an identity without an attestation block must be rejected even though
/// the block is structurally optional.
///
/// Pure function: no side effects, no state between calls.
pub fn validate(raw: &Value, require_attestation: bool) -> ValidationResult {
    let mut errors = Vec::new();

    let Some(obj) = raw.as_object() else {
        return ValidationResult::Invalid {
            errors: vec!["identity: expected a JSON object".to_string()],
        };
    };

    let agent_id = check_string(obj, "agent_id", &mut errors);
    let owner_id = check_string(obj, "owner_id", &mut errors);
    let control_class = check_control_class(obj, &mut errors);
    let attestation = check_attestation(obj, &mut errors);

    match (agent_id, owner_id, control_class) {
        (Some(agent_id), Some(owner_id), Some(control_class)) if errors.is_empty() => {
            if require_attestation && attestation.is_none() {
                tracing::debug!(%agent_id, "attestation required but absent");
                return ValidationResult::Invalid {
                    errors: vec![ATTESTATION_REQUIRED.to_string()],
                };
            }
            ValidationResult::Valid {
                identity: AgentIdentity {
                    agent_id,
                    owner_id,
                    control_class,
                    attestation,
                },
            }
        }
        _ => {
            tracing::debug!(error_count = errors.len(), "identity payload rejected");
            ValidationResult::Invalid { errors }
        }
    }
}

/// Extract a required non-empty string field, recording errors at `key`.
fn check_string(
    obj: &serde_json::Map<String, Value>,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => {
            errors.push(format!("{key}: required field is missing"));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.push(format!("{key}: must be a non-empty string"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(format!("{key}: must be a string"));
            None
        }
    }
}

fn check_control_class(
    obj: &serde_json::Map<String, Value>,
    errors: &mut Vec<String>,
) -> Option<ControlClass> {
    let token = check_string(obj, "control_class", errors)?;
    match ControlClass::parse(&token) {
        Some(class) => Some(class),
        None => {
            errors.push(
                "control_class: must be one of autonomous, human-supervised, human-directed"
                    .to_string(),
            );
            None
        }
    }
}

/// Validate the optional attestation block. Absence is not an error here;
/// the contextual requirement is enforced by `validate` after the
/// structural pass succeeds.
fn check_attestation(
    obj: &serde_json::Map<String, Value>,
    errors: &mut Vec<String>,
) -> Option<Attestation> {
    let block = match obj.get("attestation") {
        None | Some(Value::Null) => return None,
        Some(Value::Object(block)) => block,
        Some(_) => {
            errors.push("attestation: must be an object".to_string());
            return None;
        }
    };

    let issuer = check_nested_string(block, "attestation.issuer", "issuer", errors);
    let evidence = check_nested_string(block, "attestation.evidence", "evidence", errors);
    let issued_at = check_issued_at(block, errors);
    let trust_tier = check_nested_string(block, "attestation.trust_tier", "trust_tier", errors);

    match (issuer, evidence, issued_at, trust_tier) {
        (Some(issuer), Some(evidence), Some(issued_at), Some(trust_tier)) => Some(Attestation {
            issuer,
            evidence,
            issued_at,
            trust_tier,
        }),
        _ => None,
    }
}

fn check_nested_string(
    block: &serde_json::Map<String, Value>,
    path: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match block.get(key) {
        None | Some(Value::Null) => {
            errors.push(format!("{path}: required field is missing"));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.push(format!("{path}: must be a non-empty string"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(format!("{path}: must be a string"));
            None
        }
    }
}

/// `issued_at` must be a parseable ISO-8601 datetime; the string itself is
/// kept verbatim so the payload round-trips.
fn check_issued_at(
    block: &serde_json::Map<String, Value>,
    errors: &mut Vec<String>,
) -> Option<String> {
    let raw = check_nested_string(block, "attestation.issued_at", "issued_at", errors)?;
    match chrono::DateTime::parse_from_rfc3339(&raw) {
        Ok(_) => Some(raw),
        Err(_) => {
            errors.push("attestation.issued_at: must be a valid ISO-8601 datetime".to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "agent_id": "agent:test/001",
            "owner_id": "org:test-corp",
            "control_class": "autonomous",
            "attestation": {
                "issuer": "org-verifier",
                "evidence": "signed-jwt-token",
                "issued_at": "2026-08-29T12:00:00Z",
                "trust_tier": "standard"
            }
        })
    }

    #[test]
    fn validates_a_correct_identity_payload() {
        let result = validate(&valid_payload(), true);
        match result {
            ValidationResult::Valid { identity } => {
                assert_eq!(identity.agent_id, "agent:test/001");
                assert_eq!(identity.control_class, ControlClass::Autonomous);
                let attestation = identity.attestation.expect("attestation present");
                assert_eq!(attestation.trust_tier, "standard");
            }
            other => panic!("expected Valid, got {:?}", other),
        }
    }

    #[test]
    fn fails_when_attestation_is_missing_and_required() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("attestation");

        let result = validate(&payload, true);
        assert_eq!(
            result,
            ValidationResult::Invalid {
                errors: vec![ATTESTATION_REQUIRED.to_string()]
            }
        );
    }

    #[test]
    fn passes_when_attestation_is_missing_but_not_required() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("attestation");

        let result = validate(&payload, false);
        match result {
            ValidationResult::Valid { identity } => assert!(identity.attestation.is_none()),
            other => panic!("expected Valid, got {:?}", other),
        }
    }

    #[test]
    fn fails_with_invalid_control_class() {
        let mut payload = valid_payload();
        payload["control_class"] = json!("rogue");

        match validate(&payload, true) {
            ValidationResult::Invalid { errors } => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].starts_with("control_class:"));
                assert!(errors[0].contains("one of"));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn fails_with_missing_required_fields() {
        let payload = json!({ "agent_id": "123" });

        match validate(&payload, true) {
            ValidationResult::Invalid { errors } => {
                // owner_id and control_class are both missing.
                assert!(errors.len() >= 2);
                assert!(errors.iter().any(|e| e.starts_with("owner_id:")));
                assert!(errors.iter().any(|e| e.starts_with("control_class:")));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn errors_follow_field_traversal_order() {
        let payload = json!({
            "agent_id": "",
            "owner_id": 42,
            "control_class": "autonomous",
            "attestation": {
                "issuer": "",
                "evidence": "token",
                "issued_at": "not-a-date",
                "trust_tier": "high"
            }
        });

        match validate(&payload, true) {
            ValidationResult::Invalid { errors } => {
                assert_eq!(
                    errors,
                    vec![
                        "agent_id: must be a non-empty string",
                        "owner_id: must be a string",
                        "attestation.issuer: must be a non-empty string",
                        "attestation.issued_at: must be a valid ISO-8601 datetime",
                    ]
                );
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn rejects_non_object_payloads() {
        for payload in [json!("agent-1"), json!(42), json!(["agent-1"]), json!(null)] {
            match validate(&payload, false) {
                ValidationResult::Invalid { errors } => {
                    assert_eq!(errors, vec!["identity: expected a JSON object"]);
                }
                other => panic!("expected Invalid, got {:?}", other),
            }
        }
    }

    #[test]
    fn issued_at_accepts_offsets_and_rejects_date_only() {
        // Offset datetimes are valid ISO-8601.
        let mut payload = valid_payload();
        payload["attestation"]["issued_at"] = json!("2026-08-29T12:00:00+02:00");
        assert!(validate(&payload, true).is_valid());

        payload["attestation"]["issued_at"] = json!("2026-08-29");
        assert!(!validate(&payload, true).is_valid());
    }

    #[test]
    fn structural_errors_take_precedence_over_attestation_requirement() {
        // An invalid payload without attestation reports the structural
        // errors, not ATTESTATION_REQUIRED.
        let payload = json!({
            "agent_id": "agent:test/001",
            "owner_id": "",
            "control_class": "autonomous"
        });

        match validate(&payload, true) {
            ValidationResult::Invalid { errors } => {
                assert_eq!(errors, vec!["owner_id: must be a non-empty string"]);
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn validation_is_deterministic() {
        let payload = json!({ "agent_id": "", "owner_id": "" });
        assert_eq!(validate(&payload, true), validate(&payload, true));
    }
}
