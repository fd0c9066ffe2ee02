// End-to-end authorization flows: raw wire payloads through identity
// validation and policy evaluation.

use ag_gate::{authorize, reason, ControlClass, Decision, PolicyRequest, WriteRisk};
use serde_json::{json, Value};

fn identity_with(control_class: &str, trust_tier: &str) -> Value {
    json!({
        "agent_id": "agent:finance/approval-bot",
        "owner_id": "org:acme",
        "control_class": control_class,
        "attestation": {
            "issuer": "org-verifier",
            "evidence": "signed-token",
            "issued_at": "2026-08-29T12:00:00Z",
            "trust_tier": trust_tier
        }
    })
}

#[test]
fn disallowed_control_class_is_denied() {
    let request = PolicyRequest {
        action: "deploy".to_string(),
        resource: "prod:api".to_string(),
        write_risk: WriteRisk::WriteLowRisk,
        allowed_control_classes: Some(vec![ControlClass::HumanDirected]),
        ..Default::default()
    };

    let decision = authorize(&identity_with("autonomous", "high"), true, &request);
    assert_eq!(decision.decision, Decision::Deny);
    assert_eq!(decision.reasons, vec![reason::CONTROL_CLASS_BLOCKED]);
}

#[test]
fn low_trust_tier_is_denied() {
    let request = PolicyRequest {
        action: "access".to_string(),
        resource: "sensitive:dataset".to_string(),
        write_risk: WriteRisk::WriteLowRisk,
        trust_tier_allowlist: Some(vec!["high".to_string()]),
        ..Default::default()
    };

    let decision = authorize(&identity_with("human-directed", "low"), true, &request);
    assert_eq!(decision.decision, Decision::Deny);
    assert_eq!(decision.reasons, vec![reason::TRUST_TIER_BLOCKED]);
}

#[test]
fn fully_approved_high_risk_write_is_allowed() {
    let request = PolicyRequest {
        action: "deploy".to_string(),
        resource: "prod:api".to_string(),
        write_risk: WriteRisk::WriteHighRisk,
        approval_token: Some("approved-123".to_string()),
        allowed_control_classes: Some(vec![ControlClass::HumanDirected]),
        trust_tier_allowlist: Some(vec!["high".to_string()]),
    };

    let decision = authorize(&identity_with("human-directed", "high"), true, &request);
    assert!(decision.is_allowed());
    assert!(decision.reasons.is_empty());
}

#[test]
fn unapproved_high_risk_write_needs_review() {
    let request = PolicyRequest {
        action: "deploy".to_string(),
        resource: "prod:api".to_string(),
        write_risk: WriteRisk::WriteHighRisk,
        ..Default::default()
    };

    let decision = authorize(&identity_with("human-directed", "high"), true, &request);
    assert_eq!(decision.decision, Decision::NeedsReview);
    assert!(decision.reasons.contains(&reason::APPROVAL_REQUIRED.to_string()));
}

#[test]
fn legacy_wire_aliases_reach_the_same_decision() {
    let canonical = PolicyRequest::from_wire(&json!({
        "action": "deploy",
        "resource": "prod:api",
        "write_risk": "write_high_risk",
        "approval_token": "approved-123",
        "allowed_control_classes": ["human-directed"],
        "trust_tier_allowlist": ["high"]
    }))
    .unwrap();
    let legacy = PolicyRequest::from_wire(&json!({
        "action": "deploy",
        "resource": "prod:api",
        "writeRisk": "write_high_risk",
        "approvalToken": "approved-123",
        "allowedControlClasses": ["human-directed"],
        "trustTierAllowlist": ["high"]
    }))
    .unwrap();

    let identity = identity_with("human-directed", "high");
    assert_eq!(
        authorize(&identity, true, &canonical),
        authorize(&identity, true, &legacy)
    );
}

#[test]
fn empty_action_or_resource_is_a_hard_deny() {
    for (action, resource) in [("", "prod:api"), ("deploy", ""), ("", "")] {
        let request = PolicyRequest {
            action: action.to_string(),
            resource: resource.to_string(),
            ..Default::default()
        };
        let decision = authorize(&identity_with("human-directed", "high"), true, &request);
        assert_eq!(decision.decision, Decision::Deny);
        assert_eq!(decision.reasons, vec![reason::MISSING_ACTION_OR_RESOURCE]);
    }
}

#[test]
fn garbage_identity_payload_never_reaches_the_policy_gate() {
    let request = PolicyRequest {
        action: "deploy".to_string(),
        resource: "prod:api".to_string(),
        ..Default::default()
    };

    let decision = authorize(&json!("not-an-identity"), true, &request);
    assert_eq!(decision.decision, Decision::Deny);
    assert_eq!(
        decision.reasons,
        vec!["IDENTITY_INVALID:identity: expected a JSON object"]
    );
}

#[test]
fn authorization_is_deterministic() {
    let identity = identity_with("autonomous", "low");
    let request = PolicyRequest {
        action: "deploy".to_string(),
        resource: "prod:api".to_string(),
        write_risk: WriteRisk::WriteHighRisk,
        allowed_control_classes: Some(vec![ControlClass::HumanDirected]),
        trust_tier_allowlist: Some(vec!["high".to_string()]),
        ..Default::default()
    };

    let first = authorize(&identity, true, &request);
    let second = authorize(&identity, true, &request);
    assert_eq!(first, second);
}
