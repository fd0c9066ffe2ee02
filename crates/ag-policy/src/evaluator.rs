// evaluator.rs — Ordered policy rule evaluation.
//
// Every authorization request flows through `evaluate()`, which applies:
//
// 1. Completeness: empty action or resource? → Deny, nothing else runs.
// 2. Control-class allowlist → accumulate CONTROL_CLASS_BLOCKED.
// 3. Trust-tier allowlist → accumulate TRUST_TIER_BLOCKED.
// 4. High-risk write without approval token? → NeedsReview, carrying any
//    reasons accumulated by steps 2-3.
// 5. Accumulated reasons → Deny.
// 6. Otherwise → Allow with no reasons.
//
// The evaluator is a pure function of its input: no clock, no state, no
// randomness. Identical input always yields the identical decision.

use serde::{Deserialize, Serialize};

use ag_identity::AgentIdentity;

use crate::request::{PolicyRequest, WriteRisk};

/// Stable reason-code tokens. These are machine-readable and never
/// localized; callers map them to user-facing text.
pub mod reason {
    /// The request named no action or no resource.
    pub const MISSING_ACTION_OR_RESOURCE: &str = "MISSING_ACTION_OR_RESOURCE";
    /// The identity's control class is outside the request's allowlist.
    pub const CONTROL_CLASS_BLOCKED: &str = "CONTROL_CLASS_BLOCKED";
    /// The identity's trust tier is outside the request's allowlist (or
    /// the identity carries no attestation at all).
    pub const TRUST_TIER_BLOCKED: &str = "TRUST_TIER_BLOCKED";
    /// A high-risk write arrived without an approval token.
    pub const APPROVAL_REQUIRED: &str = "APPROVAL_REQUIRED";
}

/// The verdict of a policy evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The action may proceed.
    Allow,
    /// The action must not proceed.
    Deny,
    /// The action is held for explicit human review.
    NeedsReview,
}

/// A decision plus the ordered reason codes behind it.
///
/// Invariant: `reasons` is empty exactly when `decision` is Allow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyDecision {
    /// The verdict.
    pub decision: Decision,
    /// Ordered reason codes; empty iff the verdict is Allow.
    pub reasons: Vec<String>,
}

impl PolicyDecision {
    /// An allow decision (never carries reasons).
    pub fn allow() -> Self {
        Self {
            decision: Decision::Allow,
            reasons: Vec::new(),
        }
    }

    /// A deny decision with its reason codes.
    pub fn deny(reasons: Vec<String>) -> Self {
        Self {
            decision: Decision::Deny,
            reasons,
        }
    }

    /// A needs-review decision with its reason codes.
    pub fn needs_review(reasons: Vec<String>) -> Self {
        Self {
            decision: Decision::NeedsReview,
            reasons,
        }
    }

    /// True if the action may proceed.
    pub fn is_allowed(&self) -> bool {
        self.decision == Decision::Allow
    }
}

/// Evaluate a request against a validated identity.
///
/// Pure and deterministic; see the module header for the rule order.
pub fn evaluate(identity: &AgentIdentity, request: &PolicyRequest) -> PolicyDecision {
    // Hard precondition, not a policy outcome: an unnamed action or
    // resource terminates evaluation before any allowlist is consulted.
    if request.action.is_empty() || request.resource.is_empty() {
        return PolicyDecision::deny(vec![reason::MISSING_ACTION_OR_RESOURCE.to_string()]);
    }

    let mut reasons = Vec::new();

    if control_class_blocked(identity, request) {
        reasons.push(reason::CONTROL_CLASS_BLOCKED.to_string());
    }

    if trust_tier_blocked(identity, request) {
        reasons.push(reason::TRUST_TIER_BLOCKED.to_string());
    }

    // A missing approval on a high-risk write resolves to NeedsReview and
    // carries any reasons accumulated above — it outranks a would-be Deny
    // from the allowlist checks. Preserved as-is pending product-owner
    // confirmation; do not reorder.
    if high_risk_unapproved(request) {
        reasons.push(reason::APPROVAL_REQUIRED.to_string());
        let decision = PolicyDecision::needs_review(reasons);
        tracing::debug!(
            agent_id = %identity.agent_id,
            action = %request.action,
            resource = %request.resource,
            reasons = ?decision.reasons,
            "policy decision: needs_review"
        );
        return decision;
    }

    if !reasons.is_empty() {
        tracing::debug!(
            agent_id = %identity.agent_id,
            action = %request.action,
            resource = %request.resource,
            ?reasons,
            "policy decision: deny"
        );
        return PolicyDecision::deny(reasons);
    }

    PolicyDecision::allow()
}

fn control_class_blocked(identity: &AgentIdentity, request: &PolicyRequest) -> bool {
    match &request.allowed_control_classes {
        Some(allowed) if !allowed.is_empty() => !allowed.contains(&identity.control_class),
        _ => false,
    }
}

fn trust_tier_blocked(identity: &AgentIdentity, request: &PolicyRequest) -> bool {
    match &request.trust_tier_allowlist {
        Some(allowlist) if !allowlist.is_empty() => !identity
            .attestation
            .as_ref()
            .is_some_and(|a| allowlist.contains(&a.trust_tier)),
        _ => false,
    }
}

/// An empty approval token counts as absent.
fn high_risk_unapproved(request: &PolicyRequest) -> bool {
    request.write_risk == WriteRisk::WriteHighRisk
        && request.approval_token.as_deref().unwrap_or("").is_empty()
}

/// A step in the evaluation chain — what was checked and how it came out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationStep {
    /// Which rule ran (e.g., "completeness", "trust_tier").
    pub check: String,
    /// The outcome of this rule (e.g., "passed", "blocked").
    pub outcome: String,
    /// Whether this step terminated evaluation.
    pub terminal: bool,
}

/// Full evaluation trace returned alongside a [`PolicyDecision`].
///
/// Records every rule the evaluator ran, in order, so the decision trail
/// can be serialized into an audit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationTrace {
    /// The final decision; always equal to what [`evaluate`] returns for
    /// the same input.
    pub decision: PolicyDecision,
    /// Ordered steps, exactly one of which is terminal.
    pub steps: Vec<EvaluationStep>,
}

/// Evaluate with a full step-by-step trace.
///
/// Same semantics as [`evaluate`]; the trace adds observability, never
/// behavior.
pub fn evaluate_with_trace(identity: &AgentIdentity, request: &PolicyRequest) -> EvaluationTrace {
    let mut steps = Vec::new();

    if request.action.is_empty() || request.resource.is_empty() {
        steps.push(EvaluationStep {
            check: "completeness".to_string(),
            outcome: "failed: action or resource is empty".to_string(),
            terminal: true,
        });
        return EvaluationTrace {
            decision: PolicyDecision::deny(vec![reason::MISSING_ACTION_OR_RESOURCE.to_string()]),
            steps,
        };
    }
    steps.push(EvaluationStep {
        check: "completeness".to_string(),
        outcome: "passed".to_string(),
        terminal: false,
    });

    let mut reasons = Vec::new();

    let class_outcome = match &request.allowed_control_classes {
        Some(allowed) if !allowed.is_empty() => {
            if allowed.contains(&identity.control_class) {
                "passed".to_string()
            } else {
                reasons.push(reason::CONTROL_CLASS_BLOCKED.to_string());
                format!("blocked: '{}' not in allowlist", identity.control_class.as_str())
            }
        }
        _ => "skipped: no allowlist".to_string(),
    };
    steps.push(EvaluationStep {
        check: "control_class".to_string(),
        outcome: class_outcome,
        terminal: false,
    });

    let tier_outcome = match &request.trust_tier_allowlist {
        Some(allowlist) if !allowlist.is_empty() => match &identity.attestation {
            Some(a) if allowlist.contains(&a.trust_tier) => "passed".to_string(),
            Some(a) => {
                reasons.push(reason::TRUST_TIER_BLOCKED.to_string());
                format!("blocked: tier '{}' not in allowlist", a.trust_tier)
            }
            None => {
                reasons.push(reason::TRUST_TIER_BLOCKED.to_string());
                "blocked: no attestation".to_string()
            }
        },
        _ => "skipped: no allowlist".to_string(),
    };
    steps.push(EvaluationStep {
        check: "trust_tier".to_string(),
        outcome: tier_outcome,
        terminal: false,
    });

    if high_risk_unapproved(request) {
        reasons.push(reason::APPROVAL_REQUIRED.to_string());
        steps.push(EvaluationStep {
            check: "high_risk_approval".to_string(),
            outcome: "failed: high-risk write without approval token".to_string(),
            terminal: true,
        });
        return EvaluationTrace {
            decision: PolicyDecision::needs_review(reasons),
            steps,
        };
    }
    steps.push(EvaluationStep {
        check: "high_risk_approval".to_string(),
        outcome: if request.write_risk == WriteRisk::WriteHighRisk {
            "passed: approval token present".to_string()
        } else {
            "skipped: not a high-risk write".to_string()
        },
        terminal: false,
    });

    if reasons.is_empty() {
        steps.push(EvaluationStep {
            check: "verdict".to_string(),
            outcome: "allowed".to_string(),
            terminal: true,
        });
        EvaluationTrace {
            decision: PolicyDecision::allow(),
            steps,
        }
    } else {
        steps.push(EvaluationStep {
            check: "verdict".to_string(),
            outcome: format!("denied: {} reason(s)", reasons.len()),
            terminal: true,
        });
        EvaluationTrace {
            decision: PolicyDecision::deny(reasons),
            steps,
        }
    }
}
