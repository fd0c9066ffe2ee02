// workflow.rs — Finance workflow comparison.
//
// One high-risk finance action (reversing a wire transfer) run through
// four workflow modes side by side:
//
// - manual:  human checklist before executing the write.
// - agentic: framework-native orchestration, evidence partially considered.
// - ungated: agent decides from model confidence alone.
// - gated:   identity gate → policy gate → evidence gate → confidence gate.
//
// These are call sites of the authorization gate, not part of it. The
// decision engine lives in ag-gate; this module shows what each mode does
// with (or without) its decisions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use ag_gate::{authorize, ControlClass, Decision, PolicyRequest, WriteRisk};

/// Confidence floor the framework-agentic mode applies.
const AGENTIC_CONFIDENCE_FLOOR: f64 = 0.65;

/// Confidence floor for the ungated agent and the gated verification step.
const VERIFICATION_CONFIDENCE_FLOOR: f64 = 0.55;

/// Which workflow produced a result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowMode {
    Manual,
    Agentic,
    Ungated,
    Gated,
}

/// The workflow-level outcome (distinct from the gate's PolicyDecision —
/// each mode decides how to react to its own checks).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowDecision {
    Approved,
    Rejected,
    NeedsReview,
}

/// Evidence a finance reviewer would demand before a transfer reversal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceEvidence {
    pub ticket_linked: bool,
    pub ledger_snapshot: bool,
    pub beneficiary_validated: bool,
}

/// Everything the four workflows get to see about one reversal request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceWorkflowInput {
    pub request_id: String,
    pub amount_usd: u64,
    pub source_account: String,
    pub destination_account: String,
    /// The acting model's self-reported confidence in [0, 1].
    pub model_confidence: f64,
    pub evidence: FinanceEvidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_token: Option<String>,
    /// Raw identity payload as received — the gated mode revalidates it.
    pub identity: Value,
}

/// One mode's outcome with its reasons and explanatory notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub mode: WorkflowMode,
    pub decision: WorkflowDecision,
    pub reasons: Vec<String>,
    pub notes: Vec<String>,
}

/// All four modes' results for the same input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowComparison {
    pub manual: WorkflowResult,
    pub agentic: WorkflowResult,
    pub ungated: WorkflowResult,
    pub gated: WorkflowResult,
}

/// Human checklist gate: every box ticked or the transfer is rejected.
pub fn run_manual_workflow(input: &FinanceWorkflowInput) -> WorkflowResult {
    let mut reasons = Vec::new();

    if !input.evidence.ticket_linked {
        reasons.push("CHECKLIST_MISSING_TICKET".to_string());
    }
    if !input.evidence.ledger_snapshot {
        reasons.push("CHECKLIST_MISSING_LEDGER_SNAPSHOT".to_string());
    }
    if !input.evidence.beneficiary_validated {
        reasons.push("CHECKLIST_MISSING_BENEFICIARY_VALIDATION".to_string());
    }
    if input.approval_token.is_none() {
        reasons.push("CHECKLIST_MISSING_APPROVAL".to_string());
    }

    WorkflowResult {
        mode: WorkflowMode::Manual,
        decision: if reasons.is_empty() {
            WorkflowDecision::Approved
        } else {
            WorkflowDecision::Rejected
        },
        reasons,
        notes: vec!["Human checklist gate before executing the finance write action".to_string()],
    }
}

/// Framework-native orchestration: some evidence considered, none enforced.
pub fn run_agentic_workflow(input: &FinanceWorkflowInput) -> WorkflowResult {
    let mut reasons = Vec::new();

    if input.model_confidence < AGENTIC_CONFIDENCE_FLOOR {
        reasons.push("LOW_MODEL_CONFIDENCE".to_string());
    }
    if !input.evidence.ticket_linked {
        reasons.push("MISSING_TICKET_LINK".to_string());
    }

    WorkflowResult {
        mode: WorkflowMode::Agentic,
        decision: if reasons.is_empty() {
            WorkflowDecision::Approved
        } else {
            WorkflowDecision::Rejected
        },
        reasons,
        notes: vec![
            "Framework-native orchestration without explicit policy gate semantics".to_string(),
            "Evidence is partially considered but not fully enforced".to_string(),
        ],
    }
}

/// No governance at all: the agent ships whenever it feels confident.
pub fn run_ungated_workflow(input: &FinanceWorkflowInput) -> WorkflowResult {
    if input.model_confidence >= VERIFICATION_CONFIDENCE_FLOOR {
        WorkflowResult {
            mode: WorkflowMode::Ungated,
            decision: WorkflowDecision::Approved,
            reasons: Vec::new(),
            notes: vec![
                "Decision made from model confidence and task success".to_string(),
                "No deterministic evidence gate or high-risk approval gate".to_string(),
            ],
        }
    } else {
        WorkflowResult {
            mode: WorkflowMode::Ungated,
            decision: WorkflowDecision::Rejected,
            reasons: vec!["LOW_MODEL_CONFIDENCE".to_string()],
            notes: vec!["Rejected due to confidence threshold, not governance controls".to_string()],
        }
    }
}

/// The full pipeline: identity gate, policy gate, evidence gate, then a
/// confidence floor.
pub fn run_gated_workflow(input: &FinanceWorkflowInput) -> WorkflowResult {
    let request = PolicyRequest {
        action: "reverse_wire_transfer".to_string(),
        resource: input.destination_account.clone(),
        write_risk: WriteRisk::WriteHighRisk,
        approval_token: input.approval_token.clone(),
        allowed_control_classes: Some(vec![
            ControlClass::HumanSupervised,
            ControlClass::HumanDirected,
        ]),
        trust_tier_allowlist: Some(vec!["high".to_string()]),
    };

    let gate_decision = authorize(&input.identity, true, &request);
    match gate_decision.decision {
        Decision::NeedsReview => {
            return WorkflowResult {
                mode: WorkflowMode::Gated,
                decision: WorkflowDecision::NeedsReview,
                reasons: gate_decision.reasons,
                notes: vec![
                    "Policy gate requires explicit approval before the high-risk write".to_string(),
                ],
            };
        }
        Decision::Deny => {
            let note = if gate_decision
                .reasons
                .iter()
                .any(|r| r.starts_with(ag_gate::IDENTITY_INVALID_PREFIX))
            {
                "Identity gate blocked execution"
            } else {
                "Policy gate denied execution"
            };
            return WorkflowResult {
                mode: WorkflowMode::Gated,
                decision: WorkflowDecision::Rejected,
                reasons: gate_decision.reasons,
                notes: vec![note.to_string()],
            };
        }
        Decision::Allow => {}
    }

    let mut missing_evidence = Vec::new();
    if !input.evidence.ticket_linked {
        missing_evidence.push("ticket_linked");
    }
    if !input.evidence.ledger_snapshot {
        missing_evidence.push("ledger_snapshot");
    }
    if !input.evidence.beneficiary_validated {
        missing_evidence.push("beneficiary_validated");
    }
    if !missing_evidence.is_empty() {
        return WorkflowResult {
            mode: WorkflowMode::Gated,
            decision: WorkflowDecision::Rejected,
            reasons: missing_evidence
                .into_iter()
                .map(|field| format!("EVIDENCE_MISSING:{field}"))
                .collect(),
            notes: vec!["Evidence gate blocked delivery".to_string()],
        };
    }

    if input.model_confidence < VERIFICATION_CONFIDENCE_FLOOR {
        return WorkflowResult {
            mode: WorkflowMode::Gated,
            decision: WorkflowDecision::Rejected,
            reasons: vec!["VERIFICATION_FAILED:LOW_MODEL_CONFIDENCE".to_string()],
            notes: vec!["Verification gate blocked low-confidence delivery".to_string()],
        };
    }

    WorkflowResult {
        mode: WorkflowMode::Gated,
        decision: WorkflowDecision::Approved,
        reasons: Vec::new(),
        notes: vec![
            "All gates passed: identity, policy, evidence, and verification".to_string(),
        ],
    }
}

/// Run all four modes over the same input.
pub fn run_workflow_comparison(input: &FinanceWorkflowInput) -> WorkflowComparison {
    WorkflowComparison {
        manual: run_manual_workflow(input),
        agentic: run_agentic_workflow(input),
        ungated: run_ungated_workflow(input),
        gated: run_gated_workflow(input),
    }
}

/// A representative reversal request: high amount, confident model, one
/// checklist box unticked, no explicit approval yet.
pub fn sample_input() -> FinanceWorkflowInput {
    FinanceWorkflowInput {
        request_id: format!("fin-req-{}", uuid::Uuid::new_v4()),
        amount_usd: 125_000,
        source_account: "ops-usd-001".to_string(),
        destination_account: "vendor-usd-879".to_string(),
        model_confidence: 0.82,
        evidence: FinanceEvidence {
            ticket_linked: true,
            ledger_snapshot: true,
            beneficiary_validated: false,
        },
        approval_token: None,
        identity: serde_json::json!({
            "agent_id": "agent:finance/approval-bot",
            "owner_id": "org:agentgate-demo",
            "control_class": "human-directed",
            "attestation": {
                "issuer": "agentgate-verifier",
                "evidence": "signed-token",
                "issued_at": chrono::Utc::now().to_rfc3339(),
                "trust_tier": "high"
            }
        }),
    }
}
