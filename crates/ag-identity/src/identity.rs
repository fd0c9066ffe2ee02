// identity.rs — Agent identity and attestation data model.
//
// An identity is a claim, not a verified fact. The structural validator
// checks shape; attestation evidence is only ever checked by an
// AttestationVerifier implementation (see verifier.rs).

use serde::{Deserialize, Serialize};

/// How much human oversight governs an agent's actions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ControlClass {
    /// The agent acts without a human in the loop.
    #[serde(rename = "autonomous")]
    Autonomous,
    /// A human monitors the agent and can intervene.
    #[serde(rename = "human-supervised")]
    HumanSupervised,
    /// A human directs each significant action.
    #[serde(rename = "human-directed")]
    HumanDirected,
}

impl ControlClass {
    /// The wire token for this control class (e.g., "human-supervised").
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlClass::Autonomous => "autonomous",
            ControlClass::HumanSupervised => "human-supervised",
            ControlClass::HumanDirected => "human-directed",
        }
    }

    /// Parse a wire token into a control class. Unknown tokens yield None.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "autonomous" => Some(ControlClass::Autonomous),
            "human-supervised" => Some(ControlClass::HumanSupervised),
            "human-directed" => Some(ControlClass::HumanDirected),
            _ => None,
        }
    }
}

/// A claim, backed by an issuer, about an agent's trust level.
///
/// `issued_at` stays a string in the model; the structural validator
/// checks that it parses as an ISO-8601 datetime so the original wire
/// value round-trips unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attestation {
    /// Who issued this attestation (e.g., "org-verifier").
    pub issuer: String,
    /// Opaque evidence blob (e.g., a signed token). Not verified here.
    pub evidence: String,
    /// When the attestation was issued (ISO-8601 datetime string).
    pub issued_at: String,
    /// Assurance label grouping attestations (e.g., "high").
    pub trust_tier: String,
}

/// An agent's claimed identity.
///
/// Attestation is structurally optional but may be contextually mandatory:
/// policy-gated flows pass `require_attestation = true` to
/// [`validate`](crate::validate), internal/manual flows typically do not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentIdentity {
    /// Which agent this is (e.g., "agent:finance/approval-bot").
    pub agent_id: String,
    /// Which principal owns and answers for the agent.
    pub owner_id: String,
    /// Oversight level governing the agent.
    pub control_class: ControlClass,
    /// Optional trust-tier claim. `Option<T>` serializes as null/absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attestation: Option<Attestation>,
}
