// request.rs — Policy request model and wire normalization.
//
// Two field-naming conventions exist on the wire: the canonical
// snake_case names and a legacy camelCase alias set (writeRisk,
// approvalToken, allowedControlClasses, trustTierAllowlist). Both are
// accepted at the boundary and normalized into the one canonical
// PolicyRequest here; nothing downstream ever sees which alias arrived.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use ag_identity::ControlClass;

use crate::error::PolicyError;

/// Classification of an action's potential for harmful mutation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WriteRisk {
    /// No mutation at all.
    #[default]
    ReadOnly,
    /// Mutation with limited blast radius.
    WriteLowRisk,
    /// Mutation that demands explicit human approval.
    WriteHighRisk,
}

/// A request to perform an action — submitted for policy evaluation
/// together with a validated identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PolicyRequest {
    /// What the agent wants to do (e.g., "deploy").
    pub action: String,
    /// What it wants to do it to (e.g., "prod:api").
    pub resource: String,
    /// Risk classification of the action. Defaults to read_only.
    #[serde(default)]
    pub write_risk: WriteRisk,
    /// Evidence that a human explicitly approved a high-risk action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_token: Option<String>,
    /// Control classes permitted to perform this action. `None` or an
    /// empty list means no restriction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_control_classes: Option<Vec<ControlClass>>,
    /// Trust tiers permitted to perform this action. `None` or an empty
    /// list means no restriction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_tier_allowlist: Option<Vec<String>>,
}

impl PolicyRequest {
    /// Parse a raw wire payload, accepting both canonical snake_case
    /// fields and their legacy camelCase aliases.
    ///
    /// When both spellings of a field are supplied, the canonical one
    /// wins. Empty `action`/`resource` are not wire errors — they flow
    /// through to evaluation, which denies them with a reason code.
    pub fn from_wire(raw: &Value) -> Result<Self, PolicyError> {
        let wire: WireRequest = serde_json::from_value(raw.clone())?;
        Ok(Self {
            action: wire.action,
            resource: wire.resource,
            write_risk: wire.write_risk.or(wire.write_risk_legacy).unwrap_or_default(),
            approval_token: wire.approval_token.or(wire.approval_token_legacy),
            allowed_control_classes: wire
                .allowed_control_classes
                .or(wire.allowed_control_classes_legacy),
            trust_tier_allowlist: wire
                .trust_tier_allowlist
                .or(wire.trust_tier_allowlist_legacy),
        })
    }
}

/// The raw wire shape — both naming conventions, all optional. Private:
/// normalization happens once, at the boundary.
#[derive(Deserialize)]
struct WireRequest {
    #[serde(default)]
    action: String,
    #[serde(default)]
    resource: String,
    write_risk: Option<WriteRisk>,
    #[serde(rename = "writeRisk")]
    write_risk_legacy: Option<WriteRisk>,
    approval_token: Option<String>,
    #[serde(rename = "approvalToken")]
    approval_token_legacy: Option<String>,
    allowed_control_classes: Option<Vec<ControlClass>>,
    #[serde(rename = "allowedControlClasses")]
    allowed_control_classes_legacy: Option<Vec<ControlClass>>,
    trust_tier_allowlist: Option<Vec<String>>,
    #[serde(rename = "trustTierAllowlist")]
    trust_tier_allowlist_legacy: Option<Vec<String>>,
}
