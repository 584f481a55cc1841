//! Contract namespace payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RawId;

/// `subscribe_contract`: a bare contract id or `{contractId}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContractRef {
    Bare(RawId),
    #[serde(rename_all = "camelCase")]
    Object { contract_id: RawId },
}

impl ContractRef {
    pub fn into_string(self) -> String {
        match self {
            ContractRef::Bare(id) | ContractRef::Object { contract_id: id } => id.into_string(),
        }
    }
}

/// `term_accepted{contractId, termId, role, userId}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermAcceptedPayload {
    pub contract_id: RawId,
    pub term_id: RawId,
    pub role: String,
}

/// `term_updated{contractId, termId, updates, updatedBy}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermUpdatedPayload {
    pub contract_id: RawId,
    pub term_id: RawId,
    #[serde(default)]
    pub updates: Value,
}

/// `contract_confirmed{contractId, confirmedBy}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractConfirmedPayload {
    pub contract_id: RawId,
}

/// `term_status_changed`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermStatusChanged {
    pub contract_id: String,
    pub term_id: String,
    pub role: String,
    pub status: String,
    pub accepted_by: String,
    pub timestamp: String,
}

/// `term_content_changed`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermContentChanged {
    pub contract_id: String,
    pub term_id: String,
    pub updates: Value,
    pub updated_by: String,
    pub timestamp: String,
}

/// `contract_status_changed`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractStatusChanged {
    pub contract_id: String,
    pub status: String,
    pub confirmed_by: String,
    pub timestamp: String,
}
