//! Deal namespace payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RawId;

/// `send_deal_request{dealId, companyUserId, details}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendDealRequestPayload {
    pub deal_id: RawId,
    pub company_user_id: RawId,
    #[serde(default)]
    pub details: Value,
}

/// `accept_deal{dealId, creatorUserId}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptDealPayload {
    pub deal_id: RawId,
    pub creator_user_id: RawId,
}

/// `reject_deal{dealId, creatorUserId, reason}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectDealPayload {
    pub deal_id: RawId,
    pub creator_user_id: RawId,
    #[serde(default)]
    pub reason: Option<String>,
}

/// `new_deal_request`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDealRequest {
    pub deal_id: String,
    pub from_user_id: String,
    pub from_username: String,
    pub details: Value,
    pub timestamp: String,
}

/// `deal_accepted`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealAccepted {
    pub deal_id: String,
    pub accepted_by: String,
    pub timestamp: String,
}

/// `deal_rejected`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRejected {
    pub deal_id: String,
    pub rejected_by: String,
    pub reason: Option<String>,
    pub timestamp: String,
}
