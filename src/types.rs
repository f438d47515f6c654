use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token returned by the Zoom OAuth token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
    pub obtained_at: i64,
}

/// Process-lifetime authorization state. Overwritten on every successful
/// `/callback`; expiry is recorded but never enforced.
#[derive(Debug, Clone, Default)]
pub struct SessionToken {
    pub token: Option<Token>,
    pub user_id: Option<String>,
}

/// Form posted to `/make-call`.
///
/// The caller fields are only read in admin mode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallRequest {
    pub extension: Option<String>,
    pub caller_number_type: Option<String>,
    pub caller_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Inbound event delivered by the Zoom webhook subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub event: String,
    pub payload: WebhookPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    pub object: CallObject,
}

/// Call metadata inside a webhook event. Zoom sends some of these as
/// strings and others as numbers depending on the event type.
#[derive(Debug, Clone, Deserialize)]
pub struct CallObject {
    pub caller_number: Option<Value>,
    pub callee_number: Option<Value>,
    pub id: Option<Value>,
    pub date_time: Option<Value>,
    pub extension_number: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub authorized: bool,
    pub user_id: Option<String>,
    pub call_mode: String,
    pub expires_at: Option<String>,
}
