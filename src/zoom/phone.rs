use reqwest::StatusCode;
use serde_json::{Map, Value, json};

use crate::{config::CallMode, error::AppError};

use super::ZoomClient;

/// A validated call request, ready to be turned into a provider payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedCall {
    Admin {
        extension: String,
        caller_number_type: String,
        caller_number: String,
    },
    User {
        user_id: String,
        extension: String,
    },
}

impl PlannedCall {
    /// Path relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            PlannedCall::Admin { .. } => "/phone/call".to_string(),
            PlannedCall::User { user_id, .. } => {
                format!("/phone/users/{}/call_command", urlencoding::encode(user_id))
            }
        }
    }

    pub fn extension(&self) -> &str {
        match self {
            PlannedCall::Admin { extension, .. } | PlannedCall::User { extension, .. } => extension,
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            PlannedCall::Admin {
                extension,
                caller_number_type,
                caller_number,
            } => admin_payload(extension, caller_number_type, caller_number),
            PlannedCall::User { extension, .. } => call_command_payload(extension),
        }
    }
}

/// Builds the admin-style body: `{to_contact: {extension_number}, from_contact: {<type>: <number>}}`.
pub fn admin_payload(extension: &str, caller_number_type: &str, caller_number: &str) -> Value {
    let mut from_contact = Map::new();
    from_contact.insert(
        caller_number_type.to_string(),
        Value::String(caller_number.to_string()),
    );

    json!({
        "to_contact": { "extension_number": extension },
        "from_contact": from_contact,
    })
}

/// Builds the user-style body: `{commands: [{command: "call", params: {callee: {extension_number}}}]}`.
pub fn call_command_payload(extension: &str) -> Value {
    json!({
        "commands": [
            { "command": "call", "params": { "callee": { "extension_number": extension } } }
        ]
    })
}

fn required(value: Option<&str>, name: &'static str) -> Result<String, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(AppError::MissingParameter(name))
}

/// Validates the raw form fields for the active call mode.
///
/// `extension` is always required; admin mode additionally requires
/// `caller_number_type` and `caller_number`. User mode requires the resolved
/// user id, whose absence means the session was never authorized.
pub fn plan_call(
    mode: CallMode,
    user_id: Option<&str>,
    extension: Option<&str>,
    caller_number_type: Option<&str>,
    caller_number: Option<&str>,
) -> Result<PlannedCall, AppError> {
    let extension = required(extension, "extension")?;

    match mode {
        CallMode::Admin => Ok(PlannedCall::Admin {
            extension,
            caller_number_type: required(caller_number_type, "caller_number_type")?,
            caller_number: required(caller_number, "caller_number")?,
        }),
        CallMode::User => Ok(PlannedCall::User {
            user_id: user_id
                .map(str::to_string)
                .ok_or(AppError::NotAuthorized)?,
            extension,
        }),
    }
}

impl ZoomClient {
    /// Issues a single call request with bearer authentication.
    ///
    /// `200 OK` and `201 Created` count as success and yield the response
    /// body (an empty body becomes `{}`). Any other status becomes
    /// [`AppError::CallFailed`] carrying the upstream `message` and status;
    /// transport failures become [`AppError::CallRequest`].
    pub async fn place_call(
        &self,
        access_token: &str,
        call: &PlannedCall,
    ) -> Result<Value, AppError> {
        let url = format!("{}{}", self.settings.api_url, call.path());
        let res = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .json(&call.payload())
            .send()
            .await
            .map_err(|e| AppError::CallRequest(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| AppError::CallRequest(e.to_string()))?;

        if status == StatusCode::OK || status == StatusCode::CREATED {
            if body.trim().is_empty() {
                return Ok(Value::Object(Map::new()));
            }
            return Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)));
        }

        Err(AppError::CallFailed {
            status: status.as_u16(),
            message: upstream_message(&body),
        })
    }
}

/// Pulls the human-readable `message` out of a Zoom error body, falling back
/// to the raw text.
pub fn upstream_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_payload_shape() {
        assert_eq!(
            admin_payload("1001", "phone_number", "+15550100"),
            json!({
                "to_contact": { "extension_number": "1001" },
                "from_contact": { "phone_number": "+15550100" }
            })
        );
    }

    #[test]
    fn call_command_payload_shape() {
        assert_eq!(
            call_command_payload("1001"),
            json!({
                "commands": [
                    { "command": "call", "params": { "callee": { "extension_number": "1001" } } }
                ]
            })
        );
    }

    #[test]
    fn admin_mode_requires_caller_fields() {
        let err = plan_call(CallMode::Admin, None, Some("1001"), None, Some("5")).unwrap_err();
        assert!(matches!(err, AppError::MissingParameter("caller_number_type")));

        let err =
            plan_call(CallMode::Admin, None, Some("1001"), Some("phone_number"), Some(" "))
                .unwrap_err();
        assert!(matches!(err, AppError::MissingParameter("caller_number")));
    }

    #[test]
    fn extension_is_always_required() {
        let err = plan_call(CallMode::User, Some("u"), None, None, None).unwrap_err();
        assert!(matches!(err, AppError::MissingParameter("extension")));
    }

    #[test]
    fn user_mode_addresses_the_user() {
        let call = plan_call(CallMode::User, Some("abc"), Some("1001"), None, None).unwrap();
        assert_eq!(call.path(), "/phone/users/abc/call_command");
        assert_eq!(call.extension(), "1001");
    }

    #[test]
    fn upstream_message_prefers_json_message() {
        assert_eq!(
            upstream_message(r#"{"code":404,"message":"User does not exist"}"#),
            "User does not exist"
        );
        assert_eq!(upstream_message("Bad Gateway\n"), "Bad Gateway");
    }
}
