use axum::{Json, body::Bytes, http::HeaderMap};
use serde_json::{Value, json};

use crate::{
    error::AppError,
    info,
    types::{CallObject, WebhookEvent},
    utils::{is_json_content_type, json_scalar_to_string},
    warning,
};

pub const NO_EXTENSION: &str = "No extension";

/// Call metadata from a webhook event, rendered as text for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFields {
    pub id: Option<String>,
    pub caller_number: Option<String>,
    pub callee_number: Option<String>,
    pub date_time: Option<String>,
    pub extension_number: String,
}

/// Extracts the logged fields. Numbers are rendered as text and a missing
/// extension becomes [`NO_EXTENSION`].
pub fn call_fields(call: &CallObject) -> CallFields {
    let field = |value: &Option<Value>| value.as_ref().and_then(json_scalar_to_string);

    CallFields {
        id: field(&call.id),
        caller_number: field(&call.caller_number),
        callee_number: field(&call.callee_number),
        date_time: field(&call.date_time),
        extension_number: field(&call.extension_number)
            .unwrap_or_else(|| NO_EXTENSION.to_string()),
    }
}

/// Receives a Zoom Phone event and logs the call metadata it carries.
///
/// The payload is not signature-checked; see the module docs.
pub async fn webhook(headers: HeaderMap, body: Bytes) -> Result<Json<Value>, AppError> {
    if !is_json_content_type(&headers) {
        warning!("Webhook rejected: content type is not JSON");
        return Err(AppError::InvalidContentType);
    }

    let event: WebhookEvent = serde_json::from_slice(&body).map_err(|e| {
        warning!("Webhook payload could not be parsed: {}", e);
        AppError::WebhookParse(e.to_string())
    })?;

    let call = call_fields(&event.payload.object);
    let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".into());

    info!("Webhook event: {}", event.event);
    info!("  call id:   {}", or_dash(&call.id));
    info!("  caller:    {}", or_dash(&call.caller_number));
    info!("  callee:    {}", or_dash(&call.callee_number));
    info!("  date/time: {}", or_dash(&call.date_time));
    info!("  extension: {}", call.extension_number);

    Ok(Json(json!({ "status": "received", "event": event.event })))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn call_object(value: Value) -> CallObject {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_extension_uses_placeholder() {
        let fields = call_fields(&call_object(json!({
            "caller_number": "100",
            "callee_number": "200",
            "id": "abc",
            "date_time": "t"
        })));

        assert_eq!(fields.extension_number, NO_EXTENSION);
        assert_eq!(fields.id.as_deref(), Some("abc"));
        assert_eq!(fields.caller_number.as_deref(), Some("100"));
        assert_eq!(fields.callee_number.as_deref(), Some("200"));
        assert_eq!(fields.date_time.as_deref(), Some("t"));
    }

    #[test]
    fn null_extension_uses_placeholder() {
        let fields = call_fields(&call_object(json!({ "extension_number": null })));
        assert_eq!(fields.extension_number, NO_EXTENSION);
        assert_eq!(fields.id, None);
    }

    #[test]
    fn numeric_fields_render_as_text() {
        let fields = call_fields(&call_object(json!({
            "caller_number": 15550100,
            "extension_number": 1001
        })));

        assert_eq!(fields.caller_number.as_deref(), Some("15550100"));
        assert_eq!(fields.extension_number, "1001");
    }
}
