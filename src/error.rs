use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Every failure a route handler can surface to its caller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authorization code not found. Please try again.")]
    MissingCode,

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Access token not found in token response")]
    MissingToken,

    #[error("Failed to resolve Zoom user: {0}")]
    ProfileLookup(String),

    #[error("Not authorized. Visit /authorize first.")]
    NotAuthorized,

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Call failed: {message}")]
    CallFailed { status: u16, message: String },

    #[error("Call request failed: {0}")]
    CallRequest(String),

    #[error("Content-Type must be application/json")]
    InvalidContentType,

    #[error("Invalid webhook payload: {0}")]
    WebhookParse(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingCode
            | AppError::MissingParameter(_)
            | AppError::InvalidContentType => StatusCode::BAD_REQUEST,
            AppError::NotAuthorized => StatusCode::UNAUTHORIZED,
            AppError::CallFailed { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            AppError::TokenExchange(_)
            | AppError::MissingToken
            | AppError::ProfileLookup(_)
            | AppError::CallRequest(_)
            | AppError::WebhookParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::CallFailed { status, .. } => json!({
                "status": "error",
                "message": self.to_string(),
                "status_code": status,
            }),
            _ => json!({ "status": "error", "message": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_category() {
        assert_eq!(AppError::MissingCode.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::MissingParameter("extension").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotAuthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::MissingToken.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn call_failed_forwards_only_error_statuses() {
        let forwarded = AppError::CallFailed {
            status: 404,
            message: "User does not exist".into(),
        };
        assert_eq!(forwarded.status_code(), StatusCode::NOT_FOUND);

        let odd = AppError::CallFailed {
            status: 204,
            message: String::new(),
        };
        assert_eq!(odd.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
