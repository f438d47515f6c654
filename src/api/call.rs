use axum::{Extension, Form, Json, extract::rejection::FormRejection};
use serde_json::{Value, json};

use crate::{
    error::AppError, info, server::AppState, success, types::CallRequest, warning,
    zoom::phone::plan_call,
};

/// Places one call to the requested extension.
///
/// Requires a stored authorization; fails with `401` before the form is
/// validated otherwise. A body that isn't a readable form counts as a form
/// with no fields. Each request is a single attempt with no retry.
pub async fn make_call(
    Extension(state): Extension<AppState>,
    form: Result<Form<CallRequest>, FormRejection>,
) -> Result<Json<Value>, AppError> {
    let mode = state.zoom.settings().call_mode;
    let (access_token, user_id) = state
        .session
        .credentials(mode)
        .await
        .inspect_err(|_| warning!("Call attempted before authorization"))?;

    let request = match form {
        Ok(Form(request)) => request,
        Err(rejection) => {
            warning!("Unreadable call form: {}", rejection);
            CallRequest::default()
        }
    };

    let call = plan_call(
        mode,
        user_id.as_deref(),
        request.extension.as_deref(),
        request.caller_number_type.as_deref(),
        request.caller_number.as_deref(),
    )
    .inspect_err(|e| warning!("{}", e))?;

    info!("Calling extension {} ({} mode)", call.extension(), mode);

    let response = state
        .zoom
        .place_call(&access_token, &call)
        .await
        .inspect_err(|e| warning!("Call to extension {} failed: {}", call.extension(), e))?;

    success!("Call initiated to extension {}", call.extension());

    Ok(Json(json!({
        "status": "success",
        "message": format!("Call initiated to extension {}", call.extension()),
        "response": response,
    })))
}
