use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{
    error::AppError,
    server::AppState,
    success,
    utils::{escape_html, render_page},
    warning,
};

/// Completes the authorization code flow.
///
/// Exchanges `code` for a token, resolves the user id when the call mode
/// needs it, and overwrites the stored session. The session is only touched
/// once every step succeeded.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
) -> Result<Html<String>, AppError> {
    let Some(code) = params.get("code").filter(|c| !c.is_empty()) else {
        warning!("Callback hit without an authorization code");
        return Err(AppError::MissingCode);
    };

    let token = state
        .zoom
        .exchange_code(code)
        .await
        .inspect_err(|e| warning!("{}", e))?;

    let mode = state.zoom.settings().call_mode;
    let user_id = if mode.requires_user_id() {
        let id = state
            .zoom
            .fetch_user_id(&token.access_token)
            .await
            .inspect_err(|e| warning!("{}", e))?;
        success!("Resolved Zoom user {}", id);
        Some(id)
    } else {
        None
    };

    state.session.store(token, user_id.clone()).await;
    success!("Authorization complete ({} mode)", mode);

    let mut body = String::from("  <p>Access token received. You can now place calls.</p>\n");
    if let Some(id) = user_id {
        body.push_str(&format!(
            "  <p>Authorized user: <code>{}</code></p>\n",
            escape_html(&id)
        ));
    }
    body.push_str("  <p><a href=\"/\">Back to the dialer</a></p>");

    Ok(Html(render_page("Authorization successful", &body)))
}
