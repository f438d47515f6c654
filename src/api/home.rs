use axum::{Extension, response::Html};

use crate::{
    config::CallMode,
    server::AppState,
    utils::{escape_html, render_page},
};

const CALLER_FIELDS: &str = r#"    <p>
      <label>Caller type
        <select name="caller_number_type">
          <option value="phone_number">Phone number</option>
          <option value="extension_number">Extension number</option>
        </select>
      </label>
    </p>
    <p><label>Caller number <input name="caller_number" required></label></p>
"#;

/// Landing page: authorization state, a link to start the OAuth flow and
/// the call form.
pub async fn home(Extension(state): Extension<AppState>) -> Html<String> {
    let mode = state.zoom.settings().call_mode;
    let status = state.session.status(mode).await;

    let mut body = String::new();
    if status.authorized {
        body.push_str("  <p>Status: <strong>authorized</strong>");
        if let Some(id) = &status.user_id {
            body.push_str(&format!(" as <code>{}</code>", escape_html(id)));
        }
        body.push_str("</p>\n");
    } else {
        body.push_str("  <p>Status: <strong>not authorized</strong></p>\n");
    }
    body.push_str("  <p><a href=\"/authorize\">Authorize with Zoom</a></p>\n");

    body.push_str("  <form method=\"post\" action=\"/make-call\">\n");
    body.push_str("    <p><label>Extension <input name=\"extension\" required></label></p>\n");
    if mode == CallMode::Admin {
        body.push_str(CALLER_FIELDS);
    }
    body.push_str("    <button type=\"submit\">Call</button>\n  </form>");

    Html(render_page("Zoom Phone dialer", &body))
}
