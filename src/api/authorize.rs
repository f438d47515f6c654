use axum::{Extension, response::Redirect};

use crate::{info, server::AppState};

/// Sends the browser to Zoom's consent page. Never fails.
pub async fn authorize(Extension(state): Extension<AppState>) -> Redirect {
    let settings = state.zoom.settings();
    info!(
        "Redirecting to Zoom authorization ({} mode, scope '{}')",
        settings.call_mode, settings.scope
    );
    Redirect::to(&state.zoom.authorize_url())
}
