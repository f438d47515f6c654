use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::{server::AppState, types::SessionStatus};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn status(Extension(state): Extension<AppState>) -> Json<SessionStatus> {
    let mode = state.zoom.settings().call_mode;
    Json(state.session.status(mode).await)
}
