use std::{net::SocketAddr, str::FromStr};

use axum::{
    Extension, Router,
    routing::{get, post},
};

use crate::{Res, api, management::SessionManager, zoom::ZoomClient};

/// Shared state handed to every route through an [`Extension`] layer.
#[derive(Debug, Clone)]
pub struct AppState {
    pub zoom: ZoomClient,
    pub session: SessionManager,
}

impl AppState {
    pub fn new(zoom: ZoomClient) -> Self {
        Self {
            zoom,
            session: SessionManager::new(),
        }
    }
}

/// Builds the router with all routes bound to `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/authorize", get(api::authorize))
        .route("/callback", get(api::callback))
        .route("/make-call", post(api::make_call))
        .route("/webhook", post(api::webhook))
        .route("/status", get(api::status))
        .route("/health", get(api::health))
        .layer(Extension(state))
}

/// Binds `host:port` and serves until the process is stopped.
pub async fn start_api_server(state: AppState, host: &str, port: u16) -> Res<()> {
    let addr = SocketAddr::from_str(&format!("{host}:{port}"))
        .map_err(|e| format!("Failed to parse server address {host}:{port}: {e}"))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
