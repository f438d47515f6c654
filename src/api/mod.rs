//! # API Module
//!
//! HTTP route handlers for the zoomdial web server.
//!
//! ## Endpoints
//!
//! ### Authorization
//!
//! - [`home`] - `GET /`, landing page with the authorization link and call form
//! - [`authorize`] - `GET /authorize`, redirects the browser to Zoom's consent page
//! - [`callback`] - `GET /callback?code=`, exchanges the code and stores the session
//!
//! ### Calls
//!
//! - [`make_call`] - `POST /make-call`, places a Zoom Phone call to an extension
//! - [`webhook`] - `POST /webhook`, receives Zoom Phone event notifications
//!
//! ### Monitoring
//!
//! - [`health`] - `GET /health`, liveness check with no dependencies
//! - [`status`] - `GET /status`, whether the bridge currently holds an authorization
//!
//! ## Security Considerations
//!
//! Webhook payloads are **not** verified. Zoom signs each delivery with an
//! `x-zm-signature` header; a deployment reachable from the internet should
//! check it before trusting any event. Until then treat webhook data as
//! untrusted input that is only logged.
//!
//! All failures are returned as [`AppError`](crate::error::AppError), which
//! renders a `{"status":"error","message":...}` body with the matching status.

mod authorize;
mod call;
mod callback;
mod health;
mod home;
mod webhook;

pub use authorize::authorize;
pub use call::make_call;
pub use callback::callback;
pub use health::{health, status};
pub use home::home;
pub use webhook::webhook;
