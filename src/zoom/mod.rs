//! # Zoom Integration Module
//!
//! This module is the only place that talks to Zoom over HTTP. It covers the
//! OAuth 2.0 authorization code flow and the Zoom Phone endpoints used to
//! place calls.
//!
//! ## Endpoints
//!
//! - `GET  {auth_url}` - browser redirect target, see [`ZoomClient::authorize_url`]
//! - `POST {token_url}` - code exchange, see [`ZoomClient::exchange_code`]
//! - `GET  {api_url}/users/me` - profile lookup, see [`ZoomClient::fetch_user_id`]
//! - `POST {api_url}/phone/call` - admin-mode call
//! - `POST {api_url}/phone/users/{user_id}/call_command` - user-mode call
//!
//! ## Error Handling
//!
//! Every request uses one shared [`reqwest::Client`] with a 10 second timeout.
//! Nothing is retried: a failed request maps straight onto an
//! [`AppError`](crate::error::AppError) variant carrying the upstream message.

use std::time::Duration;

use reqwest::Client;

use crate::config::Settings;

pub mod auth;
pub mod phone;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ZoomClient {
    http: Client,
    settings: Settings,
}

impl ZoomClient {
    pub fn new(settings: Settings) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
