//! Configuration management for the Zoom dial bridge.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Zoom OAuth credentials, provider endpoints, the active
//! call mode and server settings.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (endpoints, port and call mode only)
//!
//! Client credentials never have a default. A missing `ZOOM_CLIENT_ID` or
//! `ZOOM_CLIENT_SECRET` is reported as [`ConfigError::Missing`].

use std::{env, fmt, path::PathBuf, str::FromStr};

use thiserror::Error;

pub const DEFAULT_AUTH_URL: &str = "https://zoom.us/oauth/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://zoom.us/oauth/token";
pub const DEFAULT_API_URL: &str = "https://api.zoom.us/v2";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

const USER_SCOPES: &str = "phone:write phone:read";
const ADMIN_SCOPES: &str = "phone:write:admin phone:read:admin";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("unknown call mode '{0}', expected 'user' or 'admin'")]
    InvalidCallMode(String),
    #[error("PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),
}

/// Which flavour of the Zoom Phone API the bridge talks to.
///
/// The two payload shapes are mutually exclusive, so exactly one mode is
/// active per process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CallMode {
    /// `POST /phone/users/{user_id}/call_command` with user-level scopes.
    #[default]
    User,
    /// `POST /phone/call` with admin-level scopes and an explicit caller.
    Admin,
}

impl CallMode {
    pub fn default_scopes(&self) -> &'static str {
        match self {
            CallMode::User => USER_SCOPES,
            CallMode::Admin => ADMIN_SCOPES,
        }
    }

    /// User mode needs the authorized user's id to address the call command.
    pub fn requires_user_id(&self) -> bool {
        matches!(self, CallMode::User)
    }
}

impl FromStr for CallMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(CallMode::User),
            "admin" => Ok(CallMode::Admin),
            _ => Err(ConfigError::InvalidCallMode(s.to_string())),
        }
    }
}

impl fmt::Display for CallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallMode::User => write!(f, "user"),
            CallMode::Admin => write!(f, "admin"),
        }
    }
}

/// Fully resolved runtime configuration.
///
/// Built once at startup and shared with every handler, so nothing past
/// startup reads the process environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub scope: String,
    pub call_mode: CallMode,
}

impl Settings {
    /// Assembles [`Settings`] from the environment for a server listening on `port`.
    ///
    /// The port is only used to derive the fallback redirect URI.
    pub fn from_env(port: u16) -> Result<Self, ConfigError> {
        let call_mode = zoom_call_mode()?;
        let scope = zoom_scope().unwrap_or_else(|| call_mode.default_scopes().to_string());

        Ok(Self {
            client_id: zoom_client_id().ok_or(ConfigError::Missing("ZOOM_CLIENT_ID"))?,
            client_secret: zoom_client_secret()
                .ok_or(ConfigError::Missing("ZOOM_CLIENT_SECRET"))?,
            redirect_uri: zoom_redirect_uri()
                .unwrap_or_else(|| format!("http://localhost:{port}/callback")),
            auth_url: zoom_auth_url(),
            token_url: zoom_token_url(),
            api_url: zoom_api_url(),
            scope,
            call_mode,
        })
    }
}

/// Loads environment variables from `.env` files.
///
/// Looks first in the working directory and then in the platform-specific
/// local data directory under `zoomdial/.env`, creating that directory if it
/// doesn't exist. Variables that are already set are never overridden, and a
/// missing file is not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/zoomdial/.env`
/// - macOS: `~/Library/Application Support/zoomdial/.env`
/// - Windows: `%LOCALAPPDATA%/zoomdial/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.to_string()),
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("zoomdial/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(format!("{}: {}", path.display(), e)),
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Returns the host the HTTP listener binds to (`SERVER_HOST`, default `0.0.0.0`).
pub fn server_host() -> String {
    non_empty("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string())
}

/// Returns the listener port (`PORT`, default `5000`).
pub fn server_port() -> Result<u16, ConfigError> {
    match non_empty("PORT") {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw)),
        None => Ok(DEFAULT_PORT),
    }
}

/// Returns the OAuth client id registered with the Zoom marketplace app.
pub fn zoom_client_id() -> Option<String> {
    non_empty("ZOOM_CLIENT_ID")
}

/// Returns the OAuth client secret.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn zoom_client_secret() -> Option<String> {
    non_empty("ZOOM_CLIENT_SECRET")
}

/// Returns the OAuth redirect URI.
///
/// This must match the redirect URI registered in the Zoom app settings.
pub fn zoom_redirect_uri() -> Option<String> {
    non_empty("ZOOM_REDIRECT_URI")
}

pub fn zoom_auth_url() -> String {
    non_empty("ZOOM_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string())
}

pub fn zoom_token_url() -> String {
    non_empty("ZOOM_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string())
}

/// Returns the Zoom REST API base URL without a trailing slash.
pub fn zoom_api_url() -> String {
    non_empty("ZOOM_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Returns the scope override, if any. Without one the call mode's scopes apply.
pub fn zoom_scope() -> Option<String> {
    non_empty("ZOOM_SCOPE")
}

pub fn zoom_call_mode() -> Result<CallMode, ConfigError> {
    match non_empty("ZOOM_CALL_MODE") {
        Some(raw) => raw.parse(),
        None => Ok(CallMode::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_mode_parses_case_insensitively() {
        assert_eq!("User".parse::<CallMode>(), Ok(CallMode::User));
        assert_eq!(" ADMIN ".parse::<CallMode>(), Ok(CallMode::Admin));
        assert_eq!(
            "owner".parse::<CallMode>(),
            Err(ConfigError::InvalidCallMode("owner".to_string()))
        );
    }

    #[test]
    fn scopes_follow_call_mode() {
        assert_eq!(CallMode::User.default_scopes(), "phone:write phone:read");
        assert_eq!(
            CallMode::Admin.default_scopes(),
            "phone:write:admin phone:read:admin"
        );
        assert!(CallMode::User.requires_user_id());
        assert!(!CallMode::Admin.requires_user_id());
    }
}
