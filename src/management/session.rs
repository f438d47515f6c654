use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::{
    config::CallMode,
    error::AppError,
    types::{SessionStatus, SessionToken, Token},
};

/// Single-entry store for the current authorization.
///
/// Cloning is cheap and every clone shares the same slot. The mutex only
/// serialises reads and writes of the slot; an authorization racing with a
/// call still sees either the old or the new token, never a mix.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    inner: Arc<Mutex<SessionToken>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored authorization with a freshly obtained one.
    pub async fn store(&self, token: Token, user_id: Option<String>) {
        let mut state = self.inner.lock().await;
        *state = SessionToken {
            token: Some(token),
            user_id,
        };
    }

    /// Returns the access token and user id a call needs.
    ///
    /// Fails with [`AppError::NotAuthorized`] when no token is held or, in
    /// user mode, when the user id was never resolved.
    pub async fn credentials(
        &self,
        mode: CallMode,
    ) -> Result<(String, Option<String>), AppError> {
        let state = self.inner.lock().await;
        let access_token = state
            .token
            .as_ref()
            .map(|t| t.access_token.clone())
            .filter(|t| !t.is_empty())
            .ok_or(AppError::NotAuthorized)?;

        if mode.requires_user_id() && state.user_id.is_none() {
            return Err(AppError::NotAuthorized);
        }

        Ok((access_token, state.user_id.clone()))
    }

    pub async fn snapshot(&self) -> SessionToken {
        self.inner.lock().await.clone()
    }

    pub async fn status(&self, mode: CallMode) -> SessionStatus {
        let state = self.snapshot().await;
        let expiry = state.token.as_ref().and_then(expires_at);

        SessionStatus {
            authorized: state.token.is_some()
                && (!mode.requires_user_id() || state.user_id.is_some()),
            user_id: state.user_id,
            call_mode: mode.to_string(),
            expires_at: expiry.map(|t| t.to_rfc3339()),
        }
    }

    pub async fn clear(&self) {
        *self.inner.lock().await = SessionToken::default();
    }
}

/// Wall-clock expiry derived from `obtained_at + expires_in`. Informational only.
pub fn expires_at(token: &Token) -> Option<DateTime<Utc>> {
    let expires_in = i64::try_from(token.expires_in?).ok()?;
    DateTime::from_timestamp(token.obtained_at.checked_add(expires_in)?, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(access: &str) -> Token {
        Token {
            access_token: access.to_string(),
            refresh_token: Some("refresh".to_string()),
            scope: None,
            expires_in: Some(3600),
            obtained_at: 1_700_000_000,
        }
    }

    #[tokio::test]
    async fn empty_session_is_not_authorized() {
        let session = SessionManager::new();
        assert!(matches!(
            session.credentials(CallMode::Admin).await,
            Err(AppError::NotAuthorized)
        ));
    }

    #[tokio::test]
    async fn user_mode_requires_user_id() {
        let session = SessionManager::new();
        session.store(token("abc"), None).await;

        assert!(session.credentials(CallMode::Admin).await.is_ok());
        assert!(matches!(
            session.credentials(CallMode::User).await,
            Err(AppError::NotAuthorized)
        ));

        session.store(token("def"), Some("u-1".to_string())).await;
        let (access, user) = session.credentials(CallMode::User).await.unwrap();
        assert_eq!(access, "def");
        assert_eq!(user.as_deref(), Some("u-1"));
    }

    #[tokio::test]
    async fn clones_share_state_and_clear_resets() {
        let session = SessionManager::new();
        let other = session.clone();
        other.store(token("abc"), Some("u-1".to_string())).await;
        assert!(session.status(CallMode::User).await.authorized);

        session.clear().await;
        assert!(!other.status(CallMode::User).await.authorized);
    }

    #[test]
    fn expiry_is_obtained_at_plus_expires_in() {
        let at = expires_at(&token("abc")).unwrap();
        assert_eq!(at.timestamp(), 1_700_003_600);
    }
}
