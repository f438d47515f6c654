use chrono::Utc;
use serde_json::Value;

use crate::{
    error::AppError,
    info,
    types::{Token, UserProfile},
    warning,
};

use super::ZoomClient;

impl ZoomClient {
    /// Builds the URL the browser is redirected to for user consent.
    ///
    /// `redirect_uri` and `scope` are percent-encoded with nothing left
    /// unescaped, so spaces become `%20` and `:`/`/` are encoded as well.
    ///
    /// # Example
    ///
    /// ```text
    /// https://zoom.us/oauth/authorize?response_type=code&client_id=abc
    ///     &redirect_uri=http%3A%2F%2Flocalhost%3A5000%2Fcallback
    ///     &scope=phone%3Awrite%20phone%3Aread
    /// ```
    pub fn authorize_url(&self) -> String {
        let settings = &self.settings;
        format!(
            "{auth_url}?response_type=code&client_id={client_id}&redirect_uri={redirect_uri}&scope={scope}",
            auth_url = settings.auth_url,
            client_id = settings.client_id,
            redirect_uri = urlencoding::encode(&settings.redirect_uri),
            scope = urlencoding::encode(&settings.scope),
        )
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// Authenticates with the client credentials over HTTP Basic and posts
    /// `grant_type=authorization_code`, the code and the redirect URI.
    ///
    /// # Errors
    ///
    /// - [`AppError::TokenExchange`] on transport failure, a non-2xx status
    ///   (the upstream body is included) or an unparseable body
    /// - [`AppError::MissingToken`] when the response has no `access_token`
    pub async fn exchange_code(&self, code: &str) -> Result<Token, AppError> {
        let settings = &self.settings;
        let res = self
            .http
            .post(&settings.token_url)
            .basic_auth(&settings.client_id, Some(&settings.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", settings.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::TokenExchange(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| AppError::TokenExchange(e.to_string()))?;

        if !status.is_success() {
            return Err(AppError::TokenExchange(format!("{status}: {body}")));
        }

        let json: Value =
            serde_json::from_str(&body).map_err(|e| AppError::TokenExchange(e.to_string()))?;

        token_from_response(&json)
    }

    /// Resolves the id of the user the access token belongs to.
    ///
    /// Any failure, including a profile without an `id`, is reported as
    /// [`AppError::ProfileLookup`].
    pub async fn fetch_user_id(&self, access_token: &str) -> Result<String, AppError> {
        let url = format!("{}/users/me", self.settings.api_url);
        let res = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ProfileLookup(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::ProfileLookup(format!("{status}: {body}")));
        }

        let profile: UserProfile = res
            .json()
            .await
            .map_err(|e| AppError::ProfileLookup(e.to_string()))?;

        if profile.id.is_empty() {
            return Err(AppError::ProfileLookup("profile has an empty id".into()));
        }

        if let Some(email) = &profile.email {
            info!("Zoom user {} is {}", profile.id, email);
        }

        Ok(profile.id)
    }
}

/// Extracts a [`Token`] from a token endpoint response body.
///
/// Only `access_token` is mandatory. `expires_in` is logged for the operator
/// but never enforced, and the refresh token is kept without being used.
pub fn token_from_response(json: &Value) -> Result<Token, AppError> {
    let access_token = json["access_token"]
        .as_str()
        .filter(|t| !t.is_empty())
        .ok_or(AppError::MissingToken)?
        .to_string();

    let expires_in = json["expires_in"].as_u64();
    match expires_in {
        Some(secs) => info!("Access token obtained, expires in {} seconds", secs),
        None => warning!("Access token obtained without expires_in"),
    }

    Ok(Token {
        access_token,
        refresh_token: json["refresh_token"].as_str().map(str::to_string),
        scope: json["scope"].as_str().map(str::to_string),
        expires_in,
        obtained_at: Utc::now().timestamp(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn token_requires_access_token() {
        let err = token_from_response(&json!({ "refresh_token": "r" })).unwrap_err();
        assert!(matches!(err, AppError::MissingToken));

        let err = token_from_response(&json!({ "access_token": "" })).unwrap_err();
        assert!(matches!(err, AppError::MissingToken));
    }

    #[test]
    fn token_keeps_optional_fields() {
        let token = token_from_response(&json!({
            "access_token": "a",
            "refresh_token": "r",
            "expires_in": 3599,
            "scope": "phone:read"
        }))
        .unwrap();

        assert_eq!(token.access_token, "a");
        assert_eq!(token.refresh_token.as_deref(), Some("r"));
        assert_eq!(token.expires_in, Some(3599));
        assert_eq!(token.scope.as_deref(), Some("phone:read"));
    }

    #[test]
    fn profile_email_is_optional() {
        let profile: UserProfile =
            serde_json::from_value(json!({ "id": "u-1", "email": "a@example.com" })).unwrap();
        assert_eq!(profile.email.as_deref(), Some("a@example.com"));

        let profile: UserProfile = serde_json::from_value(json!({ "id": "u-1" })).unwrap();
        assert_eq!(profile.id, "u-1");
        assert_eq!(profile.email, None);
    }
}
