//! Explicit session built from a JWT

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::AccessToken;
use super::TokenProvider;
use crate::error::AuthError;

/// Claims the dashboard reads from the token payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Claims {
    /// Subject: the signed-in user's `cin`.
    pub sub: String,
    /// Role granted by the backend, if present.
    #[serde(default)]
    pub role: Option<String>,
    /// Expiry as seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

/// A signed-in user's session: the raw bearer token plus its decoded claims.
///
/// Screens receive a session on construction instead of reading ambient
/// storage. The token is decoded, never verified; the backend is the
/// authority on whether it is valid.
///
/// # Example
///
/// ```ignore
/// let session = Session::from_token(raw_jwt)?;
/// let client = EquipProClient::builder()
///     .url("http://localhost:8080")
///     .token_provider(session.clone())
///     .build()?;
/// let tickets = client.owner_tickets(session.subject()).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    claims: Claims,
}

impl Session {
    /// Decodes the payload segment of a JWT.
    pub fn from_token(token: impl Into<String>) -> Result<Self, AuthError> {
        let token = token.into();
        let token = token.trim().to_string();

        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => {
                return Err(AuthError::MalformedToken(
                    "expected three dot-separated segments".to_string(),
                ));
            }
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| AuthError::Encoding(e.to_string()))?;

        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| AuthError::Parse(e.to_string()))?;
        if value.get("sub").is_none() {
            return Err(AuthError::MissingClaim("sub"));
        }
        let claims: Claims =
            serde_json::from_value(value).map_err(|e| AuthError::Parse(e.to_string()))?;

        log::debug!("session decoded for subject {}", claims.sub);
        Ok(Self { token, claims })
    }

    /// Returns the raw bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the decoded claims.
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Returns the signed-in user's `cin`.
    pub fn subject(&self) -> &str {
        &self.claims.sub
    }

    /// Returns the expiry time, if the token carries one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims
            .exp
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Returns `true` if the token's `exp` has passed.
    ///
    /// Tokens without `exp` never expire client-side.
    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|exp| Utc::now() >= exp)
    }

    /// Returns the session as an access token.
    pub fn access_token(&self) -> AccessToken {
        match self.expires_at() {
            Some(exp) => AccessToken::with_expiry(self.token.clone(), exp),
            None => AccessToken::new(self.token.clone()),
        }
    }
}

#[async_trait]
impl TokenProvider for Session {
    async fn get_token(&self) -> Result<AccessToken, AuthError> {
        Ok(self.access_token())
    }
}
