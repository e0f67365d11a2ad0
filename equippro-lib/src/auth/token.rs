//! TokenProvider trait and AccessToken

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::error::AuthError;

/// A bearer token with optional expiration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// The bearer token used for API authentication.
    pub access_token: String,
    /// When the token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Creates a new access token with just the token string.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    /// Creates a new access token with expiration time.
    pub fn with_expiry(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Some(expires_at),
        }
    }

    /// Returns `true` if the token has expired.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }
}

/// Trait for providing access tokens to the client.
///
/// The client calls `get_token` before each API request.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use equippro_lib::auth::{AccessToken, TokenProvider};
/// use equippro_lib::error::AuthError;
///
/// struct FileTokenProvider {
///     path: std::path::PathBuf,
/// }
///
/// #[async_trait]
/// impl TokenProvider for FileTokenProvider {
///     async fn get_token(&self) -> Result<AccessToken, AuthError> {
///         let raw = std::fs::read_to_string(&self.path)
///             .map_err(|e| AuthError::MalformedToken(e.to_string()))?;
///         Ok(AccessToken::new(raw.trim()))
///     }
/// }
/// ```
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Gets the token to send as `Authorization: Bearer`.
    async fn get_token(&self) -> Result<AccessToken, AuthError>;
}

/// A token provider that always returns the same static token.
///
/// # Example
///
/// ```
/// use equippro_lib::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("my-access-token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Creates a new static token provider with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(access_token),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<AccessToken, AuthError> {
        Ok(self.token.clone())
    }
}
