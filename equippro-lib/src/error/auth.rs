//! Session error types

/// Errors that can occur while decoding a session token.
///
/// Tokens are decoded, never verified; signature checks belong to the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The token is not three dot-separated segments.
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// The payload segment is not valid base64url.
    #[error("Token payload is not base64url: {0}")]
    Encoding(String),

    /// The payload is not a JSON object with the expected claims.
    #[error("Token payload parse error: {0}")]
    Parse(String),

    /// A claim required by the dashboard is absent.
    #[error("Token is missing the '{0}' claim")]
    MissingClaim(&'static str),
}
