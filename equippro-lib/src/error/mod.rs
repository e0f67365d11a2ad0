//! Error types

mod api;
mod auth;
mod field;

pub use api::*;
pub use auth::*;
pub use field::*;

/// Top-level error for client, session and screen operations.
///
/// The table browser itself never fails; these errors come from the
/// collaborators around it. Typed [`Record`](crate::model::Record) getters
/// return [`FieldError`] directly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The REST API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session token could not be decoded.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl Error {
    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status_code(),
            _ => None,
        }
    }
}
