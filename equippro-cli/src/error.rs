//! CLI error type

use std::path::PathBuf;

use equippro_lib::screen::Notification;

/// Errors that end a CLI run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// No token on the command line, in the environment or in a file.
    #[error("no token given: pass --token, --token-file or set EQUIPPRO_TOKEN")]
    MissingToken,

    /// The token file could not be read.
    #[error("failed to read token file {path}: {source}")]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Library error (session, client or API).
    #[error(transparent)]
    Lib(#[from] equippro_lib::error::Error),

    /// A screen reported a failure notification.
    #[error("{title} {text}")]
    Screen { title: String, text: String },
}

impl From<equippro_lib::error::AuthError> for CliError {
    fn from(e: equippro_lib::error::AuthError) -> Self {
        Self::Lib(e.into())
    }
}

impl CliError {
    /// Returns `true` if the API rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Lib(equippro_lib::error::Error::Api(api)) => api.is_unauthorized(),
            _ => false,
        }
    }

    /// Turns an error notification into an error; success passes through.
    pub fn check(notification: Option<Notification>) -> Result<Option<Notification>, Self> {
        match notification {
            Some(Notification::Error { title, text }) => Err(Self::Screen { title, text }),
            other => Ok(other),
        }
    }
}
