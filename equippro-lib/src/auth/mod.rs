//! Bearer tokens and sessions

mod session;
mod token;

pub use session::Claims;
pub use session::Session;
pub use token::AccessToken;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
