pub mod auth;
pub mod cli;
pub mod config;
pub mod error;

pub use auth::AuthService;
pub use config::AuthConfig;
pub use error::{AuthError, AuthErrorKind};
