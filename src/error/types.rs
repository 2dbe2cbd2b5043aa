//! Error types
//!
//! Defines the closed set of authentication failures and the application-level
//! error that wraps them alongside configuration and I/O failures.

use std::fmt;
use std::io;

/// Fieldless tag for each authentication failure, for callers that branch
/// on the outcome without inspecting the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    DuplicateUser,
    HashingFailed,
    UserNotFound,
    InvalidPassword,
}

/// Why a hash could not be produced or checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashFailure {
    /// The password is longer than bcrypt accepts; carries the byte length.
    PasswordTooLong(usize),
    /// The hash backend failed (bad cost, no randomness, unreadable digest).
    Internal(String),
}

impl fmt::Display for HashFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashFailure::PasswordTooLong(len) => {
                write!(f, "password length {} exceeds 72 bytes", len)
            }
            HashFailure::Internal(reason) => write!(f, "{}", reason),
        }
    }
}

/// Authentication module errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Register was called with a username that is already present.
    DuplicateUser(String),
    /// The hash computation or verification could not complete.
    HashingFailed(HashFailure),
    /// Login was called with an unknown username.
    UserNotFound(String),
    /// Login was called with a wrong password for a known username.
    InvalidPassword(String),
}

impl AuthError {
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::DuplicateUser(_) => AuthErrorKind::DuplicateUser,
            AuthError::HashingFailed(_) => AuthErrorKind::HashingFailed,
            AuthError::UserNotFound(_) => AuthErrorKind::UserNotFound,
            AuthError::InvalidPassword(_) => AuthErrorKind::InvalidPassword,
        }
    }

    /// Whether the caller can fix the failure by changing its input.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AuthError::HashingFailed(HashFailure::Internal(_)))
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::DuplicateUser(u) => write!(f, "Username already taken: {}", u),
            AuthError::HashingFailed(reason) => write!(f, "Password hashing failed: {}", reason),
            AuthError::UserNotFound(u) => write!(f, "User not found: {}", u),
            AuthError::InvalidPassword(u) => write!(f, "Invalid password for user: {}", u),
        }
    }
}

impl std::error::Error for AuthError {}

/// Application error covering everything the binary can fail on
#[derive(Debug)]
pub enum AppError {
    Auth(AuthError),
    Config(config::ConfigError),
    IoError(io::Error),
    /// A blocking hash task panicked or was cancelled.
    Task(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Auth(e) => write!(f, "Authentication error: {}", e),
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::IoError(e) => write!(f, "I/O error: {}", e),
            AppError::Task(e) => write!(f, "Background task error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Auth(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::IoError(e) => Some(e),
            AppError::Task(_) => None,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> Self {
        AppError::Auth(error)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(error: config::ConfigError) -> Self {
        AppError::Config(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        AppError::IoError(error)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> Self {
        AppError::Task(error.to_string())
    }
}
