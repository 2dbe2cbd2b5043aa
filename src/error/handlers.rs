//! Error handlers
//!
//! Renders authentication failures as the messages shown to an interactive user.

use crate::error::types::{AppError, AuthError, HashFailure};
use log::error;

/// Log an application error
pub fn handle_error(err: &AppError) {
    error!("authent error: {}", err);
}

/// Convert an authentication error to the line displayed after a failed operation.
///
/// Internal failures are reported generically; their detail goes to the log instead.
pub fn user_message(err: &AuthError) -> String {
    let reason = match err {
        AuthError::DuplicateUser(_) => "username already taken",
        AuthError::UserNotFound(_) => "user not found",
        AuthError::InvalidPassword(_) => "invalid password",
        AuthError::HashingFailed(HashFailure::PasswordTooLong(_)) => {
            "password length exceeds 72 bytes"
        }
        AuthError::HashingFailed(HashFailure::Internal(_)) => "internal error, please try again",
    };
    format!("Error: {}", reason)
}
