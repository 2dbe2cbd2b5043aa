//! Authentication system
//!
//! Handles credential storage, password hashing, and the register/login operations.

pub mod credentials;
pub mod hasher;
pub mod service;

pub use credentials::{CredentialRecord, CredentialStore};
pub use hasher::PasswordHasher;
pub use service::AuthService;
