//! Authentication service
//!
//! Implements registration and login on top of a [`CredentialStore`] and a
//! [`PasswordHasher`]. Nothing here logs; every failure is returned to the caller.

use std::sync::Arc;

use super::credentials::{CredentialRecord, CredentialStore};
use super::hasher::PasswordHasher;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Register and login operations over a shared credential store.
#[derive(Debug)]
pub struct AuthService {
    store: Arc<CredentialStore>,
    hasher: PasswordHasher,
    equalize_timing: bool,
}

impl AuthService {
    pub fn new(store: Arc<CredentialStore>, hasher: PasswordHasher) -> Self {
        Self {
            store,
            hasher,
            equalize_timing: true,
        }
    }

    /// Builds a service with an empty store from loaded configuration.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let hasher = PasswordHasher::new(config.hash_cost)?;
        Ok(Self::new(Arc::new(CredentialStore::new()), hasher)
            .with_timing_equalization(config.equalize_login_timing))
    }

    /// Enables or disables the dummy verification for unknown usernames.
    pub fn with_timing_equalization(mut self, enabled: bool) -> Self {
        self.equalize_timing = enabled;
        self
    }

    pub fn store(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// - `DuplicateUser` if the username is already registered, including when
    ///   a concurrent registration for the same name wins the insert.
    /// - `HashingFailed` if no digest could be produced; nothing is stored.
    pub fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if self.store.exists(username) {
            return Err(AuthError::DuplicateUser(username.to_string()));
        }

        // Hashing is slow, so it runs outside the store lock. The insert
        // re-checks presence atomically.
        let password_hash = self.hasher.hash(password)?;

        if self.store.insert(CredentialRecord::new(username, password_hash)) {
            Ok(())
        } else {
            Err(AuthError::DuplicateUser(username.to_string()))
        }
    }

    /// Verifies a login attempt. Never changes state.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the username is not registered.
    /// - `InvalidPassword` if the password does not match the stored digest.
    /// - `HashingFailed` if the stored digest cannot be read.
    pub fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let Some(record) = self.store.get(username) else {
            if self.equalize_timing {
                self.hasher.verify_dummy(password);
            }
            return Err(AuthError::UserNotFound(username.to_string()));
        };

        if self.hasher.verify(password, record.password_hash())? {
            Ok(())
        } else {
            Err(AuthError::InvalidPassword(username.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hasher::MIN_COST;
    use crate::error::AuthErrorKind;
    use std::time::Instant;

    fn service() -> AuthService {
        let hasher = PasswordHasher::new(MIN_COST).unwrap();
        AuthService::new(Arc::new(CredentialStore::new()), hasher)
    }

    #[test]
    fn register_then_login() {
        let auth = service();
        auth.register("alice", "correcthorse").unwrap();
        auth.login("alice", "correcthorse").unwrap();
    }

    #[test]
    fn duplicate_register_keeps_original_hash() {
        let auth = service();
        auth.register("alice", "correcthorse").unwrap();
        let original = auth.store().get("alice").unwrap();

        let err = auth.register("alice", "other").unwrap_err();
        assert_eq!(err, AuthError::DuplicateUser("alice".into()));

        assert_eq!(auth.store().get("alice").unwrap(), original);
        auth.login("alice", "correcthorse").unwrap();
        assert_eq!(
            auth.login("alice", "other").unwrap_err().kind(),
            AuthErrorKind::InvalidPassword
        );
    }

    #[test]
    fn login_unknown_user() {
        let auth = service();
        let err = auth.login("bob", "anything").unwrap_err();
        assert_eq!(err, AuthError::UserNotFound("bob".into()));
    }

    #[test]
    fn login_unknown_user_without_equalization() {
        let auth = service().with_timing_equalization(false);
        let err = auth.login("bob", "anything").unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::UserNotFound);
    }

    #[test]
    fn over_long_password_does_not_reveal_known_users() {
        let hasher = PasswordHasher::new(8).unwrap();
        let auth = AuthService::new(Arc::new(CredentialStore::new()), hasher);
        auth.register("alice", "pw").unwrap();
        let long = "x".repeat(100);

        let start = Instant::now();
        let known = auth.login("alice", &long).unwrap_err();
        let known_time = start.elapsed();

        let start = Instant::now();
        let unknown = auth.login("nobody", &long).unwrap_err();
        let unknown_time = start.elapsed();

        assert_eq!(known.kind(), AuthErrorKind::InvalidPassword);
        assert_eq!(unknown.kind(), AuthErrorKind::UserNotFound);
        assert!(
            known_time * 10 >= unknown_time && unknown_time * 10 >= known_time,
            "known {:?} vs unknown {:?}",
            known_time,
            unknown_time
        );
    }

    #[test]
    fn login_wrong_password() {
        let auth = service();
        auth.register("carol", "pw1").unwrap();
        let err = auth.login("carol", "pw2").unwrap_err();
        assert_eq!(err, AuthError::InvalidPassword("carol".into()));
    }

    #[test]
    fn same_password_different_users_get_distinct_digests() {
        let auth = service();
        auth.register("alice", "shared").unwrap();
        auth.register("bob", "shared").unwrap();

        let alice = auth.store().get("alice").unwrap();
        let bob = auth.store().get("bob").unwrap();
        assert_ne!(alice.password_hash(), bob.password_hash());
    }

    #[test]
    fn stored_record_never_holds_plaintext() {
        let auth = service();
        auth.register("dave", "plaintext-secret").unwrap();
        let record = auth.store().get("dave").unwrap();
        assert!(!record.password_hash().contains("plaintext-secret"));
        assert!(record.password_hash().starts_with("$2b$04$"));
    }

    #[test]
    fn failed_hash_leaves_no_record() {
        let auth = service();
        let err = auth.register("erin", &"x".repeat(73)).unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::HashingFailed);
        assert!(err.is_recoverable());
        assert!(!auth.store().exists("erin"));

        // The username is still free afterwards.
        auth.register("erin", "short").unwrap();
    }

    #[test]
    fn empty_credentials_are_accepted() {
        let auth = service();
        auth.register("", "").unwrap();
        auth.login("", "").unwrap();
        assert_eq!(
            auth.register("", "x").unwrap_err().kind(),
            AuthErrorKind::DuplicateUser
        );
    }

    #[test]
    fn usernames_are_case_sensitive() {
        let auth = service();
        auth.register("Alice", "pw").unwrap();
        assert_eq!(
            auth.login("alice", "pw").unwrap_err().kind(),
            AuthErrorKind::UserNotFound
        );
        auth.register("alice", "pw").unwrap();
    }

    #[test]
    fn from_config_uses_configured_cost() {
        let config = AuthConfig {
            hash_cost: MIN_COST,
            ..AuthConfig::default()
        };
        let auth = AuthService::from_config(&config).unwrap();
        auth.register("frank", "pw").unwrap();
        assert!(
            auth.store()
                .get("frank")
                .unwrap()
                .password_hash()
                .starts_with("$2b$04$")
        );
    }

    #[test]
    fn concurrent_registration_has_one_winner() {
        let auth = Arc::new(service());

        let results: Vec<Result<(), AuthError>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let auth = Arc::clone(&auth);
                    scope.spawn(move || auth.register("racer", &format!("pw{}", i)))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(results.iter().all(|r| match r {
            Ok(()) => true,
            Err(e) => e.kind() == AuthErrorKind::DuplicateUser,
        }));
        assert_eq!(auth.store().len(), 1);
    }
}
