//! Password hashing and verification using bcrypt.
//!
//! Every call to [`PasswordHasher::hash`] draws a fresh random salt, so identical
//! passwords produce different digests. Digests use the modular crypt format
//! (`$2b$<cost>$<salt><hash>`) and carry everything verification needs.

use bcrypt::BcryptError;

use crate::error::{AuthError, HashFailure};

/// Lowest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest work factor bcrypt accepts.
pub const MAX_COST: u32 = 31;
/// Work factor used when none is configured.
pub const DEFAULT_COST: u32 = 10;

/// bcrypt only reads this many bytes of input.
pub const MAX_PASSWORD_BYTES: usize = 72;

const DUMMY_PASSWORD: &str = "authent-timing-equalizer";

/// bcrypt hasher with a tunable work factor.
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: String,
}

impl PasswordHasher {
    /// Creates a hasher for the given work factor.
    ///
    /// Computes one digest up front for [`PasswordHasher::verify_dummy`], so
    /// construction costs as much as a single hash.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::HashingFailed` if the cost is outside
    /// `MIN_COST..=MAX_COST` or the salt cannot be generated.
    pub fn new(cost: u32) -> Result<Self, AuthError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(AuthError::HashingFailed(HashFailure::Internal(format!(
                "cost {} outside {}..={}",
                cost, MIN_COST, MAX_COST
            ))));
        }

        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, cost).map_err(hashing_failed)?;
        Ok(Self { cost, dummy_hash })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes a password with a new random salt.
    ///
    /// Passwords longer than `MAX_PASSWORD_BYTES` are refused rather than
    /// silently truncated.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::non_truncating_hash(password, self.cost).map_err(hashing_failed)
    }

    /// Verifies a password against a stored digest.
    ///
    /// Cost and salt are read from the digest itself. The comparison is
    /// constant-time inside bcrypt.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::HashingFailed` when the digest is malformed.
    pub fn verify(&self, password: &str, digest: &str) -> Result<bool, AuthError> {
        verify_at_full_cost(password, digest).map_err(hashing_failed)
    }

    /// Runs one verification against an internal digest and discards the result.
    ///
    /// Used for unknown usernames so that lookup failures cost about as much
    /// as password mismatches.
    pub fn verify_dummy(&self, password: &str) {
        let _ = verify_at_full_cost(password, &self.dummy_hash);
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

/// Non-truncating verification that always spends one bcrypt run at the
/// digest's cost, even for passwords bcrypt would reject by length.
fn verify_at_full_cost(password: &str, digest: &str) -> Result<bool, BcryptError> {
    match bcrypt::non_truncating_verify(password, digest) {
        // No stored digest can come from a password this long.
        Err(BcryptError::Truncation(_)) => {
            let _ = bcrypt::verify(password, digest);
            Ok(false)
        }
        other => other,
    }
}

fn hashing_failed(e: BcryptError) -> AuthError {
    match e {
        BcryptError::Truncation(len) => AuthError::HashingFailed(HashFailure::PasswordTooLong(len)),
        e => AuthError::HashingFailed(HashFailure::Internal(e.to_string())),
    }
}
