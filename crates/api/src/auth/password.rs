//! Password hashing with bcrypt over a SHA-256 pre-digest.
//!
//! bcrypt truncates input at 72 bytes. Hashing the SHA-256 hex digest of
//! the password instead of the raw bytes lifts that ceiling: passwords of
//! any length contribute all of their entropy, and two passwords that
//! agree on the first 72 bytes still hash differently.

use bcrypt::DEFAULT_COST;
use sha2::{Digest, Sha256};

/// SHA-256 hex digest of the raw password. Always 64 ASCII bytes, well
/// under bcrypt's 72-byte limit.
fn predigest(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(predigest(password), DEFAULT_COST)
}

/// Verify a password against a stored hash.
///
/// Fails closed: a malformed or non-bcrypt stored hash verifies as
/// `false` rather than surfacing an error to the caller.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(predigest(password), hash).unwrap_or(false)
}
