//! Argon2id password hashing.
//!
//! Verification goes through the argon2 crate's `verify_password`, which
//! compares digests in constant time.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::error::AuthServiceError;

/// Hash a plaintext password into a salted PHC string.
pub fn hash_password(plaintext: &str) -> Result<String, AuthServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| AuthServiceError::Internal(anyhow::anyhow!("hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC string. Unparseable
/// hashes count as a failed check rather than an error — the caller only
/// ever maps this to `InvalidCredentials`.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
