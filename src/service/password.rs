//! Argon2id password hashing for flat credentials.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;

use crate::error::FlatshareError;

/// Hash a password with a fresh random salt. Returns a PHC string for storage.
pub fn hash_password(password: &str) -> Result<String, FlatshareError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| FlatshareError::PasswordHash(format!("hashing failed: {e}")))
}

/// Verify `password` against a stored PHC string. Comparison is constant-time.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, FlatshareError> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| FlatshareError::PasswordHash(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(FlatshareError::PasswordHash(format!(
            "verification failed: {e}"
        ))),
    }
}
