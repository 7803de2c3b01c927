//! Password hashing
//!
//! Salted bcrypt hashes. Hashing is CPU bound, so both operations run on the
//! blocking thread pool.

use bcrypt::{hash, verify, BcryptError};

/// Errors from hashing or verifying a password
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(#[from] BcryptError),

    #[error("Password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Hash a raw password with the given bcrypt cost.
pub async fn hash_password(raw_password: &str, cost: u32) -> Result<String, PasswordError> {
    let raw_password = raw_password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(raw_password, cost)).await??;
    Ok(hashed)
}

/// Check a raw password against a stored bcrypt hash.
pub async fn verify_password(raw_password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    let raw_password = raw_password.to_owned();
    let password_hash = password_hash.to_owned();
    let matches =
        tokio::task::spawn_blocking(move || verify(raw_password, &password_hash)).await??;
    Ok(matches)
}
