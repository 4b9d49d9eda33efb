//! Argon2id password hashing, run off the async executor.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::domain::error::DomainError;

/// Hash `password` into a PHC string.
///
/// # Errors
/// `Infrastructure` if hashing fails or the blocking task is lost.
pub async fn hash(password: String) -> Result<String, DomainError> {
    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(DomainError::infrastructure)?
}

/// Check `password` against a stored PHC string.
///
/// An unparsable stored hash verifies as `false`.
///
/// # Errors
/// `Infrastructure` if the blocking task is lost.
pub async fn verify(password: String, stored: String) -> Result<bool, DomainError> {
    tokio::task::spawn_blocking(move || verify_blocking(&password, &stored))
        .await
        .map_err(DomainError::infrastructure)
}

fn hash_blocking(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>())
        .map_err(|e| DomainError::infrastructure(anyhow::anyhow!("salt encoding failed: {e}")))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| DomainError::infrastructure(anyhow::anyhow!("password hashing failed: {e}")))
}

fn verify_blocking(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        tracing::warn!("stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
