//! Salted Argon2 password hashing.
//!
//! Hashing is CPU-bound, so the async helpers run it on the blocking pool.

use anyhow::anyhow;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::AppError;

/// Hashes `plain` with a fresh random salt. The salt is embedded in the PHC string.
pub fn hash(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash_string = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|err| anyhow!("{}", err))?
        .to_string();
    Ok(hash_string)
}

/// Returns `Ok(false)` on mismatch; `Err` only if `target_hash` is not a valid PHC string.
pub fn verify(plain: &str, target_hash: &str) -> anyhow::Result<bool> {
    let password_hash = PasswordHash::new(target_hash).map_err(|err| anyhow!("{}", err))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &password_hash)
        .is_ok())
}

pub async fn hash_blocking(plain: String) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || hash(&plain))
        .await
        .map_err(|e| AppError::Internal(anyhow!("Password hashing task failed: {e}")))??;
    Ok(hashed)
}

pub async fn verify_blocking(plain: String, target_hash: String) -> Result<bool, AppError> {
    let matches = tokio::task::spawn_blocking(move || verify(&plain, &target_hash))
        .await
        .map_err(|e| AppError::Internal(anyhow!("Password verification task failed: {e}")))??;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_never_equals_plain_text() {
        let hashed = hash("hunter22").unwrap();
        assert_ne!(hashed, "hunter22");
        assert!(hashed.starts_with("$argon2"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let first = hash("hunter22").unwrap();
        let second = hash("hunter22").unwrap();
        assert_ne!(first, second, "each hash must carry its own salt");
    }

    #[test]
    fn test_verify_accepts_correct_and_rejects_wrong() {
        let hashed = hash("correct horse").unwrap();
        assert!(verify("correct horse", &hashed).unwrap());
        assert!(!verify("battery staple", &hashed).unwrap());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(verify("anything", "not-a-phc-string").is_err());
    }

    #[tokio::test]
    async fn test_blocking_helpers_round_trip() {
        let hashed = hash_blocking("s3cret".to_string()).await.unwrap();
        assert!(verify_blocking("s3cret".to_string(), hashed).await.unwrap());
    }
}
