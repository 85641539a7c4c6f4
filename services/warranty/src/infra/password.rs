//! Argon2 password hashing.
//!
//! Hashing is CPU-bound, so both operations run on the blocking pool.

use anyhow::{Context as _, anyhow};
use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};

/// Bytes of entropy in a generated temporary password (hex-encoded to twice the length).
const TEMP_PASSWORD_BYTES: usize = 6;

pub async fn hash_password(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| anyhow!("hash password: {e}"))
    })
    .await
    .context("join password hashing task")?
}

/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub async fn verify_password(plain: String, stored_hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&stored_hash).map_err(|e| anyhow!("parse stored hash: {e}"))?;
        match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(anyhow!("verify password: {e}")),
        }
    })
    .await
    .context("join password verification task")?
}

/// Random one-time credential, 12 lowercase hex characters.
pub fn generate_temp_password() -> String {
    hex::encode(rand::random::<[u8; TEMP_PASSWORD_BYTES]>())
}
