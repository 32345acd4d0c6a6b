use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

use crate::error::TudooError;

// Real Argon2 hash of an unused password; verified against when the email is unknown so both
// failure paths cost the same.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$9QsJRKgzJkKaOUvlp7gl2Q$qmE3qIFBNJ6nZYbLYXEI2uo0zZc7T0Q8LU1ZsqsZ3QE";

pub fn hash_password(password: &str) -> Result<String, TudooError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| TudooError::gateway(e.to_string()))
}

/// Verify `password` against `stored`, or against a dummy hash when `stored` is `None`.
pub fn verify_password(password: &str, stored: Option<&str>) -> Result<bool, TudooError> {
    let parsed = PasswordHash::new(stored.unwrap_or(DUMMY_HASH))
        .map_err(|e| TudooError::gateway(e.to_string()))?;
    let valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok();
    Ok(valid && stored.is_some())
}
