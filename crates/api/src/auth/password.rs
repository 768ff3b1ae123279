//! Password hashing and the registration strength policy.
//!
//! Hashes are Argon2id in PHC string form, so the algorithm parameters
//! and salt travel with the hash and verification needs no extra
//! configuration.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; a malformed hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Enforce the registration policy on a candidate password.
///
/// The `Err` carries the message shown to the user.
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_round_trips() {
        let hash = hash_password("drafting-board-42").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"), "expected an argon2id PHC string");
        assert!(verify_password("drafting-board-42", &hash).expect("verify should succeed"));
    }

    #[test]
    fn mismatch_is_false_not_error() {
        let hash = hash_password("kanban-rules").expect("hashing should succeed");
        let ok = verify_password("kanban-drools", &hash).expect("verify should succeed");
        assert!(!ok);
    }

    #[test]
    fn garbled_hash_is_an_error() {
        assert!(verify_password("whatever", "not-a-phc-string").is_err());
    }

    #[test]
    fn policy_rejects_short_passwords() {
        let err = validate_password_strength("12345").unwrap_err();
        assert!(err.contains("at least 6 characters"));
    }

    #[test]
    fn policy_accepts_minimum_and_longer() {
        // Exactly at the boundary, then comfortably past it.
        assert!(validate_password_strength("123456").is_ok());
        assert!(validate_password_strength("a-much-longer-password").is_ok());
    }
}
