//! Authentication primitives and the identity-service seam.
//!
//! - [`password`] -- Argon2id password hashing, verification, and strength checks.
//! - [`jwt`] -- JWT access-token generation and validation.
//! - [`identity`] -- the [`identity::IdentityService`] trait and the
//!   JWT-backed local implementation.

pub mod identity;
pub mod jwt;
pub mod password;
