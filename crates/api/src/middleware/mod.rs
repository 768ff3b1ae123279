//! Request middleware and extractors.
//!
//! - [`auth::AuthUser`] -- extracts the authenticated caller from a
//!   Bearer token in the `Authorization` header.

pub mod auth;
