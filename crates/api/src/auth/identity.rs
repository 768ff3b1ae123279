//! The identity service seam and the JWT-backed local implementation.
//!
//! Handlers never talk to a concrete identity provider; they call
//! [`IdentityService`] methods on a trait object held in
//! [`AppState`](crate::state::AppState). The default implementation,
//! [`JwtIdentity`], keeps user records in the document store's `users`
//! collection and issues self-contained HS256 bearer tokens.

use std::sync::Arc;

use async_trait::async_trait;

use taskdeck_core::error::CoreError;
use taskdeck_core::models::User;
use taskdeck_core::types::DocId;
use taskdeck_store::repositories::{NewUser, UserRecord, UserRepo};
use taskdeck_store::{DocumentStore, StoreError};

use super::jwt::{generate_access_token, validate_token, JwtConfig};
use super::password::{hash_password, validate_password_strength, verify_password};

/// A successful registration or sign-in.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Bearer token to present on subsequent requests.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    /// The public user record.
    pub user: User,
}

/// Identity service contract consumed by HTTP handlers.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Resolve a bearer token to the id of the user it was issued for.
    async fn verify_token(&self, token: &str) -> Result<DocId, CoreError>;

    /// Create a new account and sign it in.
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<AuthSession, CoreError>;

    /// Sign in with an email/password pair.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, CoreError>;

    /// Fetch the public record for a user id, if the user still exists.
    async fn lookup_user(&self, user_id: &str) -> Result<Option<User>, CoreError>;

    /// Fetch the public record for an email address, if registered.
    async fn lookup_user_by_email(&self, email: &str) -> Result<Option<User>, CoreError>;

    /// Invalidate any server-side session state for the user.
    async fn sign_out(&self, user_id: &str) -> Result<(), CoreError>;
}

/// Local identity provider backed by the document store.
///
/// Passwords are hashed with Argon2id; tokens are HS256 JWTs signed with
/// the configured secret.
pub struct JwtIdentity {
    store: Arc<dyn DocumentStore>,
    config: JwtConfig,
}

impl JwtIdentity {
    pub fn new(store: Arc<dyn DocumentStore>, config: JwtConfig) -> Self {
        Self { store, config }
    }

    fn session_for(&self, user: User) -> Result<AuthSession, CoreError> {
        let token = generate_access_token(&user.uid, &self.config)
            .map_err(|e| CoreError::Internal(format!("Token generation failed: {e}")))?;
        Ok(AuthSession {
            token,
            expires_in: self.config.access_token_expiry_mins * 60,
            user,
        })
    }
}

/// Map a store failure to a dependency error for the identity layer.
fn store_err(err: StoreError) -> CoreError {
    CoreError::Dependency(err.to_string())
}

#[async_trait]
impl IdentityService for JwtIdentity {
    async fn verify_token(&self, token: &str) -> Result<DocId, CoreError> {
        let claims = validate_token(token, &self.config)
            .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()))?;
        Ok(claims.sub)
    }

    async fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<AuthSession, CoreError> {
        validate_password_strength(password).map_err(CoreError::Validation)?;

        let existing = UserRepo::find_by_email(self.store.as_ref(), email)
            .await
            .map_err(store_err)?;
        if existing.is_some() {
            return Err(CoreError::Validation(
                "An account with this email already exists. Please try logging in instead."
                    .into(),
            ));
        }

        let password_hash = hash_password(password)
            .map_err(|e| CoreError::Internal(format!("Password hashing failed: {e}")))?;

        let record = UserRepo::create(
            self.store.as_ref(),
            &NewUser {
                email: email.to_string(),
                password_hash,
                display_name: display_name.map(str::to_string),
            },
        )
        .await
        .map_err(store_err)?;

        tracing::info!(user_id = %record.id, "user registered");
        self.session_for(record.into_public())
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, CoreError> {
        let record = UserRepo::find_by_email(self.store.as_ref(), email)
            .await
            .map_err(store_err)?
            .ok_or_else(|| CoreError::Unauthorized("Invalid email or password".into()))?;

        let verified = verify_password(password, &record.password_hash)
            .map_err(|e| CoreError::Internal(format!("Password verification failed: {e}")))?;
        if !verified {
            return Err(CoreError::Unauthorized("Invalid email or password".into()));
        }

        tracing::debug!(user_id = %record.id, "user signed in");
        self.session_for(record.into_public())
    }

    async fn lookup_user(&self, user_id: &str) -> Result<Option<User>, CoreError> {
        let record = UserRepo::find_by_id(self.store.as_ref(), user_id)
            .await
            .map_err(store_err)?;
        Ok(record.map(UserRecord::into_public))
    }

    async fn lookup_user_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        let record = UserRepo::find_by_email(self.store.as_ref(), email)
            .await
            .map_err(store_err)?;
        Ok(record.map(UserRecord::into_public))
    }

    async fn sign_out(&self, user_id: &str) -> Result<(), CoreError> {
        // Bearer tokens are self-contained; there is no server-side
        // session to revoke. The client discards its token.
        tracing::debug!(user_id, "user signed out");
        Ok(())
    }
}
