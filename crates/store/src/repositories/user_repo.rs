//! Repository for the `users` collection.
//!
//! Used only by the local identity implementation; resource handlers never
//! touch user records directly.

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use taskdeck_core::models::User;
use taskdeck_core::types::{DocId, Timestamp};

use crate::document::{DocumentStore, Filter, StoreError};

/// Collection name in the backing store.
const COLLECTION: &str = "users";

/// Internal user record as stored. Carries the password hash; convert via
/// [`UserRecord::into_public`] before anything leaves the identity layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: DocId,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
    pub created_at: Timestamp,
}

impl UserRecord {
    pub fn into_public(self) -> User {
        User {
            uid: self.id,
            email: self.email,
            display_name: self.display_name,
            photo_url: self.photo_url,
        }
    }
}

/// Input for creating a user record.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
}

/// Provides CRUD operations for user records.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user record, returning it with its assigned id.
    pub async fn create(store: &dyn DocumentStore, input: &NewUser) -> Result<UserRecord, StoreError> {
        let now = Utc::now();
        let data = json!({
            "email": input.email,
            "passwordHash": input.password_hash,
            "displayName": input.display_name,
            "photoURL": null,
            "createdAt": now,
        });
        let id = store.add(COLLECTION, data).await?;
        Ok(UserRecord {
            id,
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            display_name: input.display_name.clone(),
            photo_url: None,
            created_at: now,
        })
    }

    /// Find a user record by id.
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        match store.get(COLLECTION, id).await? {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    /// Find a user record by email. Emails are unique by construction
    /// (creation checks first), so the first match wins.
    pub async fn find_by_email(
        store: &dyn DocumentStore,
        email: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let docs = store.find(COLLECTION, &[Filter::eq("email", email)]).await?;
        match docs.first() {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }
}
