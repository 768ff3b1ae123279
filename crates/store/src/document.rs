//! The document-store contract consumed by repositories and handlers.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use taskdeck_core::types::DocId;

/// Errors surfaced by document-store backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The addressed document does not exist (update on a missing id).
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: DocId },

    /// The backing database rejected or failed the operation.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A document payload could not be (de)serialized.
    #[error("invalid document data: {0}")]
    Data(#[from] serde_json::Error),
}

/// A raw document: a store-assigned id plus its JSON payload.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocId,
    pub data: Value,
}

impl Document {
    /// Deserialize the payload into a typed model.
    ///
    /// The document id is injected under the `id` key first, so models
    /// carry it as an ordinary field.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let mut data = self.data.clone();
        if let Some(obj) = data.as_object_mut() {
            obj.insert("id".to_string(), Value::String(self.id.clone()));
        }
        Ok(serde_json::from_value(data)?)
    }
}

/// An equality filter on a single top-level document field.
#[derive(Debug, Clone)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Collection-oriented document store.
///
/// `find` returns matching documents in unspecified order; callers that
/// need an ordering sort the decoded results themselves. `update` performs
/// a shallow top-level merge where an explicit JSON `null` overwrites the
/// existing value (used to clear a task's due date). `delete` on a missing
/// id is a no-op; `update` on a missing id is [`StoreError::NotFound`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, filters: &[Filter]) -> Result<Vec<Document>, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Insert a new document; the store assigns and returns its id.
    async fn add(&self, collection: &str, data: Value) -> Result<DocId, StoreError>;

    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<(), StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Delete several documents as one batch. All deletions in the batch
    /// become visible together, or the batch fails together.
    async fn batch_delete(&self, collection: &str, ids: &[DocId]) -> Result<(), StoreError>;
}
