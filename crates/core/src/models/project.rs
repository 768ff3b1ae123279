use serde::{Deserialize, Serialize};

use crate::types::{DocId, Timestamp};

/// A project document from the `projects` collection.
///
/// Every project has exactly one owner; only that user may read, modify,
/// or delete it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DocId,
    pub name: String,
    /// May be empty, but is always present.
    pub description: String,
    pub user_id: DocId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
