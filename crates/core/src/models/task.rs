use serde::{Deserialize, Serialize};

use crate::types::{DocId, Timestamp};

/// Kanban column a task sits in.
///
/// These three strings are the only values ever persisted or accepted;
/// anything else fails deserialization before reaching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "Todo",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task document from the `tasks` collection.
///
/// `user_id` is a denormalized copy of the parent project's owner, set at
/// creation time from the project document rather than from caller input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DocId,
    pub title: String,
    pub status: TaskStatus,
    /// Serialized as `null` when the task has no due date.
    #[serde(default)]
    pub due_date: Option<Timestamp>,
    pub project_id: DocId,
    pub user_id: DocId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
