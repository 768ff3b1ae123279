use crate::types::DocId;

/// Domain-level error taxonomy shared across the workspace.
///
/// Each variant maps to exactly one HTTP status at the API boundary:
/// `Validation` 400, `Unauthorized` 401, `Forbidden` 403, `NotFound` 404,
/// `Dependency` and `Internal` 500.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: DocId },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    /// The document store or identity service is unreachable or misconfigured.
    #[error("{0}")]
    Dependency(String),

    #[error("{0}")]
    Internal(String),
}
