use serde::{Deserialize, Serialize};

use crate::types::DocId;

/// Public view of a user, as issued by the identity service.
///
/// Mutable only through the identity service; this system never writes
/// user display fields itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: DocId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}
