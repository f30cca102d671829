// Posts API payload types.
// Defines the structs serialized to and deserialized from the REST backend.

use serde::{Deserialize, Serialize};

/// A post as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub author: String,
}

/// Request payload for creating a post. The backend assigns an id when none
/// is supplied; the field is omitted from the JSON body in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    pub author: String,
}

impl NewPost {
    pub fn new(id: Option<u64>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
        }
    }
}
