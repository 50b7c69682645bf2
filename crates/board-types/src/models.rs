use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single board message as owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub body: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The fields a message allows to change after creation.
/// `username`, `id` and the timestamps are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePatch {
    pub body: Option<String>,
}

impl MessagePatch {
    pub fn is_empty(&self) -> bool {
        self.body.is_none()
    }
}
