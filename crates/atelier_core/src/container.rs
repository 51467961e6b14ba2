//! Containers: top-level units of work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named unit of work holding an ordered history of generation steps.
///
/// Containers are created explicitly by the user and soft-deleted, never
/// physically removed while steps reference them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Unique identifier
    pub id: Uuid,
    /// User-facing title
    pub title: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Soft-delete flag; hidden from default listings when set
    pub deleted: bool,
    /// Next step sequence number. Store-private: strictly increasing,
    /// never reused even after deletions.
    pub next_sequence: u64,
}

impl Container {
    /// Create a fresh container with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            created_at: Utc::now(),
            deleted: false,
            next_sequence: 1,
        }
    }
}
