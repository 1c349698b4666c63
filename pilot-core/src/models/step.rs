use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A checkpoint in the development of a project.
///
/// Snapshots are grouped under a step; the `key` is chosen by the caller and is
/// unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevelopmentStep {
    pub id: Uuid,
    pub key: String,
    pub created_at: DateTime<Utc>,
}
