use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A file known to belong to the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Uuid,
    /// Directory of the file relative to the project root, forward slashes.
    /// Empty for files at the root.
    pub path: String,
    pub name: String,
    /// Absolute location at the time the record was created.
    pub full_path: String,
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    /// Path of the file relative to the project root.
    pub fn relative_path(&self) -> String {
        if self.path.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.path.trim_end_matches('/'), self.name)
        }
    }
}

/// Content of a file captured at a development step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSnapshot {
    pub id: Uuid,
    pub file_id: Uuid,
    pub development_step_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A snapshot joined with the file it belongs to, used for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSnapshotWithFile {
    pub file: FileRecord,
    pub snapshot: FileSnapshot,
}
