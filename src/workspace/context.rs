use std::path::{Path, PathBuf};

use crate::db::Database;
use crate::error::{WorkspaceError, WorkspaceResult};

/// Default name of the tool's private directory under the project root.
pub const METADATA_DIR_NAME: &str = ".pilot";

const DATABASE_FILE_NAME: &str = "workspace.db";

/// The project root and the tool's metadata directory inside it.
///
/// Set once when a project is opened and passed to every workspace operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    root: PathBuf,
    metadata_dir_name: String,
}

impl ProjectContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_metadata_dir(root, METADATA_DIR_NAME)
    }

    pub fn with_metadata_dir(root: impl Into<PathBuf>, metadata_dir_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            metadata_dir_name: metadata_dir_name.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The root as a forward-slash string without a trailing separator.
    pub fn root_str(&self) -> String {
        let root = to_slash(&self.root);
        match root.trim_end_matches('/') {
            "" if root.starts_with('/') => "/".to_string(),
            trimmed => trimmed.to_string(),
        }
    }

    pub fn metadata_dir_name(&self) -> &str {
        &self.metadata_dir_name
    }

    pub fn metadata_dir(&self) -> PathBuf {
        self.root.join(&self.metadata_dir_name)
    }

    pub fn ensure_metadata_dir(&self) -> WorkspaceResult<PathBuf> {
        let dir = self.metadata_dir();
        std::fs::create_dir_all(&dir).map_err(|e| WorkspaceError::io(&dir, e))?;
        Ok(dir)
    }

    /// Location of the record store for this project.
    pub fn database_path(&self) -> PathBuf {
        self.metadata_dir().join(DATABASE_FILE_NAME)
    }
}

/// Open and migrate the record store kept in the project's metadata directory.
pub fn open_database(ctx: &ProjectContext) -> WorkspaceResult<Database> {
    ctx.ensure_metadata_dir()?;
    let db = Database::open(ctx.database_path()).map_err(WorkspaceError::Store)?;
    db.migrate().map_err(WorkspaceError::Store)?;
    Ok(db)
}

/// Render a path with forward slashes regardless of host convention.
pub(crate) fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
