use std::fs;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use super::context::{to_slash, ProjectContext};
use super::path::{join_root, resolve, ResolvedFileLocation};
use super::walk::walk_workspace;
use crate::db::RecordStore;
use crate::error::{WorkspaceError, WorkspaceResult};

/// A file found in the workspace together with its current content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceFile {
    /// Directory relative to the root, forward slashes, empty at the root.
    pub path: String,
    pub name: String,
    pub full_path: String,
    pub content: String,
}

/// Request to write a file into the workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveFileRequest {
    pub name: Option<String>,
    pub path: Option<String>,
    pub content: String,
}

/// Every regular file under the root, skipping ignored directories at any depth.
///
/// Files are returned in path order. Content that is not valid UTF-8 is
/// decoded lossily. Symlinks are not followed, so symlinked files are left
/// out. Any listing or read failure aborts the whole walk.
pub fn list_workspace_files(ctx: &ProjectContext) -> WorkspaceResult<Vec<WorkspaceFile>> {
    let root = ctx.root();
    let root_str = ctx.root_str();
    let mut files = Vec::new();

    for entry in walk_workspace(ctx) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = relative.parent().map(to_slash).unwrap_or_default();
        let full_path = join_root(&root_str, &to_slash(relative));
        let content = read_content(entry.path())?;

        files.push(WorkspaceFile {
            path,
            name,
            full_path,
            content,
        });
    }

    Ok(files)
}

/// Write a file at the location resolved from the request and record it.
///
/// Parent directories are created as needed. The file record is keyed by the
/// directory and name of the resolved relative path. Paths with `..`
/// segments are rejected before anything is written.
pub fn save_file<S: RecordStore + ?Sized>(
    ctx: &ProjectContext,
    store: &S,
    request: &SaveFileRequest,
) -> WorkspaceResult<ResolvedFileLocation> {
    let location = resolve(ctx, request.path.as_deref(), request.name.as_deref());
    let relative = Path::new(location.relative_path.trim_start_matches('/'));
    if relative.components().any(|c| c == Component::ParentDir) {
        return Err(WorkspaceError::OutsideRoot(location.relative_path.clone()));
    }
    let (dir, name) = location.split();

    let target = ctx.root().join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| WorkspaceError::io(parent, e))?;
    }
    fs::write(&target, &request.content).map_err(|e| WorkspaceError::io(&target, e))?;

    store
        .get_or_create_file(dir, name, &location.absolute_path)
        .map_err(WorkspaceError::Store)?;

    tracing::info!(path = %location.absolute_path, "Saved file");
    Ok(location)
}

fn read_content(path: &Path) -> WorkspaceResult<String> {
    let bytes = fs::read(path).map_err(|e| WorkspaceError::io(path, e))?;
    Ok(String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}
