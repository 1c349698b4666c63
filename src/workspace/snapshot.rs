use serde::Serialize;

use super::context::ProjectContext;
use super::files::list_workspace_files;
use crate::db::RecordStore;
use crate::error::{WorkspaceError, WorkspaceResult};
use crate::models::DevelopmentStep;

/// Outcome of recording a workspace snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotSummary {
    pub step: DevelopmentStep,
    /// Files found in the workspace.
    pub files: usize,
    /// File records that did not exist before this call.
    pub files_created: usize,
    /// Snapshots that did not exist before this call.
    pub snapshots_created: usize,
}

/// Capture the content of every workspace file at the development step `step_key`.
///
/// The workspace is read in full before anything is persisted, so a traversal
/// failure records nothing. A store failure aborts the snapshot; running it
/// again for the same step only adds the files that are still missing.
pub fn save_files_snapshot<S: RecordStore + ?Sized>(
    ctx: &ProjectContext,
    store: &S,
    step_key: &str,
) -> WorkspaceResult<SnapshotSummary> {
    let files = list_workspace_files(ctx)?;

    let (step, _) = store
        .get_or_create_development_step(step_key)
        .map_err(WorkspaceError::Store)?;

    let mut files_created = 0;
    let mut snapshots_created = 0;

    for file in &files {
        tracing::debug!(path = %file.full_path, "Saving file snapshot");

        let (record, created) = store
            .get_or_create_file(&file.path, &file.name, &file.full_path)
            .map_err(WorkspaceError::Store)?;
        if created {
            files_created += 1;
        }

        let (_, created) = store
            .get_or_create_file_snapshot(&record, &step, &file.content)
            .map_err(WorkspaceError::Store)?;
        if created {
            snapshots_created += 1;
        }
    }

    tracing::info!(
        step = %step.key,
        files = files.len(),
        files_created,
        snapshots_created,
        "Recorded workspace snapshot"
    );

    Ok(SnapshotSummary {
        step,
        files: files.len(),
        files_created,
        snapshots_created,
    })
}
