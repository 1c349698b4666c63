//! On-disk workspace of a generated project.

mod context;
mod files;
mod ignore;
mod path;
mod snapshot;
mod tree;
mod walk;

pub use context::{open_database, ProjectContext, METADATA_DIR_NAME};
pub use files::{list_workspace_files, save_file, SaveFileRequest, WorkspaceFile};
pub use ignore::{is_ignored, IGNORED_DIRS};
pub use path::{resolve, ResolvedFileLocation};
pub use snapshot::{save_files_snapshot, SnapshotSummary};
pub use tree::build_tree;
