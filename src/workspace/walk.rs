use walkdir::{DirEntry, WalkDir};

use super::context::ProjectContext;
use super::ignore::is_ignored;

/// Depth-first walk of the project root in file name order.
///
/// Ignored directories are pruned at any depth, so nothing below them is
/// visited. Symlinks are reported as such and never followed.
pub(crate) fn walk_workspace(
    ctx: &ProjectContext,
) -> impl Iterator<Item = walkdir::Result<DirEntry>> + '_ {
    WalkDir::new(ctx.root())
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !is_ignored(ctx, &e.file_name().to_string_lossy())
        })
}
