//! Indented text summary of the workspace directory structure.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::context::ProjectContext;
use super::walk::walk_workspace;
use crate::error::WorkspaceResult;

const INDENT: &str = "  ";

/// Render the directory tree under the project root.
///
/// Directories come first, each followed by its own subtree; the files of a
/// level follow on one comma-separated line. A directory that only holds files
/// lists them on its own line. Ignored directories are left out entirely.
///
/// Example output:
/// ```text
/// /
///   /src
///     /foo
///       /empty1
///       /files_no_folders: file1.js, file2.js
///       bar.js, fighters.js
///     main.js, other.js
///   package.json
/// ```
pub fn build_tree(ctx: &ProjectContext) -> WorkspaceResult<String> {
    let listings = collect_listings(ctx)?;
    let mut output = String::from("/");
    render_dir(&listings, &mut output, Path::new(""), "");
    Ok(output)
}

#[derive(Debug, Default)]
pub(crate) struct DirListing {
    pub(crate) dirs: Vec<String>,
    pub(crate) files: Vec<String>,
}

/// Visible subdirectories and regular files of every directory reached by the
/// workspace walk, keyed by path relative to the root.
pub(crate) fn collect_listings(
    ctx: &ProjectContext,
) -> WorkspaceResult<HashMap<PathBuf, DirListing>> {
    let mut listings: HashMap<PathBuf, DirListing> = HashMap::new();

    for entry in walk_workspace(ctx) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(ctx.root())
            .unwrap_or(entry.path())
            .to_path_buf();

        if entry.file_type().is_dir() {
            listings.entry(relative.clone()).or_default();
        }
        if entry.depth() == 0 {
            continue;
        }

        let parent = relative.parent().map(Path::to_path_buf).unwrap_or_default();
        let name = entry.file_name().to_string_lossy().into_owned();
        let listing = listings.entry(parent).or_default();
        if entry.file_type().is_dir() {
            listing.dirs.push(name);
        } else if entry.file_type().is_file() {
            listing.files.push(name);
        }
    }

    Ok(listings)
}

/// Render the contents of `dir`, continuing the line its name was written on.
fn render_dir(
    listings: &HashMap<PathBuf, DirListing>,
    output: &mut String,
    dir: &Path,
    prefix: &str,
) {
    let Some(listing) = listings.get(dir) else {
        output.push('\n');
        return;
    };

    if listing.dirs.is_empty() {
        if !listing.files.is_empty() {
            output.push_str(": ");
            output.push_str(&listing.files.join(", "));
        }
        output.push('\n');
        return;
    }

    output.push('\n');
    let child_prefix = format!("{}{}", prefix, INDENT);
    for name in &listing.dirs {
        output.push_str(&child_prefix);
        output.push('/');
        output.push_str(name);
        render_dir(listings, output, &dir.join(name), &child_prefix);
    }

    if !listing.files.is_empty() {
        output.push_str(&child_prefix);
        output.push_str(&listing.files.join(", "));
        output.push('\n');
    }
}
