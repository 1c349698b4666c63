use super::context::ProjectContext;

/// Directory names never descended into: version control, editor settings,
/// interpreter caches, dependency caches and build output.
pub const IGNORED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".idea",
    ".vscode",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    "node_modules",
    "venv",
    ".venv",
    "dist",
    "build",
    "target",
];

/// Whether a directory called `name` is excluded from trees and snapshots.
///
/// Only directory names are tested; files are never filtered.
pub fn is_ignored(ctx: &ProjectContext, name: &str) -> bool {
    name == ctx.metadata_dir_name() || IGNORED_DIRS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_directories_are_ignored() {
        let ctx = ProjectContext::new("/work/app");
        for name in [".git", ".idea", ".vscode", "__pycache__", "node_modules", "venv", "dist", "build"] {
            assert!(is_ignored(&ctx, name), "{name} should be ignored");
        }
    }

    #[test]
    fn test_metadata_directory_is_ignored() {
        let ctx = ProjectContext::with_metadata_dir("/work/app", ".tool-state");
        assert!(is_ignored(&ctx, ".tool-state"));
        assert!(!is_ignored(&ctx, ".pilot"));
    }

    #[test]
    fn test_regular_directories_are_kept() {
        let ctx = ProjectContext::new("/work/app");
        assert!(!is_ignored(&ctx, "src"));
        assert!(!is_ignored(&ctx, "builds"));
        assert!(!is_ignored(&ctx, ".github"));
    }
}
