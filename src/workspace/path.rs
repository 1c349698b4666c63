use serde::{Deserialize, Serialize};

use super::context::ProjectContext;

/// Where a logical file lives, relative to the project root and absolute.
///
/// Both paths use forward slashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFileLocation {
    pub relative_path: String,
    pub absolute_path: String,
}

impl ResolvedFileLocation {
    /// Split the relative path into its directory and file name.
    ///
    /// The directory is empty for files at the root.
    pub fn split(&self) -> (&str, &str) {
        match self.relative_path.rsplit_once('/') {
            Some((dir, name)) => (dir, name),
            None => ("", self.relative_path.as_str()),
        }
    }
}

/// Resolve a `(path, name)` pair into a location under the project root.
///
/// `path` may be a directory (with or without a trailing `/`) or the complete
/// relative file path. Empty values count as missing. When the last segment of
/// `path` already equals `name`, `name` is not appended again. A leading `./`
/// is kept as given.
///
/// Absolute and `~` paths are not supported; they are joined onto the root
/// like any other relative path.
pub fn resolve(ctx: &ProjectContext, path: Option<&str>, name: Option<&str>) -> ResolvedFileLocation {
    let path = path.filter(|p| !p.is_empty()).map(|p| p.replace('\\', "/"));
    let name = name.filter(|n| !n.is_empty()).map(|n| n.replace('\\', "/"));

    let relative_path = match (path, name) {
        (None, None) => String::new(),
        (None, Some(name)) => name,
        (Some(path), None) => path,
        (Some(path), Some(name)) => join_relative(path, &name),
    };

    let absolute_path = join_root(&ctx.root_str(), &relative_path);
    tracing::debug!(%relative_path, %absolute_path, "Resolved file location");

    ResolvedFileLocation {
        relative_path,
        absolute_path,
    }
}

fn join_relative(path: String, name: &str) -> String {
    if path.rsplit('/').next() == Some(name) {
        path
    } else if path.ends_with('/') {
        path + name
    } else {
        format!("{}/{}", path, name)
    }
}

pub(crate) fn join_root(root: &str, relative: &str) -> String {
    let relative = relative.trim_start_matches('/');
    if relative.is_empty() {
        root.to_string()
    } else if root.ends_with('/') {
        format!("{}{}", root, relative)
    } else {
        format!("{}/{}", root, relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "/work/test-app";

    fn ctx() -> ProjectContext {
        ProjectContext::new(ROOT)
    }

    fn absolute(path: &str, name: &str) -> String {
        resolve(&ctx(), Some(path), Some(name)).absolute_path
    }

    #[test]
    fn test_path_equal_to_name() {
        assert_eq!(absolute("file.txt", "file.txt"), format!("{ROOT}/file.txt"));
        assert_eq!(
            absolute("package.json", "package.json"),
            absolute("", "package.json")
        );
    }

    #[test]
    fn test_empty_path_uses_name() {
        assert_eq!(absolute("", "file.txt"), format!("{ROOT}/file.txt"));

        let loc = resolve(&ctx(), None, Some("Dockerfile"));
        assert_eq!(loc.relative_path, "Dockerfile");
        assert_eq!(loc.absolute_path, format!("{ROOT}/Dockerfile"));
    }

    #[test]
    fn test_directory_with_trailing_separator() {
        assert_eq!(absolute("path/", "file.txt"), format!("{ROOT}/path/file.txt"));
        assert_eq!(
            absolute("path/to/", "file.txt"),
            format!("{ROOT}/path/to/file.txt")
        );
    }

    #[test]
    fn test_directory_without_trailing_separator() {
        assert_eq!(
            absolute("path/to", "file.txt"),
            format!("{ROOT}/path/to/file.txt")
        );
    }

    #[test]
    fn test_path_already_ends_with_name() {
        assert_eq!(
            absolute("path/to/file.txt", "file.txt"),
            format!("{ROOT}/path/to/file.txt")
        );
    }

    #[test]
    fn test_name_only_matches_whole_segment() {
        assert_eq!(
            absolute("path/myfile.txt", "file.txt"),
            format!("{ROOT}/path/myfile.txt/file.txt")
        );
    }

    #[test]
    fn test_leading_dot_segment_is_preserved() {
        let loc = resolve(&ctx(), Some("./path/to/file.txt"), Some("file.txt"));
        assert_eq!(loc.relative_path, "./path/to/file.txt");
        assert_eq!(loc.absolute_path, format!("{ROOT}/./path/to/file.txt"));
    }

    #[test]
    fn test_missing_or_empty_name_uses_path() {
        for name in [None, Some("")] {
            let loc = resolve(&ctx(), Some("public/index.html"), name);
            assert_eq!(loc.relative_path, "public/index.html");
            assert_eq!(loc.absolute_path, format!("{ROOT}/public/index.html"));
        }
    }

    #[test]
    fn test_nothing_given_resolves_to_root() {
        let loc = resolve(&ctx(), Some(""), None);
        assert_eq!(loc.relative_path, "");
        assert_eq!(loc.absolute_path, ROOT);
    }

    #[test]
    fn test_absolute_input_stays_under_root() {
        assert_eq!(absolute("/etc", "hosts"), format!("{ROOT}/etc/hosts"));
    }

    #[test]
    fn test_root_with_trailing_separator() {
        let ctx = ProjectContext::new("/work/test-app/");
        let loc = resolve(&ctx, Some("src"), Some("main.rs"));
        assert_eq!(loc.absolute_path, "/work/test-app/src/main.rs");
    }

    #[test]
    fn test_backslashes_are_normalized() {
        let loc = resolve(&ctx(), Some("src\\bin"), Some("main.rs"));
        assert_eq!(loc.relative_path, "src/bin/main.rs");
    }

    #[test]
    fn test_split() {
        let loc = resolve(&ctx(), Some("src/foo/"), Some("bar.js"));
        assert_eq!(loc.split(), ("src/foo", "bar.js"));

        let loc = resolve(&ctx(), None, Some("package.json"));
        assert_eq!(loc.split(), ("", "package.json"));
    }
}
