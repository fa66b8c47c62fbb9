//! Preopened directory mappings for sandboxed filesystem access
//!
//! A sandboxed guest only sees the directories a host preopened for it, each
//! under a fixed sandbox path. Translation between the two sides is plain
//! string manipulation so it behaves the same on every host.

use serde::{Deserialize, Serialize};

/// A host directory exposed to the sandbox under `sandbox_path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreopenedDir {
    /// The path on the host
    pub host_path: String,
    /// The path visible inside the sandbox. Should be "/" separated.
    pub sandbox_path: String,
}

impl PreopenedDir {
    pub fn new(host_path: impl Into<String>, sandbox_path: impl Into<String>) -> Self {
        Self {
            host_path: normalize_prefix(&host_path.into()),
            sandbox_path: normalize_prefix(&sandbox_path.into()),
        }
    }

    /// Translate a host path into the sandbox.
    ///
    /// Returns None if the path is not under `host_path`.
    pub fn to_sandbox(&self, host_path: &str) -> Option<String> {
        let host_path = normalize_separators(host_path);
        strip_dir_prefix(&host_path, &self.host_path).map(|suffix| join(&self.sandbox_path, suffix))
    }

    /// Translate a sandbox path back to the host.
    ///
    /// Returns None if the path is not under `sandbox_path`.
    pub fn to_host(&self, sandbox_path: &str) -> Option<String> {
        let sandbox_path = normalize_separators(sandbox_path);
        strip_dir_prefix(&sandbox_path, &self.sandbox_path).map(|suffix| join(&self.host_path, suffix))
    }
}

/// Lexically normalize a path: `/` separators, no `.` components and `..`
/// folded into its parent.
///
/// `..` at an absolute root is dropped. Leading `..` of a relative path is
/// kept since there is nothing to fold it into.
pub fn normalize_path(path: &str) -> String {
    let path = normalize_separators(path);
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            part => parts.push(part),
        }
    }
    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Strip `prefix` from `path` at a component boundary, returning the
/// remainder without its leading separator.
pub(crate) fn strip_dir_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix == "/" {
        return path.strip_prefix('/');
    }
    if prefix == "." {
        return Some(path.strip_prefix("./").unwrap_or(path));
    }
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() {
        Some("")
    } else {
        rest.strip_prefix('/')
    }
}

pub(crate) fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

fn normalize_prefix(path: &str) -> String {
    let path = normalize_separators(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        if path.starts_with('/') {
            "/".to_string()
        } else {
            ".".to_string()
        }
    } else {
        trimmed.to_string()
    }
}

fn join(base: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        base.to_string()
    } else if base == "/" {
        format!("/{suffix}")
    } else {
        format!("{base}/{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/home/me/project/wit/host.wit", Some("/workspace/wit/host.wit"))]
    #[case("/home/me/project", Some("/workspace"))]
    #[case("/home/me/project/./wit/a.wit", Some("/workspace/./wit/a.wit"))]
    #[case("/home/me/projects/x.wit", None)]
    #[case("relative/x.wit", None)]
    fn test_host_to_sandbox(#[case] host: &str, #[case] expected: Option<&str>) {
        let dir = PreopenedDir::new("/home/me/project/", "/workspace");
        assert_eq!(dir.to_sandbox(host).as_deref(), expected);
    }

    #[test]
    fn test_sandbox_to_host_with_windows_separators() {
        let dir = PreopenedDir::new("C:\\work", "/");
        assert_eq!(dir.to_host("/wit/a.wit"), Some("C:/work/wit/a.wit".to_string()));
        assert_eq!(dir.to_sandbox("C:\\work\\wit\\a.wit"), Some("/wit/a.wit".to_string()));
    }

    #[rstest]
    #[case("/project/./wit/../wit/host.wit", "/project/wit/host.wit")]
    #[case("C:\\work\\.\\wit", "C:/work/wit")]
    #[case("/../wit", "/wit")]
    #[case("../shared/./a.wit", "../shared/a.wit")]
    #[case("wit/..", ".")]
    #[case("/", "/")]
    fn test_normalize_path(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(normalize_path(path), expected);
    }

    #[test]
    fn test_relative_sandbox_root() {
        let dir = PreopenedDir::new("/tmp/x", ".");
        assert_eq!(dir.to_sandbox("/tmp/x/a.wit"), Some("./a.wit".to_string()));
        assert_eq!(dir.to_host("./a.wit"), Some("/tmp/x/a.wit".to_string()));
    }
}
