use super::preopen::{normalize_separators, strip_dir_prefix};
use super::{PreopenedDir, Vfs};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Error, ErrorKind, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A node of the sandbox filesystem tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SandboxNode {
    Dir(BTreeMap<String, SandboxNode>),
    File(Vec<u8>),
}

impl SandboxNode {
    pub fn dir() -> Self {
        SandboxNode::Dir(BTreeMap::new())
    }

    pub fn file(contents: impl Into<Vec<u8>>) -> Self {
        SandboxNode::File(contents.into())
    }

    /// Insert a file at a "/" separated path relative to this directory,
    /// creating intermediate directories.
    ///
    /// Returns an error if this node or an intermediate component is a file.
    pub fn insert(&mut self, relative_path: &str, contents: impl Into<Vec<u8>>) -> Result<()> {
        let parts: Vec<&str> = components(relative_path);
        let Some((file_name, dirs)) = parts.split_last() else {
            return Err(Error::new(ErrorKind::InvalidInput, "empty sandbox path"));
        };
        let mut node = self;
        for dir in dirs {
            let SandboxNode::Dir(entries) = node else {
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    format!("not a directory in sandbox path: {relative_path}"),
                ));
            };
            node = entries
                .entry((*dir).to_string())
                .or_insert_with(SandboxNode::dir);
        }
        let SandboxNode::Dir(entries) = node else {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("not a directory in sandbox path: {relative_path}"),
            ));
        };
        entries.insert((*file_name).to_string(), SandboxNode::File(contents.into()));
        Ok(())
    }

    /// Snapshot a directory of another filesystem into a tree.
    pub fn snapshot(vfs: &impl Vfs, path: &Path) -> Result<Self> {
        if !vfs.is_dir(path) {
            return Ok(SandboxNode::File(vfs.read(path)?));
        }
        let mut entries = BTreeMap::new();
        for child in vfs.list_dir(path)? {
            let Some(name) = child.file_name() else {
                continue;
            };
            entries.insert(
                name.to_string_lossy().into_owned(),
                SandboxNode::snapshot(vfs, &child)?,
            );
        }
        Ok(SandboxNode::Dir(entries))
    }

    fn lookup(&self, parts: &[&str]) -> Option<&SandboxNode> {
        let mut node = self;
        for part in parts {
            match node {
                SandboxNode::Dir(entries) => node = entries.get(*part)?,
                SandboxNode::File(_) => return None,
            }
        }
        Some(node)
    }

    fn collect_files(&self, prefix: &str, out: &mut Vec<String>) {
        match self {
            SandboxNode::File(_) => out.push(prefix.to_string()),
            SandboxNode::Dir(entries) => {
                for (name, child) in entries {
                    child.collect_files(&join(prefix, name), out);
                }
            }
        }
    }
}

/// Read-only filesystem made of preopened directories, each backed by an
/// in-memory tree.
///
/// Paths passed to the [`Vfs`] methods are sandbox paths. Cloning is cheap
/// and the tree is never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct SandboxFs {
    mounts: Arc<Vec<(PreopenedDir, SandboxNode)>>,
}

impl SandboxFs {
    pub fn new(mounts: Vec<(PreopenedDir, SandboxNode)>) -> Self {
        Self {
            mounts: Arc::new(mounts),
        }
    }

    /// Translate a sandbox path back to the host through the preopens.
    ///
    /// The longest matching sandbox prefix wins.
    pub fn to_host_path(&self, sandbox_path: &str) -> Option<String> {
        self.mounts
            .iter()
            .filter_map(|(dir, _)| dir.to_host(sandbox_path).map(|p| (dir.sandbox_path.len(), p)))
            .max_by_key(|(len, _)| *len)
            .map(|(_, p)| p)
    }

    /// Translate a host path into a sandbox path through the preopens.
    ///
    /// The longest matching host prefix wins. Paths that are already sandbox
    /// paths are returned unchanged.
    pub fn to_sandbox_path(&self, path: &str) -> Option<String> {
        let translated = self
            .mounts
            .iter()
            .filter_map(|(dir, _)| dir.to_sandbox(path).map(|p| (dir.host_path.len(), p)))
            .max_by_key(|(len, _)| *len)
            .map(|(_, p)| p);
        translated.or_else(|| {
            self.mount_for(path)
                .map(|_| normalize_separators(path))
        })
    }

    fn mount_for(&self, sandbox_path: &str) -> Option<(&SandboxNode, String)> {
        let sandbox_path = normalize_separators(sandbox_path);
        self.mounts
            .iter()
            .filter_map(|(dir, node)| {
                strip_dir_prefix(&sandbox_path, &dir.sandbox_path)
                    .map(|rest| (dir.sandbox_path.len(), node, rest.to_string()))
            })
            .max_by_key(|(len, _, _)| *len)
            .map(|(_, node, rest)| (node, rest))
    }

    fn node(&self, path: &Path) -> Option<&SandboxNode> {
        let (root, rest) = self.mount_for(&path.to_string_lossy())?;
        let parts = resolve_dots(&rest)?;
        root.lookup(&parts)
    }
}

impl Vfs for SandboxFs {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        match self.node(path) {
            Some(SandboxNode::File(bytes)) => Ok(bytes.clone()),
            Some(SandboxNode::Dir(_)) => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Is a directory: {}", path.display()),
            )),
            None => Err(Error::new(
                ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )),
        }
    }

    fn write_from_string(&self, path: &Path, _content: &str) -> Result<()> {
        Err(Error::new(
            ErrorKind::PermissionDenied,
            format!("Sandbox is read-only: {}", path.display()),
        ))
    }

    fn exists(&self, path: &Path) -> bool {
        self.node(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.node(path), Some(SandboxNode::Dir(_)))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        match self.node(path) {
            Some(SandboxNode::Dir(entries)) => {
                let base = normalize_separators(&path.to_string_lossy());
                Ok(entries
                    .keys()
                    .map(|name| PathBuf::from(join(base.trim_end_matches('/'), name)))
                    .collect())
            }
            Some(SandboxNode::File(_)) => Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Not a directory: {}", path.display()),
            )),
            None => Err(Error::new(
                ErrorKind::NotFound,
                format!("Directory not found: {}", path.display()),
            )),
        }
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let glob_pattern = glob::Pattern::new(pattern)
            .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;

        let mut files = Vec::new();
        for (dir, node) in self.mounts.iter() {
            node.collect_files(&dir.sandbox_path, &mut files);
        }

        let mut matches: Vec<PathBuf> = files
            .into_iter()
            .filter(|path| glob_pattern.matches(path))
            .map(PathBuf::from)
            .collect();
        matches.sort();
        matches.dedup();
        Ok(matches)
    }
}

fn components(path: &str) -> Vec<&str> {
    path.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect()
}

/// Lexically resolve `.` and `..`; `None` if the path escapes the mount.
fn resolve_dots(path: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            part => parts.push(part),
        }
    }
    Some(parts)
}

fn join(base: &str, name: &str) -> String {
    if base == "/" {
        format!("/{name}")
    } else {
        format!("{base}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::OsVfs;

    fn sample() -> SandboxFs {
        let mut tree = SandboxNode::dir();
        tree.insert("wit/host.wit", "package a:b;").unwrap();
        tree.insert("wit/deps/c/c.wit", "package c:d;").unwrap();
        SandboxFs::new(vec![(PreopenedDir::new("/home/me/project", "/"), tree)])
    }

    #[test]
    fn test_read_through_preopen() {
        let fs = sample();
        let path = fs.to_sandbox_path("/home/me/project/wit/host.wit").unwrap();
        assert_eq!(path, "/wit/host.wit");
        assert_eq!(fs.read_to_string(Path::new(&path)).unwrap(), "package a:b;");
        assert!(fs.is_dir(Path::new("/wit/deps")));
        assert!(!fs.exists(Path::new("/wit/missing.wit")));
        assert!(fs.exists(Path::new("/wit/deps/../host.wit")));
    }

    #[test]
    fn test_unmapped_host_path() {
        let mut tree = SandboxNode::dir();
        tree.insert("a.wit", "").unwrap();
        let fs = SandboxFs::new(vec![(PreopenedDir::new("/host", "/guest"), tree)]);
        assert_eq!(fs.to_sandbox_path("/elsewhere/a.wit"), None);
        assert_eq!(fs.to_sandbox_path("/guest/a.wit"), Some("/guest/a.wit".to_string()));
        assert_eq!(fs.to_host_path("/guest/a.wit"), Some("/host/a.wit".to_string()));
        assert_eq!(fs.to_host_path("/other/a.wit"), None);
    }

    #[test]
    fn test_glob_and_list_dir() {
        let fs = sample();
        assert_eq!(
            fs.glob("/wit/deps/**/*.wit").unwrap(),
            vec![PathBuf::from("/wit/deps/c/c.wit")]
        );
        assert_eq!(
            fs.list_dir(Path::new("/wit")).unwrap(),
            vec![PathBuf::from("/wit/deps"), PathBuf::from("/wit/host.wit")]
        );
    }

    #[test]
    fn test_sandbox_is_read_only() {
        let err = sample()
            .write_from_string(Path::new("/wit/out.dart"), "")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_snapshot_host_dir() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        OsVfs.write_from_string(&dir.path().join("wit/host.wit"), "package a:b;")?;
        let tree = SandboxNode::snapshot(&OsVfs, dir.path())?;

        let mut expected = SandboxNode::dir();
        expected.insert("wit/host.wit", "package a:b;")?;
        assert_eq!(tree, expected);
        Ok(())
    }
}
