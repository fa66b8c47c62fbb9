//! Input resolution
//!
//! Turns an [`InputSource`] into the root WIT document plus its dependency
//! documents, whatever the execution environment. Everything downstream only
//! sees text and logical paths.

use crate::config::{InputSource, WitFile};
use crate::vfs::{normalize_path, OsVfs, SandboxFs, Vfs};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Directory, next to the root WIT file, holding dependency packages.
pub const DEPS_DIR: &str = "deps";

/// Errors from resolving inputs
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A declared path does not exist (or is not reachable from the sandbox)
    #[error("Input not found: {path}")]
    InputNotFound { path: String },

    /// The file exists but could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for input resolution
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Where filesystem inputs are read from.
#[derive(Debug, Clone)]
pub enum ExecutionContext {
    /// The real OS filesystem. Relative paths are resolved against
    /// `base_dir`, or the current directory when it is `None`.
    Native { base_dir: Option<PathBuf> },
    /// A read-only sandbox tree reached through preopened directories.
    Sandboxed(SandboxFs),
}

impl Default for ExecutionContext {
    fn default() -> Self {
        ExecutionContext::Native { base_dir: None }
    }
}

impl ExecutionContext {
    pub fn native() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        ExecutionContext::Native {
            base_dir: Some(base_dir.into()),
        }
    }
}

/// The root WIT document and the documents it may import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
    pub root: WitFile,
    pub deps: Vec<WitFile>,
}

impl ResolvedInputs {
    /// All documents, root first.
    pub fn documents(&self) -> impl Iterator<Item = &WitFile> {
        std::iter::once(&self.root).chain(self.deps.iter())
    }
}

/// Resolves input sources within one execution context.
#[derive(Debug, Clone, Default)]
pub struct InputResolver {
    context: ExecutionContext,
}

impl InputResolver {
    pub fn new(context: ExecutionContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Load the root document and its dependencies.
    pub fn resolve(&self, input: &InputSource) -> Result<ResolvedInputs> {
        match input {
            InputSource::InMemoryFiles {
                world_file,
                pkg_files,
            } => {
                debug!(
                    root = %world_file.path,
                    deps = pkg_files.len(),
                    "Using in-memory WIT documents"
                );
                Ok(ResolvedInputs {
                    root: normalize_label(world_file),
                    deps: pkg_files.iter().map(normalize_label).collect(),
                })
            }
            InputSource::FileSystemPaths { input_path } => match &self.context {
                ExecutionContext::Native { base_dir } => {
                    let path = absolute_path(base_dir.as_deref(), input_path)?;
                    debug!(path = %path.display(), "Resolving WIT input from the filesystem");
                    resolve_from_vfs(&OsVfs, &path)
                }
                ExecutionContext::Sandboxed(fs) => {
                    let host_path = normalize_path(&path_label(input_path));
                    let sandbox_path = fs
                        .to_sandbox_path(&host_path)
                        .map(|path| normalize_path(&path))
                        .ok_or(ResolveError::InputNotFound { path: host_path.clone() })?;
                    debug!(
                        host = %host_path,
                        sandbox = %sandbox_path,
                        "Resolving WIT input from the sandbox"
                    );
                    resolve_from_vfs(fs, Path::new(&sandbox_path)).map_err(|err| match err {
                        ResolveError::InputNotFound { path } => ResolveError::InputNotFound {
                            path: fs.to_host_path(&path).unwrap_or(path),
                        },
                        err => err,
                    })
                }
            },
        }
    }
}

/// Read `root` and every `*.wit` file under the `deps/` directory beside it.
pub fn resolve_from_vfs(vfs: &impl Vfs, root: &Path) -> Result<ResolvedInputs> {
    let root_file = read_wit(vfs, root)?;

    let deps_dir = root
        .parent()
        .map(|parent| parent.join(DEPS_DIR))
        .unwrap_or_else(|| PathBuf::from(DEPS_DIR));
    let mut deps = Vec::new();
    if vfs.is_dir(&deps_dir) {
        let pattern = format!(
            "{}/**/*.wit",
            glob::Pattern::escape(path_label(&deps_dir).trim_end_matches('/'))
        );
        let files = vfs.glob(&pattern).map_err(|source| ResolveError::Io {
            path: path_label(&deps_dir),
            source,
        })?;
        for file in files {
            deps.push(read_wit(vfs, &file)?);
        }
    }
    debug!(root = %root_file.path, deps = deps.len(), "Resolved WIT documents");

    Ok(ResolvedInputs {
        root: root_file,
        deps,
    })
}

fn read_wit(vfs: &impl Vfs, path: &Path) -> Result<WitFile> {
    let label = path_label(path);
    match vfs.read_to_string(path) {
        Ok(contents) => Ok(WitFile {
            path: label,
            contents,
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(ResolveError::InputNotFound { path: label })
        }
        Err(source) => Err(ResolveError::Io {
            path: label,
            source,
        }),
    }
}

/// Absolute, lexically normalized form of `path`.
fn absolute_path(base_dir: Option<&Path>, path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let base = match base_dir {
            Some(base) if base.is_absolute() => base.to_path_buf(),
            Some(base) => current_dir()?.join(base),
            None => current_dir()?,
        };
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|source| ResolveError::Io {
        path: ".".to_string(),
        source,
    })
}

fn path_label(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn normalize_label(file: &WitFile) -> WitFile {
    let mut path = file.path.replace('\\', "/");
    while let Some(rest) = path.strip_prefix("./") {
        path = rest.to_string();
    }
    WitFile {
        path,
        contents: file.contents.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::{PreopenedDir, SandboxNode};

    fn write_project(root: &Path) -> anyhow::Result<()> {
        OsVfs.write_from_string(&root.join("wit/host.wit"), "package my:host;")?;
        OsVfs.write_from_string(&root.join("wit/deps/b/types.wit"), "package b:types;")?;
        OsVfs.write_from_string(&root.join("wit/deps/a.wit"), "package a:a;")?;
        OsVfs.write_from_string(&root.join("wit/deps/notes.txt"), "ignored")?;
        Ok(())
    }

    #[test]
    fn test_native_resolution_with_base_dir() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        write_project(dir.path())?;

        let resolver = InputResolver::new(ExecutionContext::with_base_dir(dir.path()));
        let resolved = resolver.resolve(&InputSource::path("./wit/../wit/host.wit"))?;

        assert_eq!(resolved.root.path, path_label(&dir.path().join("wit/host.wit")));
        assert_eq!(resolved.root.contents, "package my:host;");
        let contents: Vec<&str> = resolved.deps.iter().map(|f| f.contents.as_str()).collect();
        assert_eq!(contents, vec!["package a:a;", "package b:types;"]);
        Ok(())
    }

    #[test]
    fn test_native_missing_input() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let resolver = InputResolver::new(ExecutionContext::with_base_dir(dir.path()));
        let err = resolver.resolve(&InputSource::path("missing.wit")).unwrap_err();
        match err {
            ResolveError::InputNotFound { path } => assert!(path.ends_with("/missing.wit")),
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[test]
    fn test_sandbox_matches_native() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        write_project(dir.path())?;
        let host_root = path_label(dir.path());

        let tree = SandboxNode::snapshot(&OsVfs, dir.path())?;
        let fs = SandboxFs::new(vec![(PreopenedDir::new(host_root.clone(), "/project"), tree)]);
        let resolver = InputResolver::new(ExecutionContext::Sandboxed(fs));

        let resolved = resolver.resolve(&InputSource::path(format!("{host_root}/wit/host.wit")))?;
        assert_eq!(resolved.root.path, "/project/wit/host.wit");
        let deps: Vec<&str> = resolved.deps.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(deps, vec!["/project/wit/deps/a.wit", "/project/wit/deps/b/types.wit"]);
        Ok(())
    }

    #[test]
    fn test_sandbox_dotted_path_keeps_deps() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        write_project(dir.path())?;
        let host_root = path_label(dir.path());
        let dotted = format!("{host_root}/./wit/../wit/host.wit");

        let tree = SandboxNode::snapshot(&OsVfs, dir.path())?;
        let fs = SandboxFs::new(vec![(PreopenedDir::new(host_root.clone(), "/project"), tree)]);
        let sandboxed = InputResolver::new(ExecutionContext::Sandboxed(fs))
            .resolve(&InputSource::path(&dotted))?;
        let native = InputResolver::default().resolve(&InputSource::path(&dotted))?;

        assert_eq!(sandboxed.root.path, "/project/wit/host.wit");
        let deps: Vec<&str> = sandboxed.deps.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(deps, vec!["/project/wit/deps/a.wit", "/project/wit/deps/b/types.wit"]);
        let contents = |inputs: &ResolvedInputs| -> Vec<String> {
            inputs.deps.iter().map(|f| f.contents.clone()).collect()
        };
        assert_eq!(contents(&sandboxed), contents(&native));
        Ok(())
    }

    #[test]
    fn test_sandbox_missing_input_reports_host_path() {
        let fs = SandboxFs::new(vec![(PreopenedDir::new("/host/project", "/guest"), SandboxNode::dir())]);
        let resolver = InputResolver::new(ExecutionContext::Sandboxed(fs));
        let err = resolver.resolve(&InputSource::path("/host/project/wit/host.wit")).unwrap_err();
        assert_eq!(err.to_string(), "Input not found: /host/project/wit/host.wit");
    }

    #[test]
    fn test_sandbox_without_matching_preopen() {
        let fs = SandboxFs::new(vec![(PreopenedDir::new("/host", "/guest"), SandboxNode::dir())]);
        let resolver = InputResolver::new(ExecutionContext::Sandboxed(fs));
        let err = resolver.resolve(&InputSource::path("/other/host.wit")).unwrap_err();
        assert_eq!(err.to_string(), "Input not found: /other/host.wit");
    }

    #[test]
    fn test_in_memory_labels_are_normalized() -> anyhow::Result<()> {
        let resolved = InputResolver::default().resolve(&InputSource::in_memory(
            WitFile::new(".\\wit\\host.wit", "package a:b;"),
            vec![WitFile::new("./deps/c.wit", "package c:d;")],
        ))?;
        assert_eq!(resolved.root.path, "wit/host.wit");
        assert_eq!(resolved.deps[0].path, "deps/c.wit");
        assert_eq!(resolved.documents().count(), 2);
        Ok(())
    }
}
