use std::io::Result;
use std::path::{Path, PathBuf};

/// Virtual File System trait
///
/// Abstraction over file system operations so the same input resolution runs
/// against:
/// - the OS file system (native execution)
/// - a read-only sandbox tree exposed through preopened directories
///   (browser or otherwise restricted hosts)
///
/// # Contract
///
/// - **`exists(path)`**: `true` if the path refers to either a file OR a directory.
/// - **`is_dir(path)`**: `true` only if the path is a directory. Implies `exists()`.
/// - **`read`/`read_to_string`**: only succeed for files, fail with
///   `ErrorKind::NotFound` for missing paths.
/// - **`list_dir(path)`**: contents of a directory. Fails if path is not a directory.
/// - **`glob(pattern)`**: all matching file paths, sorted.
pub trait Vfs {
    /// Read a file's raw bytes.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Read a file to a string.
    ///
    /// Returns an error if the path does not exist, is a directory, or is not UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Write a string to a file.
    ///
    /// Creates parent directories as needed. Overwrites existing files.
    fn write_from_string(&self, path: &Path, content: &str) -> Result<()>;

    /// Check if a path exists (file OR directory).
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// List directory contents.
    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Resolve a glob pattern to the sorted list of matching files.
    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;
}

pub use os::OsVfs;
pub use preopen::{normalize_path, PreopenedDir};
pub use sandbox::{SandboxFs, SandboxNode};

mod os;
mod preopen;
mod sandbox;
