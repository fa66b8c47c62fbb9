use super::Vfs;
use std::fs;
use std::io::Result;
use std::path::{Path, PathBuf};

/// OS File System implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct OsVfs;

impl Vfs for OsVfs {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
    }

    fn write_from_string(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            entries.push(entry.path());
        }
        entries.sort();
        Ok(entries)
    }

    fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in glob::glob(pattern).map_err(std::io::Error::other)? {
            let path = entry.map_err(std::io::Error::other)?;
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_returns_sorted_files_only() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let vfs = OsVfs;
        vfs.write_from_string(&dir.path().join("deps/b/b.wit"), "b")?;
        vfs.write_from_string(&dir.path().join("deps/a.wit"), "a")?;
        std::fs::create_dir_all(dir.path().join("deps/empty.wit"))?;

        let pattern = format!(
            "{}/deps/**/*.wit",
            glob::Pattern::escape(&dir.path().to_string_lossy())
        );
        let found = vfs.glob(&pattern)?;
        assert_eq!(
            found,
            vec![dir.path().join("deps/a.wit"), dir.path().join("deps/b/b.wit")]
        );
        Ok(())
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let err = OsVfs.read(Path::new("/no/such/file.wit")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
