//! Local filesystem storage backend
//!
//! All operations complete immediately (synchronous).

use super::StorageError;
use std::path::PathBuf;

/// Suffix for the sibling file used by `write_atomic`
const TEMP_SUFFIX: &str = ".tmp";

/// Local filesystem storage backend
///
/// Wraps standard filesystem operations relative to a base directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    /// Base directory for relative paths (usually current working directory)
    base_dir: PathBuf,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    /// Create a new local storage backend rooted at the current directory
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
        }
    }

    /// Create a local storage backend with a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a path relative to the base directory
    fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Read a file
    pub fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full_path = self.resolve(path);
        std::fs::read(&full_path).map_err(StorageError::from)
    }

    /// Write a file in one whole-buffer write
    ///
    /// Creates or overwrites the file with the given data.
    pub fn write(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve(path);

        // Ensure parent directory exists
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&full_path, data)?;
        Ok(())
    }

    /// Write a file via a temporary sibling and a rename
    ///
    /// A crash mid-write leaves the previous file intact; only the `.tmp`
    /// sibling can be left behind.
    pub fn write_atomic(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut temp_name = full_path.clone().into_os_string();
        temp_name.push(TEMP_SUFFIX);
        let temp_path = PathBuf::from(temp_name);

        std::fs::write(&temp_path, data)?;
        if let Err(e) = std::fs::rename(&temp_path, &full_path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }
        Ok(())
    }

    /// Check if a file exists
    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, LocalStorage) {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::with_base_dir(dir.path());
        (dir, storage)
    }

    #[test]
    fn test_write_and_read() {
        let (_dir, storage) = setup_test_dir();

        let data = b"l 0.0,0.0 1.0,1.0\n";
        storage.write("test.txt", data).unwrap();

        let result = storage.read("test.txt").unwrap();
        assert_eq!(result, data);
    }

    #[test]
    fn test_read_not_found() {
        let (_dir, storage) = setup_test_dir();

        let result = storage.read("nonexistent.txt");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_read_directory_is_not_not_found() {
        let (dir, storage) = setup_test_dir();
        std::fs::create_dir(dir.path().join("level.txt")).unwrap();

        // A directory where a level should be is a real failure, not "start empty"
        let result = storage.read("level.txt");
        assert!(result.is_err());
        assert!(!result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_exists() {
        let (dir, storage) = setup_test_dir();

        std::fs::write(dir.path().join("exists.txt"), "x").unwrap();

        assert!(storage.exists("exists.txt"));
        assert!(!storage.exists("not_exists.txt"));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let (_dir, storage) = setup_test_dir();

        storage.write("deep/nested/dir/file.txt", b"data").unwrap();
        assert_eq!(storage.read("deep/nested/dir/file.txt").unwrap(), b"data");
    }

    #[test]
    fn test_write_atomic_replaces_and_cleans_up() {
        let (dir, storage) = setup_test_dir();

        storage.write("levels/a.txt", b"old").unwrap();
        storage.write_atomic("levels/a.txt", b"new").unwrap();

        assert_eq!(storage.read("levels/a.txt").unwrap(), b"new");
        assert!(!dir.path().join("levels/a.txt.tmp").exists());
    }
}
