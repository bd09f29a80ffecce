use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{Error, Result};

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::filesystem(parent, e))?;
    }
    fs::write(path, content).map_err(|e| Error::filesystem(path, e))?;
    Ok(())
}

/// A file to be generated
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file, replacing any previous content
    pub fn write(&self) -> Result<()> {
        write_file(&self.path, &self.content)
    }
}

/// Recursively delete a directory if it exists.
///
/// Returns whether anything was removed.
pub fn remove_dir_if_exists(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(path).map_err(|e| Error::filesystem(path, e))?;
    Ok(true)
}

/// Delete a directory if present, then create it empty.
pub fn recreate_dir(path: &Path) -> Result<()> {
    remove_dir_if_exists(path)?;
    fs::create_dir_all(path).map_err(|e| Error::filesystem(path, e))
}

/// Copy a file, overwriting the destination.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to).map_err(|e| Error::filesystem(from, e))?;
    Ok(())
}

/// Move a file, falling back to copy + remove when a rename is not possible
/// (e.g. across filesystems).
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    copy_file(from, to)?;
    fs::remove_file(from).map_err(|e| Error::filesystem(from, e))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("BUILD");

        File::new(&path, "nested").write().unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_file_write_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("BUILD");

        fs::write(&path, "original").unwrap();

        let file = File::new(&path, "updated");
        assert!(file.exists());
        file.write().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
        assert_eq!(file.content(), "updated");
    }

    #[test]
    fn test_recreate_dir_drops_old_contents() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("echo_go");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("stale.pb.go"), "old").unwrap();

        recreate_dir(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_remove_dir_if_exists() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("gone");

        assert!(!remove_dir_if_exists(&dir).unwrap());
        fs::create_dir(&dir).unwrap();
        assert!(remove_dir_if_exists(&dir).unwrap());
        assert!(!dir.exists());
    }

    #[test]
    fn test_move_file() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("echo.pb.go");
        let to = temp.path().join("echo.moved.go");
        fs::write(&from, "package echo").unwrap();

        move_file(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "package echo");
    }

    #[test]
    fn test_copy_missing_source_is_filesystem_error() {
        let temp = TempDir::new().unwrap();
        let err = copy_file(&temp.path().join("missing"), &temp.path().join("x")).unwrap_err();
        assert!(matches!(*err, Error::Filesystem { .. }));
    }
}
