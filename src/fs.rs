//! Filesystem helpers.

use std::fs;
use std::io;
use std::path::Path;

use tracing::trace;

/// Names of the immediate subdirectories of `path`.
///
/// Entries come back in the order the filesystem enumerates them; they are
/// not sorted. Symlinks are followed, so a link to a directory counts.
/// A missing path or a path that is not a directory is an error.
pub fn get_directories(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let path = path.as_ref();
    let mut dirs = Vec::new();

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry.path().is_dir() {
            dirs.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    trace!(path = %path.display(), count = dirs.len(), "listed directories");
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let root = TempDir::new().unwrap();
        for name in ["dir1", "dir2", "dir3"] {
            fs::create_dir(root.path().join(name)).unwrap();
        }
        fs::write(root.path().join("file.txt"), "not a dir").unwrap();
        fs::write(root.path().join("dir1").join("inner.txt"), "x").unwrap();
        root
    }

    #[test]
    fn test_lists_only_directories() {
        let root = fixture();
        let mut dirs = get_directories(root.path()).unwrap();
        dirs.sort();
        assert_eq!(dirs, vec!["dir1", "dir2", "dir3"]);
    }

    #[test]
    fn test_no_subdirectories() {
        let root = fixture();
        let dirs = get_directories(root.path().join("dir1")).unwrap();
        assert!(dirs.is_empty());
    }

    #[test]
    fn test_missing_path_is_error() {
        let root = TempDir::new().unwrap();
        let err = get_directories(root.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_file_path_is_error() {
        let root = fixture();
        assert!(get_directories(root.path().join("file.txt")).is_err());
    }
}
