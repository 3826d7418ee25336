//! Small filesystem helpers shared by the probes.

use std::io;
use std::path::Path;

/// Remove a probe artifact left behind by a previous run. A missing file is
/// not an error.
pub fn remove_stale_file(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Remove a directory tree left behind by a previous run. A missing tree is
/// not an error.
pub fn remove_stale_tree(path: &Path) -> io::Result<()> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn remove_stale_file_ignores_missing() {
        let temp = TempDir::new().unwrap();
        assert!(remove_stale_file(&temp.path().join("absent")).is_ok());
    }

    #[test]
    fn remove_stale_file_removes_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stale");
        std::fs::write(&path, "x").unwrap();
        remove_stale_file(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn remove_stale_tree_removes_nested_dirs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("a");
        std::fs::create_dir_all(root.join("b/c")).unwrap();
        remove_stale_tree(&root).unwrap();
        assert!(!root.exists());
        // And a second call is a no-op.
        assert!(remove_stale_tree(&root).is_ok());
    }
}
