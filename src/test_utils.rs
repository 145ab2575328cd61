//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// Provides methods for creating files, directories and symlinks. The tree is
/// automatically cleaned up when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The root as the walker reports it (symlinks in the temp path resolved).
    pub fn canonical_path(&self) -> PathBuf {
        self.dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp dir")
    }

    /// Add a file with the given content.
    ///
    /// Creates parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add a directory (and any missing parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Add a symlink at `path` whose target text is `target`, verbatim.
    #[cfg(unix)]
    pub fn add_symlink(&self, target: &str, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        std::os::unix::fs::symlink(target, &full_path).expect("Failed to create symlink");
        full_path
    }

    /// Set the permission bits of `path` until the returned guard is dropped.
    #[cfg(unix)]
    pub fn restrict(&self, path: &str, mode: u32) -> PermissionGuard {
        PermissionGuard::new(self.dir.path().join(path), mode)
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores a path's original permissions on drop, so the temp tree can be
/// cleaned up even when a test fails.
#[cfg(unix)]
pub struct PermissionGuard {
    path: PathBuf,
    original: fs::Permissions,
}

#[cfg(unix)]
impl PermissionGuard {
    pub fn new(path: PathBuf, mode: u32) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let original = fs::metadata(&path)
            .expect("Failed to read permissions")
            .permissions();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode))
            .expect("Failed to set permissions");
        Self { path, original }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(unix)]
impl Drop for PermissionGuard {
    fn drop(&mut self) {
        let _ = fs::set_permissions(&self.path, self.original.clone());
    }
}

/// Whether permission bits actually restrict this process.
///
/// False when running as root, in which case permission tests have nothing
/// to observe.
#[cfg(unix)]
pub fn permissions_enforced() -> bool {
    let tree = TestTree::new();
    tree.add_dir("probe");
    let _guard = tree.restrict("probe", 0o000);
    fs::read_dir(tree.path().join("probe")).is_err()
}
