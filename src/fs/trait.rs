//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

/// A directory entry returned by read_dir
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }
}

/// Abstraction over the read-only file system queries used to inspect a
/// cloned source tree.
pub trait FileSystem: Send + Sync {
    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// List directory contents (non-recursive)
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Every file below `root`, at any depth.
    ///
    /// Symbolic links are reported as files unless they point at a
    /// directory; linked directories are not descended into.
    /// Version-control metadata directories (`.git`) are not descended into.
    /// The order of the returned paths is unspecified.
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Directory names never descended into by `walk_files`.
pub(crate) const SKIPPED_DIRS: &[&str] = &[".git"];
