use super::r#trait::SKIPPED_DIRS;
use super::{DirEntry, FileSystem, FileType};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory file system for exercising tree inspection without touching disk.
pub struct MockFileSystem {
    entries: RwLock<HashMap<PathBuf, FileType>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let mut entries = HashMap::new();
        entries.insert(root.clone(), FileType::Directory);
        Self {
            entries: RwLock::new(entries),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut entries = self.entries.write().unwrap();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut entries, parent);
        }
        entries.insert(path, FileType::File);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut entries = self.entries.write().unwrap();
        Self::ensure_parents(&mut entries, &path);
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(entries: &mut HashMap<PathBuf, FileType>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            entries
                .entry(current.clone())
                .or_insert(FileType::Directory);
        }
    }

    fn file_type(&self, path: &Path) -> Option<FileType> {
        let path = self.normalize_path(path);
        self.entries.read().unwrap().get(&path).copied()
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        self.file_type(path) == Some(FileType::Directory)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.file_type(path) == Some(FileType::File)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let path = self.normalize_path(path);
        let entries = self.entries.read().unwrap();

        if entries.get(&path) != Some(&FileType::Directory) {
            return Err(anyhow!("Directory not found: {:?}", path));
        }

        Ok(entries
            .iter()
            .filter(|(entry_path, _)| entry_path.parent() == Some(path.as_path()))
            .map(|(entry_path, file_type)| DirEntry {
                path: entry_path.clone(),
                name: entry_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("")
                    .to_string(),
                file_type: *file_type,
            })
            .collect())
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let root = self.normalize_path(root);
        let entries = self.entries.read().unwrap();

        if entries.get(&root) != Some(&FileType::Directory) {
            return Err(anyhow!("Not a directory: {:?}", root));
        }

        Ok(entries
            .iter()
            .filter(|(_, file_type)| **file_type == FileType::File)
            .filter_map(|(path, _)| {
                let relative = path.strip_prefix(&root).ok()?;
                let skipped = relative.components().any(|c| {
                    c.as_os_str()
                        .to_str()
                        .is_some_and(|name| SKIPPED_DIRS.contains(&name))
                });
                (!skipped).then(|| path.clone())
            })
            .collect())
    }
}
