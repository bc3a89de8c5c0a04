use super::ProjectKind;
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Manifest whose presence at the tree root marks a Cargo package.
pub const RUST_MANIFEST: &str = "Cargo.toml";

/// Extensions that mark a tree as C/C++.
pub const CXX_EXTENSIONS: &[&str] = &["c", "cpp", "h", "hpp"];

/// Extensions compiled as translation units. Headers are excluded.
pub const CXX_SOURCE_EXTENSIONS: &[&str] = &["c", "cpp"];

/// Assigns a [`ProjectKind`] to a source tree from filesystem markers.
///
/// Rules are evaluated in fixed priority order, first match wins:
/// a root-level `Cargo.toml` means [`ProjectKind::NativeRust`]; otherwise any
/// C/C++ source or header at any depth means [`ProjectKind::NativeCxx`];
/// otherwise the tree is [`ProjectKind::Unsupported`].
pub struct ProjectClassifier {
    fs: Arc<dyn FileSystem>,
}

impl ProjectClassifier {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    pub fn classify(&self, root: &Path) -> ProjectKind {
        if self.fs.is_file(&root.join(RUST_MANIFEST)) {
            debug!(root = %root.display(), manifest = RUST_MANIFEST, "Found root manifest");
            return ProjectKind::NativeRust;
        }

        let files = self.files(root);
        if let Some(marker) = files.iter().find(|p| has_extension(p, CXX_EXTENSIONS)) {
            debug!(root = %root.display(), marker = %marker.display(), "Found C/C++ file");
            return ProjectKind::NativeCxx;
        }

        debug!(root = %root.display(), files = files.len(), "No project markers found");
        ProjectKind::Unsupported
    }

    pub fn cxx_sources(&self, root: &Path) -> Vec<PathBuf> {
        collect_cxx_sources(self.fs.as_ref(), root)
    }

    fn files(&self, root: &Path) -> Vec<PathBuf> {
        walk_or_empty(self.fs.as_ref(), root)
    }
}

/// Every `.c`/`.cpp` file below `root`, sorted for a stable command line.
pub fn collect_cxx_sources(fs: &dyn FileSystem, root: &Path) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = walk_or_empty(fs, root)
        .into_iter()
        .filter(|p| has_extension(p, CXX_SOURCE_EXTENSIONS))
        .collect();
    sources.sort();
    sources
}

fn walk_or_empty(fs: &dyn FileSystem, root: &Path) -> Vec<PathBuf> {
    match fs.walk_files(root) {
        Ok(files) => files,
        Err(e) => {
            warn!(root = %root.display(), error = %e, "Failed to walk source tree");
            Vec::new()
        }
    }
}

/// Suffix match on the file name, so a file named just `.c` counts too.
pub(crate) fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    extensions.iter().any(|ext| {
        name.len() > ext.len()
            && name.ends_with(ext)
            && name.as_bytes()[name.len() - ext.len() - 1] == b'.'
    })
}
