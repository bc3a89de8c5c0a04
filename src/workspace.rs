//! Per-request workspace
//!
//! A [`Workspace`] is a fresh directory holding the cloned sources (`repo/`)
//! and the build output (`output/`). Dropping it removes `repo/` on every
//! exit path; `output/` is left behind for whoever serves the archive.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

const SOURCE_DIR_NAME: &str = "repo";
const OUTPUT_DIR_NAME: &str = "output";

#[derive(Debug)]
pub struct Workspace {
    id: Uuid,
    root: PathBuf,
    source_dir: PathBuf,
    output_dir: PathBuf,
}

impl Workspace {
    /// Creates `<work_dir>/build-<uuid>/` with empty `repo/` and `output/`.
    pub fn provision(work_dir: &Path) -> Result<Self> {
        let id = Uuid::new_v4();
        let root = work_dir.join(format!("build-{}", id));

        fs::create_dir_all(root.join(OUTPUT_DIR_NAME))
            .with_context(|| format!("Failed to create workspace {}", root.display()))?;

        // Toolchains run with the source tree as cwd, so paths handed to them
        // must not be relative.
        let root = root
            .canonicalize()
            .with_context(|| format!("Failed to resolve workspace {}", root.display()))?;
        let source_dir = root.join(SOURCE_DIR_NAME);
        let output_dir = root.join(OUTPUT_DIR_NAME);

        fs::create_dir(&source_dir)
            .with_context(|| format!("Failed to create source dir {}", source_dir.display()))?;

        debug!(workspace = %root.display(), "Provisioned workspace");

        Ok(Self {
            id,
            root,
            source_dir,
            output_dir,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Best-effort removal of the source subtree. Safe to call repeatedly.
    pub fn reclaim(&self) {
        match fs::remove_dir_all(&self.source_dir) {
            Ok(()) => debug!(dir = %self.source_dir.display(), "Removed source tree"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                dir = %self.source_dir.display(),
                error = %e,
                "Failed to remove source tree"
            ),
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        self.reclaim();
    }
}
