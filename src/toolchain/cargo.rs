//! Cargo toolchain (Rust)

use super::{run_tool, CommandSpec, ProcessRunner, Toolchain, WASM_EXTENSION};
use crate::error::{LocateFailure, PipelineError};
use crate::fs::FileSystem;
use crate::project::ProjectKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct CargoToolchain {
    cargo_bin: String,
    target: String,
    fs: Arc<dyn FileSystem>,
    runner: Arc<dyn ProcessRunner>,
}

impl CargoToolchain {
    pub fn new(
        cargo_bin: impl Into<String>,
        target: impl Into<String>,
        fs: Arc<dyn FileSystem>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            cargo_bin: cargo_bin.into(),
            target: target.into(),
            fs,
            runner,
        }
    }

    pub fn command(&self, source_dir: &Path) -> CommandSpec {
        CommandSpec::new(&self.cargo_bin)
            .args(["build", "--release", "--target"])
            .arg(&self.target)
            .cwd(source_dir)
    }

    /// `target/<triple>/release` under the package root.
    pub fn release_dir(&self, source_dir: &Path) -> PathBuf {
        source_dir.join("target").join(&self.target).join("release")
    }

    /// First `.wasm` file (by name) directly inside the release directory.
    fn locate(&self, release_dir: &Path) -> Result<PathBuf, PipelineError> {
        let not_located = |reason| PipelineError::ArtifactNotLocated {
            tool: self.name().to_string(),
            searched: release_dir.to_path_buf(),
            reason,
        };

        if !self.fs.is_dir(release_dir) {
            warn!(dir = %release_dir.display(), "Release output directory is missing");
            return Err(not_located(LocateFailure::MissingOutputDirectory));
        }

        let mut candidates: Vec<_> = self
            .fs
            .read_dir(release_dir)?
            .into_iter()
            .filter(|entry| {
                entry.is_file()
                    && Path::new(entry.file_name())
                        .extension()
                        .is_some_and(|ext| ext == WASM_EXTENSION)
            })
            .collect();
        candidates.sort_by(|a, b| a.file_name().cmp(b.file_name()));

        match candidates.into_iter().next() {
            Some(entry) => {
                debug!(artifact = %entry.path().display(), "Located wasm artifact");
                Ok(entry.path)
            }
            None => Err(not_located(LocateFailure::NoWasmFile)),
        }
    }
}

impl Toolchain for CargoToolchain {
    fn name(&self) -> &str {
        &self.cargo_bin
    }

    fn kind(&self) -> ProjectKind {
        ProjectKind::NativeRust
    }

    fn build(&self, source_dir: &Path, _output_dir: &Path) -> Result<PathBuf, PipelineError> {
        run_tool(self.runner.as_ref(), self.name(), &self.command(source_dir))?;
        self.locate(&self.release_dir(source_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolchainFailure;
    use crate::fs::MockFileSystem;
    use crate::toolchain::{MockProcessRunner, MockRun};

    const TARGET: &str = "wasm32-unknown-unknown";

    fn setup() -> (Arc<MockFileSystem>, Arc<MockProcessRunner>, CargoToolchain) {
        let fs = Arc::new(MockFileSystem::with_root(PathBuf::from("/ws/repo")));
        fs.add_file("Cargo.toml");
        let runner = Arc::new(MockProcessRunner::new());
        let toolchain = CargoToolchain::new("cargo", TARGET, fs.clone(), runner.clone());
        (fs, runner, toolchain)
    }

    #[test]
    fn test_command_requests_release_wasm_build() {
        let (_, _, toolchain) = setup();
        let spec = toolchain.command(Path::new("/ws/repo"));

        assert_eq!(
            spec.to_string(),
            "cargo build --release --target wasm32-unknown-unknown"
        );
        assert_eq!(spec.cwd, Some(PathBuf::from("/ws/repo")));
    }

    #[test]
    fn test_build_returns_first_wasm_by_name() {
        let (fs, runner, toolchain) = setup();
        let release = "target/wasm32-unknown-unknown/release";
        fs.add_file(format!("{}/zeta.wasm", release));
        fs.add_file(format!("{}/alpha.wasm", release));
        fs.add_file(format!("{}/alpha.d", release));
        fs.add_dir(format!("{}/deps", release));

        let artifact = toolchain
            .build(Path::new("/ws/repo"), Path::new("/ws/output"))
            .unwrap();

        assert_eq!(
            artifact,
            PathBuf::from("/ws/repo/target/wasm32-unknown-unknown/release/alpha.wasm")
        );
        assert_eq!(runner.call_count(), 1);
    }

    #[test]
    fn test_missing_release_dir_is_distinct_locate_failure() {
        let (_, _, toolchain) = setup();

        match toolchain.build(Path::new("/ws/repo"), Path::new("/ws/output")) {
            Err(PipelineError::ArtifactNotLocated { reason, searched, .. }) => {
                assert_eq!(reason, LocateFailure::MissingOutputDirectory);
                assert!(searched.ends_with("target/wasm32-unknown-unknown/release"));
            }
            other => panic!("Expected ArtifactNotLocated, got {:?}", other),
        }
    }

    #[test]
    fn test_release_dir_without_wasm() {
        let (fs, _, toolchain) = setup();
        fs.add_file("target/wasm32-unknown-unknown/release/libfoo.rlib");
        fs.add_dir("target/wasm32-unknown-unknown/release/nested.wasm");

        match toolchain.build(Path::new("/ws/repo"), Path::new("/ws/output")) {
            Err(PipelineError::ArtifactNotLocated { reason, .. }) => {
                assert_eq!(reason, LocateFailure::NoWasmFile);
            }
            other => panic!("Expected ArtifactNotLocated, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_build_skips_artifact_search() {
        let (fs, runner, toolchain) = setup();
        fs.add_file("target/wasm32-unknown-unknown/release/stale.wasm");
        runner.add_run(MockRun::exit_code(101));

        match toolchain.build(Path::new("/ws/repo"), Path::new("/ws/output")) {
            Err(PipelineError::Toolchain { tool, failure }) => {
                assert_eq!(tool, "cargo");
                assert!(matches!(failure, ToolchainFailure::ExitCode(101)));
            }
            other => panic!("Expected toolchain failure, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_target_changes_layout() {
        let fs = Arc::new(MockFileSystem::with_root(PathBuf::from("/ws/repo")));
        fs.add_file("target/wasm32-wasip1/release/app.wasm");
        let toolchain = CargoToolchain::new(
            "cargo",
            "wasm32-wasip1",
            fs,
            Arc::new(MockProcessRunner::new()),
        );

        let artifact = toolchain
            .build(Path::new("/ws/repo"), Path::new("/ws/output"))
            .unwrap();
        assert!(artifact.ends_with("wasm32-wasip1/release/app.wasm"));
    }
}
