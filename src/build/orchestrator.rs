use crate::config::Repo2WasmConfig;
use crate::error::{LocateFailure, PipelineError};
use crate::fetch::{FetchError, GitFetcher, RepositoryFetcher};
use crate::fs::{FileSystem, RealFileSystem};
use crate::package::{package_artifact, PackageError};
use crate::project::{ProjectClassifier, ProjectKind};
use crate::toolchain::{SystemProcessRunner, ToolchainRegistry};
use crate::workspace::Workspace;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A single request to compile a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub location: String,
}

impl BuildRequest {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

/// A packaged build. The archive outlives the pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutcome {
    pub id: Uuid,
    pub kind: ProjectKind,
    pub archive: PathBuf,
    /// Base name of the packaged `.wasm` file
    pub artifact_name: String,
}

pub struct BuildPipeline {
    work_dir: PathBuf,
    fetcher: Arc<dyn RepositoryFetcher>,
    classifier: ProjectClassifier,
    toolchains: ToolchainRegistry,
}

impl BuildPipeline {
    pub fn new(
        work_dir: impl Into<PathBuf>,
        fetcher: Arc<dyn RepositoryFetcher>,
        fs: Arc<dyn FileSystem>,
        toolchains: ToolchainRegistry,
    ) -> Self {
        Self {
            work_dir: work_dir.into(),
            fetcher,
            classifier: ProjectClassifier::new(fs),
            toolchains,
        }
    }

    /// Pipeline wired to git, the host file system and real processes.
    pub fn from_config(config: &Repo2WasmConfig) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::new());
        let toolchains =
            ToolchainRegistry::with_defaults(config, fs.clone(), Arc::new(SystemProcessRunner));
        Self::new(
            config.work_dir.clone(),
            Arc::new(GitFetcher::new()),
            fs,
            toolchains,
        )
    }

    /// Runs the whole pipeline, blocking until the toolchain finishes.
    ///
    /// The cloned sources are removed before this returns, whatever the
    /// outcome.
    pub fn run(&self, request: &BuildRequest) -> Result<BuildOutcome, PipelineError> {
        if request.location.trim().is_empty() {
            return Err(FetchError::EmptyLocation.into());
        }

        let start = Instant::now();
        let workspace = Workspace::provision(&self.work_dir)?;

        info!(
            url = %request.location,
            workspace = %workspace.root().display(),
            "Starting build"
        );

        let result = self.run_in(&workspace, request);
        drop(workspace);

        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(outcome) => info!(
                url = %request.location,
                kind = %outcome.kind,
                archive = %outcome.archive.display(),
                elapsed_ms,
                "Build complete"
            ),
            Err(e) => warn!(
                url = %request.location,
                error_kind = e.kind(),
                error = %e,
                elapsed_ms,
                "Build failed"
            ),
        }

        result
    }

    /// Runs the pipeline and flattens the result to what the caller sees:
    /// the archive path or a single message.
    pub fn run_to_message(&self, location: &str) -> Result<PathBuf, String> {
        self.run(&BuildRequest::new(location))
            .map(|outcome| outcome.archive)
            .map_err(|e| e.user_message())
    }

    pub fn classifier(&self) -> &ProjectClassifier {
        &self.classifier
    }

    fn run_in(
        &self,
        workspace: &Workspace,
        request: &BuildRequest,
    ) -> Result<BuildOutcome, PipelineError> {
        self.fetcher
            .fetch(&request.location, workspace.source_dir())?;

        let kind = self.classifier.classify(workspace.source_dir());
        info!(kind = %kind, "Classified project");
        if !kind.is_supported() {
            return Err(PipelineError::Unsupported);
        }

        let artifact =
            self.toolchains
                .dispatch(kind, workspace.source_dir(), workspace.output_dir())?;
        debug!(artifact = %artifact.display(), "Build produced artifact");

        let archive = package_artifact(&artifact, workspace.output_dir())
            .map_err(|e| self.packaging_error(kind, e))?;

        let artifact_name = artifact
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(BuildOutcome {
            id: workspace.id(),
            kind,
            archive,
            artifact_name,
        })
    }

    fn packaging_error(&self, kind: ProjectKind, error: PackageError) -> PipelineError {
        match error {
            PackageError::ArtifactMissing(path) => PipelineError::ArtifactNotLocated {
                tool: self
                    .toolchains
                    .get(kind)
                    .map(|t| t.name().to_string())
                    .unwrap_or_else(|| kind.to_string()),
                searched: path,
                reason: LocateFailure::MissingFile,
            },
            other => PipelineError::Unexpected(other.into()),
        }
    }
}
