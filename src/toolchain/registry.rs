use super::{CargoToolchain, EmscriptenToolchain, ProcessRunner, Toolchain};
use crate::config::Repo2WasmConfig;
use crate::error::PipelineError;
use crate::fs::FileSystem;
use crate::project::ProjectKind;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Maps each supported [`ProjectKind`] to the toolchain that compiles it.
pub struct ToolchainRegistry {
    toolchains: HashMap<ProjectKind, Arc<dyn Toolchain>>,
}

impl ToolchainRegistry {
    pub fn new() -> Self {
        Self {
            toolchains: HashMap::new(),
        }
    }

    pub fn with_defaults(
        config: &Repo2WasmConfig,
        fs: Arc<dyn FileSystem>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CargoToolchain::new(
            &config.cargo_bin,
            &config.wasm_target,
            fs.clone(),
            runner.clone(),
        )));
        registry.register(Arc::new(EmscriptenToolchain::new(
            &config.emcc_bin,
            fs,
            runner,
        )));
        registry
    }

    /// Replaces any toolchain already registered for the same kind.
    pub fn register(&mut self, toolchain: Arc<dyn Toolchain>) {
        self.toolchains.insert(toolchain.kind(), toolchain);
    }

    pub fn get(&self, kind: ProjectKind) -> Option<&Arc<dyn Toolchain>> {
        self.toolchains.get(&kind)
    }

    /// Build `source_dir` with the toolchain registered for `kind`.
    pub fn dispatch(
        &self,
        kind: ProjectKind,
        source_dir: &Path,
        output_dir: &Path,
    ) -> Result<PathBuf, PipelineError> {
        let toolchain = self.get(kind).ok_or(PipelineError::Unsupported)?;
        debug!(kind = %kind, tool = toolchain.name(), "Dispatching build");
        toolchain.build(source_dir, output_dir)
    }
}

impl Default for ToolchainRegistry {
    fn default() -> Self {
        Self::new()
    }
}
