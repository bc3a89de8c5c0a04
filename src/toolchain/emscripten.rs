//! Emscripten toolchain (C/C++)

use super::{run_tool, CommandSpec, ProcessRunner, Toolchain};
use crate::error::{LocateFailure, PipelineError};
use crate::fs::FileSystem;
use crate::project::{collect_cxx_sources, ProjectKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// File name of the module emcc writes into the output directory.
pub const OUTPUT_FILE_NAME: &str = "a.wasm";

pub struct EmscriptenToolchain {
    emcc_bin: String,
    fs: Arc<dyn FileSystem>,
    runner: Arc<dyn ProcessRunner>,
}

impl EmscriptenToolchain {
    pub fn new(
        emcc_bin: impl Into<String>,
        fs: Arc<dyn FileSystem>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            emcc_bin: emcc_bin.into(),
            fs,
            runner,
        }
    }

    /// All sources go to a single emcc invocation producing one module.
    pub fn command(&self, source_dir: &Path, sources: &[PathBuf], output: &Path) -> CommandSpec {
        CommandSpec::new(&self.emcc_bin)
            .args(sources.iter().map(|s| s.as_os_str().to_owned()))
            .args(["-s", "WASM=1", "-o"])
            .arg(output.as_os_str().to_owned())
            .cwd(source_dir)
    }
}

impl Toolchain for EmscriptenToolchain {
    fn name(&self) -> &str {
        &self.emcc_bin
    }

    fn kind(&self) -> ProjectKind {
        ProjectKind::NativeCxx
    }

    fn build(&self, source_dir: &Path, output_dir: &Path) -> Result<PathBuf, PipelineError> {
        let sources = collect_cxx_sources(self.fs.as_ref(), source_dir);
        if sources.is_empty() {
            warn!(dir = %source_dir.display(), "No .c or .cpp sources to compile");
            return Err(PipelineError::NoSources {
                searched: source_dir.to_path_buf(),
            });
        }
        info!(count = sources.len(), "Collected C/C++ sources");

        let output = output_dir.join(OUTPUT_FILE_NAME);
        run_tool(
            self.runner.as_ref(),
            self.name(),
            &self.command(source_dir, &sources, &output),
        )?;

        if !self.fs.is_file(&output) {
            return Err(PipelineError::ArtifactNotLocated {
                tool: self.name().to_string(),
                searched: output,
                reason: LocateFailure::MissingFile,
            });
        }

        Ok(output)
    }
}
