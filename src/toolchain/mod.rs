//! External WebAssembly toolchains
//!
//! Each toolchain handles one [`ProjectKind`]: it runs the external compiler
//! against a source tree and locates the `.wasm` file it produced. Toolchains
//! never retry; a non-zero exit ends the request.

pub mod cargo;
pub mod emscripten;
pub mod mock;
pub mod registry;
pub mod runner;

pub use cargo::CargoToolchain;
pub use emscripten::EmscriptenToolchain;
pub use mock::{MockProcessRunner, MockRun};
pub use registry::ToolchainRegistry;
pub use runner::{CommandSpec, ProcessExit, ProcessRunner, SystemProcessRunner};

use crate::error::{PipelineError, ToolchainFailure};
use crate::project::ProjectKind;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Extension of WebAssembly binaries.
pub const WASM_EXTENSION: &str = "wasm";

pub trait Toolchain: Send + Sync {
    /// Tool identity reported in failures (e.g. "cargo").
    fn name(&self) -> &str;

    /// The project kind this toolchain compiles.
    fn kind(&self) -> ProjectKind;

    /// Compile `source_dir` and return the path of the produced artifact.
    ///
    /// `output_dir` exists and is where toolchains without their own output
    /// layout must write. Blocks until the external tool exits.
    fn build(&self, source_dir: &Path, output_dir: &Path) -> Result<PathBuf, PipelineError>;
}

/// Run `spec` and turn anything but a clean exit into a toolchain failure.
pub(crate) fn run_tool(
    runner: &dyn ProcessRunner,
    tool: &str,
    spec: &CommandSpec,
) -> Result<(), PipelineError> {
    info!(tool, command = %spec, "Invoking toolchain");

    let failure = match runner.run(spec) {
        Ok(exit) if exit.is_success() => {
            info!(tool, "Toolchain finished");
            return Ok(());
        }
        Ok(ProcessExit { code: Some(code) }) => ToolchainFailure::ExitCode(code),
        Ok(ProcessExit { code: None }) => ToolchainFailure::Signal,
        Err(e) => ToolchainFailure::Spawn(e),
    };

    error!(tool, failure = %failure, "Toolchain failed");
    Err(PipelineError::Toolchain {
        tool: tool.to_string(),
        failure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_run_tool_success() {
        let runner = MockProcessRunner::new();
        assert!(run_tool(&runner, "cargo", &CommandSpec::new("cargo")).is_ok());
    }

    #[test]
    fn test_run_tool_nonzero_exit() {
        let runner = MockProcessRunner::new();
        runner.add_run(MockRun::exit_code(101));

        match run_tool(&runner, "cargo", &CommandSpec::new("cargo")) {
            Err(PipelineError::Toolchain { tool, failure }) => {
                assert_eq!(tool, "cargo");
                assert!(matches!(failure, ToolchainFailure::ExitCode(101)));
            }
            other => panic!("Expected toolchain failure, got {:?}", other),
        }
    }

    #[test]
    fn test_run_tool_signal() {
        let runner = MockProcessRunner::new();
        runner.add_run(MockRun::signal());

        let err = run_tool(&runner, "emcc", &CommandSpec::new("emcc")).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Toolchain {
                failure: ToolchainFailure::Signal,
                ..
            }
        ));
    }

    #[test]
    fn test_run_tool_spawn_error() {
        let runner = MockProcessRunner::new();
        runner.add_run(MockRun::spawn_error(io::ErrorKind::NotFound));

        let err = run_tool(&runner, "emcc", &CommandSpec::new("emcc")).unwrap_err();
        assert_eq!(err.kind(), "toolchain");
        assert!(err.to_string().starts_with("emcc could not be started"));
    }
}
