//! Pipeline error taxonomy
//!
//! Every way a build request can end without an archive is one variant of
//! [`PipelineError`]. Variants stay distinct for logging and tests; callers
//! that only need the human-readable outcome go through
//! [`PipelineError::user_message`].

use crate::fetch::FetchError;
use std::path::PathBuf;
use thiserror::Error;

/// Message shown when a tree is neither a Cargo package nor C/C++ sources.
pub const UNSUPPORTED_MESSAGE: &str =
    "Unsupported project type: only Rust (Cargo.toml) or C/C++ repos supported";

/// Message shown when a C/C++ tree holds headers but no translation units.
pub const NO_SOURCES_MESSAGE: &str = "No C/C++ source files found.";

const ARTIFACT_MESSAGE: &str = "Compilation failed or WASM file not found";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("unsupported project type")]
    Unsupported,

    #[error("no .c or .cpp files found under {searched}")]
    NoSources { searched: PathBuf },

    #[error("{tool} {failure}")]
    Toolchain {
        tool: String,
        #[source]
        failure: ToolchainFailure,
    },

    #[error("{tool} produced no artifact at {}: {reason}", .searched.display())]
    ArtifactNotLocated {
        tool: String,
        searched: PathBuf,
        reason: LocateFailure,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// How an external tool failed.
#[derive(Debug, Error)]
pub enum ToolchainFailure {
    #[error("exited with status {0}")]
    ExitCode(i32),

    #[error("was terminated by a signal")]
    Signal,

    #[error("could not be started: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Why no artifact was found after a tool exited successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocateFailure {
    #[error("output directory does not exist")]
    MissingOutputDirectory,

    #[error("output directory contains no .wasm file")]
    NoWasmFile,

    #[error("expected output file does not exist")]
    MissingFile,
}

impl PipelineError {
    /// Short, stable identifier for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Unsupported => "unsupported",
            PipelineError::NoSources { .. } => "no_sources",
            PipelineError::Toolchain { .. } => "toolchain",
            PipelineError::ArtifactNotLocated { .. } => "artifact_not_located",
            PipelineError::Fetch(_) => "fetch",
            PipelineError::Unexpected(_) => "unexpected",
        }
    }

    /// The single string surfaced to the caller.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Unsupported => UNSUPPORTED_MESSAGE.to_string(),
            PipelineError::NoSources { .. } => NO_SOURCES_MESSAGE.to_string(),
            PipelineError::ArtifactNotLocated { .. } => format!("{}: {}", ARTIFACT_MESSAGE, self),
            PipelineError::Unexpected(e) => format!("Error: {:#}", e),
            _ => format!("Error: {}", self),
        }
    }
}
