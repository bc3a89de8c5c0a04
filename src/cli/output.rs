//! Output formatting for CLI results

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;

use crate::build::BuildOutcome;
use crate::error::PipelineError;
use crate::project::ProjectKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Human-readable text
    Human,
}

/// What `detect` found in a local tree.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub path: PathBuf,
    pub kind: ProjectKind,
    /// Files emcc would compile; empty unless the tree is C/C++
    pub sources: Vec<PathBuf>,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_detection(&self, report: &DetectionReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize detection")
            }
            OutputFormat::Human => Ok(self.format_detection_human(report)),
        }
    }

    pub fn format_build(&self, result: &Result<BuildOutcome, PipelineError>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = match result {
                    Ok(outcome) => json!({
                        "status": "ok",
                        "id": outcome.id,
                        "kind": outcome.kind,
                        "archive": outcome.archive,
                        "artifact": outcome.artifact_name,
                    }),
                    Err(e) => json!({
                        "status": "error",
                        "error_kind": e.kind(),
                        "message": e.user_message(),
                    }),
                };
                serde_json::to_string_pretty(&value).context("Failed to serialize build result")
            }
            OutputFormat::Human => Ok(match result {
                Ok(outcome) => outcome.archive.display().to_string(),
                Err(e) => e.user_message(),
            }),
        }
    }

    fn format_detection_human(&self, report: &DetectionReport) -> String {
        let mut out = String::new();
        out.push_str(&format!("Path: {}\n", report.path.display()));
        out.push_str(&format!("Project type: {}\n", report.kind));

        match report.kind {
            ProjectKind::NativeRust => out.push_str("Toolchain: cargo\n"),
            ProjectKind::NativeCxx => {
                out.push_str("Toolchain: emcc\n");
                if report.sources.is_empty() {
                    out.push_str("Sources: none (headers only)\n");
                } else {
                    out.push_str(&format!("Sources ({}):\n", report.sources.len()));
                    for source in &report.sources {
                        let shown = source.strip_prefix(&report.path).unwrap_or(source);
                        out.push_str(&format!("  {}\n", shown.display()));
                    }
                }
            }
            ProjectKind::Unsupported => {
                out.push_str(&format!("{}\n", PipelineError::Unsupported.user_message()))
            }
        }

        out
    }
}
