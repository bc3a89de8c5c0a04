pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{BuildArgs, CliArgs, Commands, DetectArgs, ServeArgs};
pub use output::{DetectionReport, OutputFormat, OutputFormatter};
