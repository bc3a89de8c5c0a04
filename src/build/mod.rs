//! The clone → classify → compile → package pipeline

pub mod orchestrator;

pub use orchestrator::{BuildOutcome, BuildPipeline, BuildRequest};
