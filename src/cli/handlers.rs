//! Subcommand handlers. Each returns the process exit code.

use super::commands::{BuildArgs, DetectArgs, ServeArgs};
use super::output::{DetectionReport, OutputFormat, OutputFormatter};
use crate::build::{BuildPipeline, BuildRequest};
use crate::config::Repo2WasmConfig;
use crate::fs::RealFileSystem;
use crate::project::{ProjectClassifier, ProjectKind};
use crate::server::{self, ServerState};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

pub async fn handle_serve(args: &ServeArgs) -> i32 {
    let mut config = Repo2WasmConfig::default();
    if let Some(bind) = &args.bind {
        config.bind_addr = bind.clone();
    }

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your environment variables and command-line arguments.");
        return 1;
    }
    debug!("{}", config);

    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Configuration error: {}", e);
            return 1;
        }
    };

    let pipeline = Arc::new(BuildPipeline::from_config(&config));
    let state = Arc::new(ServerState::new(pipeline));

    match server::serve(addr, state).await {
        Ok(()) => 0,
        Err(e) => {
            error!("Server failed: {:#}", e);
            1
        }
    }
}

pub async fn handle_build(args: &BuildArgs, quiet: bool) -> i32 {
    let mut config = Repo2WasmConfig::default();
    if let Some(work_dir) = &args.work_dir {
        config.work_dir = work_dir.clone();
    }

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return 1;
    }
    debug!("{}", config);

    let pipeline = BuildPipeline::from_config(&config);
    let request = BuildRequest::new(args.url.clone());

    info!(url = %request.location, "Building repository");
    let result = match tokio::task::spawn_blocking(move || pipeline.run(&request)).await {
        Ok(result) => result,
        Err(e) => {
            error!("Build task did not complete: {}", e);
            return 1;
        }
    };

    let exit_code = if result.is_ok() { 0 } else { 1 };
    let format: OutputFormat = args.format.into();

    match OutputFormatter::new(format).format_build(&result) {
        Ok(text) => {
            if exit_code == 0 {
                if !quiet || format == OutputFormat::Json {
                    println!("{}", text);
                }
            } else if format == OutputFormat::Json {
                println!("{}", text);
            } else {
                eprintln!("{}", text);
            }
            exit_code
        }
        Err(e) => {
            error!("Failed to format output: {}", e);
            1
        }
    }
}

pub async fn handle_detect(args: &DetectArgs) -> i32 {
    let path = match args.path.clone() {
        Some(path) => path,
        None => match env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                error!("Failed to get current directory: {}", e);
                return 1;
            }
        },
    };

    if !path.is_dir() {
        error!("Path is not a directory: {}", path.display());
        return 1;
    }

    let path: PathBuf = match path.canonicalize() {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to canonicalize path: {}", e);
            return 1;
        }
    };
    debug!("Classifying {}", path.display());

    let classifier = ProjectClassifier::new(Arc::new(RealFileSystem::new()));
    let kind = classifier.classify(&path);
    let sources = if kind == ProjectKind::NativeCxx {
        classifier.cxx_sources(&path)
    } else {
        Vec::new()
    };

    let report = DetectionReport {
        path,
        kind,
        sources,
    };

    match OutputFormatter::new(args.format.into()).format_detection(&report) {
        Ok(text) => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
            0
        }
        Err(e) => {
            error!("Failed to format output: {}", e);
            1
        }
    }
}
