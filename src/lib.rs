//! repo2wasm - compile Rust and C/C++ repositories to WebAssembly
//!
//! Given a repository URL, repo2wasm clones it into a fresh workspace, decides
//! from filesystem markers whether it is a Cargo package or a C/C++ source
//! tree, hands it to `cargo` or `emcc`, and zips the resulting `.wasm` module.
//! The cloned sources are removed when the request ends; only the archive
//! survives.
//!
//! # Example Usage
//!
//! ```no_run
//! use repo2wasm::{BuildPipeline, BuildRequest, Repo2WasmConfig};
//!
//! let config = Repo2WasmConfig::default();
//! let pipeline = BuildPipeline::from_config(&config);
//!
//! match pipeline.run(&BuildRequest::new("https://github.com/user/repo.git")) {
//!     Ok(outcome) => println!("Archive: {}", outcome.archive.display()),
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`project`]: classification of a source tree
//! - [`toolchain`]: `cargo` and `emcc` invocation and artifact lookup
//! - [`build`]: the fetch, classify, compile, package pipeline
//! - [`server`]: the web form

pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod fs;
pub mod package;
pub mod project;
pub mod server;
pub mod toolchain;
pub mod util;
pub mod workspace;

pub use build::{BuildOutcome, BuildPipeline, BuildRequest};
pub use config::{ConfigError, Repo2WasmConfig};
pub use error::{LocateFailure, PipelineError, ToolchainFailure};
pub use fetch::{FetchError, GitFetcher, RepositoryFetcher};
pub use project::{ProjectClassifier, ProjectKind};
pub use toolchain::{Toolchain, ToolchainRegistry};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
