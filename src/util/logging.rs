//! Structured logging setup
//!
//! Logs go to stderr through `tracing-subscriber`, either as human-readable
//! lines or as JSON. `RUST_LOG` takes precedence over everything configured
//! here. Initialization happens at most once per process.
//!
//! # Example
//!
//! ```no_run
//! use repo2wasm::util::{init_logging, LoggingConfig};
//! use tracing::Level;
//!
//! init_logging(LoggingConfig::with_level(Level::DEBUG));
//! tracing::info!(url = "https://github.com/user/repo.git", "Starting build");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Crates whose chatter is capped at WARN unless `RUST_LOG` says otherwise.
const NOISY_CRATES: &[&str] = &["gix", "hyper", "h2", "reqwest", "rustls"];

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for this crate's own events
    pub level: Level,

    /// Emit one JSON object per event instead of formatted lines
    pub use_json: bool,

    /// Include the module target (e.g., repo2wasm::toolchain) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }
}

/// Parses a log level, falling back to INFO for anything unrecognised.
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Picks the effective level: an explicit level wins, then the verbosity
/// flags, then `fallback` (normally `REPO2WASM_LOG_LEVEL`).
pub fn resolve_level(explicit: Option<&str>, verbose: bool, quiet: bool, fallback: &str) -> Level {
    if let Some(level_str) = explicit {
        parse_level(level_str)
    } else if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        parse_level(fallback)
    }
}

fn build_filter(level: Level) -> EnvFilter {
    if env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }

    let mut directives = vec![format!("repo2wasm={}", level)];
    directives.extend(NOISY_CRATES.iter().map(|c| format!("{}=warn", c)));

    directives
        .iter()
        .filter_map(|d| d.parse::<Directive>().ok())
        .fold(EnvFilter::new("warn"), |filter, directive| {
            filter.add_directive(directive)
        })
}

pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}
