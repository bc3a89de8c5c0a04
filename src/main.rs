use repo2wasm::cli::commands::{CliArgs, Commands};
use repo2wasm::cli::handlers::{handle_build, handle_detect, handle_serve};
use repo2wasm::util::{init_logging, resolve_level, LoggingConfig};
use repo2wasm::{NAME, VERSION};

use clap::Parser;
use std::env;
use std::process;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Serve(serve_args) => handle_serve(serve_args).await,
        Commands::Build(build_args) => handle_build(build_args, args.quiet).await,
        Commands::Detect(detect_args) => handle_detect(detect_args).await,
    };

    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let fallback = env::var("REPO2WASM_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let level = resolve_level(args.log_level.as_deref(), args.verbose, args.quiet, &fallback);

    let use_json = matches!(&args.command, Commands::Serve(serve) if serve.json_logs);

    init_logging(LoggingConfig {
        level,
        use_json,
        ..Default::default()
    });
}
