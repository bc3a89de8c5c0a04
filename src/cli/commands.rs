use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Compile Rust and C/C++ repositories to WebAssembly
#[derive(Parser, Debug)]
#[command(
    name = "repo2wasm",
    about = "Compile Rust and C/C++ repositories to WebAssembly",
    version,
    long_about = "repo2wasm clones a repository, decides whether it is a Cargo package or a \
                  C/C++ source tree, compiles it to WebAssembly with cargo or emcc and packages \
                  the resulting module as a zip archive."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Serve the web form",
        long_about = "Serves a single-field web form. Submitting a repository URL compiles it \
                      and offers the archive for download.\n\n\
                      Examples:\n  \
                      repo2wasm serve\n  \
                      repo2wasm serve --bind 0.0.0.0:8080"
    )]
    Serve(ServeArgs),

    #[command(
        about = "Compile a repository once",
        long_about = "Clones the repository, compiles it and prints the path of the archive.\n\n\
                      Examples:\n  \
                      repo2wasm build https://github.com/user/repo.git\n  \
                      repo2wasm build https://github.com/user/repo.git --format json"
    )]
    Build(BuildArgs),

    #[command(
        about = "Classify a local source tree",
        long_about = "Reports which toolchain a directory would be compiled with, and the \
                      C/C++ sources that would be passed to emcc.\n\n\
                      Examples:\n  \
                      repo2wasm detect\n  \
                      repo2wasm detect /path/to/repo --format json"
    )]
    Detect(DetectArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    #[arg(
        short = 'b',
        long,
        value_name = "ADDR",
        help = "Address to listen on (overrides REPO2WASM_BIND)"
    )]
    pub bind: Option<String>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    #[arg(value_name = "URL", help = "Repository to clone")]
    pub url: String,

    #[arg(
        long,
        value_name = "DIR",
        help = "Directory for build workspaces (overrides REPO2WASM_WORK_DIR)"
    )]
    pub work_dir: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to source tree (defaults to current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
