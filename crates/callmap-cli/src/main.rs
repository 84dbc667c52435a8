//! callmap CLI tool.
//!
//! Usage:
//! ```bash
//! callmap [OPTIONS] <DIRECTORY> <LANGUAGE>
//! ```

use anyhow::Result;
use callmap_core::Language;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Static call graph extractor for C++ and Python source trees
#[derive(Parser)]
#[command(name = "callmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory of the source tree
    directory: PathBuf,

    /// Source language (cpp, python)
    language: Language,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report format written to stdout
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Where to write the DOT description
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Where to write the rendered image
    #[arg(long)]
    image: Option<PathBuf>,

    /// Skip invoking the external renderer
    #[arg(long)]
    no_render: bool,

    /// Number of extraction workers (1 = sequential)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Skip files matched by .gitignore / .ignore files under the directory
    #[arg(long)]
    respect_gitignore: bool,

    /// Exclude patterns (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,
}

/// Output format for the call graph report.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `<caller> calls: <callees>` line per function.
    #[default]
    Text,
    /// JSON object mapping callers to callee arrays.
    Json,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // usage errors exit 1; --help and --version exit 0
            let code = i32::from(e.use_stderr());
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let source = config_resolver::resolve(&cli.directory, cli.config.as_deref());

    commands::analyze::run(
        &commands::analyze::AnalyzeArgs {
            directory: cli.directory,
            language: cli.language,
            format: cli.format,
            dot: cli.dot,
            image: cli.image,
            no_render: cli.no_render,
            jobs: cli.jobs,
            respect_gitignore: cli.respect_gitignore,
            exclude: cli.exclude,
        },
        &source,
    )
}
