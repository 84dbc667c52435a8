//! Analyze command implementation.
//!
//! Extracts the call graph, prints the report, writes the DOT description
//! and optionally renders it. Rendering failures are logged, not fatal.

use anyhow::{Context, Result};
use callmap_core::{report, Config, GraphvizRenderer, Language, Renderer};
use callmap_ts::{DirectoryWalker, ExtractionEngine};
use std::path::PathBuf;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Arguments for a single analysis run.
pub struct AnalyzeArgs {
    /// Root of the source tree.
    pub directory: PathBuf,
    /// Language bound for the whole run.
    pub language: Language,
    /// Report format.
    pub format: OutputFormat,
    /// DOT output override.
    pub dot: Option<PathBuf>,
    /// Image output override.
    pub image: Option<PathBuf>,
    /// Disable rendering.
    pub no_render: bool,
    /// Worker count override.
    pub jobs: Option<usize>,
    /// Honour ignore files even if the config does not.
    pub respect_gitignore: bool,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
}

/// Runs the analyze command.
pub fn run(args: &AnalyzeArgs, source: &ConfigSource) -> Result<()> {
    let config = apply_overrides(source.load()?, args);

    let engine = ExtractionEngine::new(args.language)
        .with_context(|| format!("Failed to initialise {} parser", args.language))?;

    let walker = DirectoryWalker::new(&args.directory)
        .excludes(config.analyzer.exclude.iter().cloned())
        .respect_gitignore(config.analyzer.respect_gitignore)
        .parallelism(config.analyzer.parallelism);

    let result = walker
        .run(&engine)
        .with_context(|| format!("Failed to analyze {}", args.directory.display()))?;

    super::output::print(&result.graph, args.format)?;

    if result.has_failures() {
        tracing::warn!(
            "{} file(s) could not be processed; the report covers the remaining {}",
            result.failures.len(),
            result.files_processed
        );
    }

    let output = &config.output;
    if let Err(e) = report::write_dot(&result.graph, &output.dot) {
        tracing::warn!("Error writing {}: {e}", output.dot.display());
        return Ok(());
    }
    tracing::info!("Generated DOT file: {}", output.dot.display());

    if output.render {
        let renderer = GraphvizRenderer::new(&output.renderer, &output.image_format);
        match renderer.render(&output.dot, &output.image) {
            Ok(()) => tracing::info!("Rendered graph to: {}", output.image.display()),
            Err(e) => tracing::warn!("Error rendering graph: {e}"),
        }
    }

    Ok(())
}

/// Command-line flags take precedence over file values.
fn apply_overrides(mut config: Config, args: &AnalyzeArgs) -> Config {
    config.analyzer.exclude.extend(args.exclude.iter().cloned());
    if args.respect_gitignore {
        config.analyzer.respect_gitignore = true;
    }
    if args.jobs.is_some() {
        config.analyzer.parallelism = args.jobs;
    }
    if let Some(dot) = &args.dot {
        config.output.dot.clone_from(dot);
    }
    if let Some(image) = &args.image {
        config.output.image.clone_from(image);
    }
    if args.no_render {
        config.output.render = false;
    }
    config
}
