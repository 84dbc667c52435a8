//! Directory walker.
//!
//! Selects source files under a root by the bound analyzer's extensions,
//! extracts each one (optionally in parallel) and merges the per-file
//! graphs into one [`AnalysisResult`].
//!
//! Merging happens in lexical path order after extraction finishes, so a
//! qualified name defined in several files always resolves to the entry from
//! the lexically last file, regardless of worker scheduling.

use std::path::{Path, PathBuf};

use callmap_core::{AnalysisResult, CallGraph, FileFailure};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::engine::{EngineError, ExtractionEngine};

/// Errors that abort a whole run.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// The root directory does not exist or is not a directory.
    #[error("root directory not found: {path}")]
    RootNotFound {
        /// Root that was requested.
        path: PathBuf,
    },

    /// The worker pool could not be created.
    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Walks a source tree and feeds matching files to an [`ExtractionEngine`].
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    root: PathBuf,
    exclude: Vec<String>,
    respect_gitignore: bool,
    parallelism: Option<usize>,
}

impl DirectoryWalker {
    /// Creates a walker rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude: Vec::new(),
            respect_gitignore: false,
            parallelism: None,
        }
    }

    /// Adds exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets whether `.gitignore` and `.ignore` files are honoured (default: false).
    #[must_use]
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Sets the number of extraction workers. `Some(1)` runs sequentially.
    #[must_use]
    pub fn parallelism(mut self, workers: Option<usize>) -> Self {
        self.parallelism = workers;
        self
    }

    /// Returns the root directory being walked.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists files claimed by `engine`'s analyzer, sorted lexically.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::RootNotFound`] if the root is not a directory.
    pub fn discover(&self, engine: &ExtractionEngine) -> Result<Vec<PathBuf>, WalkError> {
        if !self.root.is_dir() {
            return Err(WalkError::RootNotFound {
                path: self.root.clone(),
            });
        }

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .follow_links(true)
            .parents(false)
            .require_git(false)
            .ignore(self.respect_gitignore)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore);

        let analyzer = engine.analyzer();
        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            let path = entry.path();

            // `is_file` follows symlinks, so linked sources are analyzed too
            if !path.is_file() || !analyzer.claims(path) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Extracts every discovered file and merges the results.
    ///
    /// Unreadable files are logged, recorded as failures and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is missing or the worker pool fails.
    pub fn run(&self, engine: &ExtractionEngine) -> Result<AnalysisResult, WalkError> {
        let files = self.discover(engine)?;
        info!(
            "Extracting call graph from {} {} file(s) under {}",
            files.len(),
            engine.language(),
            self.root.display()
        );

        let extracted: Extracted = match self.parallelism {
            Some(1) => files
                .into_iter()
                .map(|path| {
                    let graph = engine.process_file(&path);
                    (path, graph)
                })
                .collect(),
            Some(workers) => rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()?
                .install(|| extract_all(engine, files)),
            None => extract_all(engine, files),
        };

        let result = merge(extracted);
        info!(
            "Extraction complete: {} function(s), {} call edge(s) from {} file(s), {} failure(s)",
            result.graph.len(),
            result.graph.edge_count(),
            result.files_processed,
            result.failures.len()
        );
        Ok(result)
    }

    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let rel_str = relative.to_string_lossy();
        let components: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();

        self.exclude.iter().any(|pattern| {
            if glob::Pattern::new(pattern).is_ok_and(|p| p.matches(&rel_str)) {
                return true;
            }
            // "**/build/**" also matches a `build` directory at any depth,
            // but only as whole path components
            let clean = pattern.replace("**/", "").replace("/**", "");
            if clean.contains('*') {
                return false;
            }
            let segments: Vec<&str> = clean.split('/').filter(|s| !s.is_empty()).collect();
            !segments.is_empty()
                && components
                    .windows(segments.len())
                    .any(|window| window.iter().zip(&segments).all(|(c, s)| c == s))
        })
    }
}

type Extracted = Vec<(PathBuf, Result<CallGraph, EngineError>)>;

fn extract_all(engine: &ExtractionEngine, files: Vec<PathBuf>) -> Extracted {
    files
        .into_par_iter()
        .map(|path| {
            let graph = engine.process_file(&path);
            (path, graph)
        })
        .collect()
}

/// Merges per-file graphs in the given (sorted) order; later files win.
fn merge(extracted: Extracted) -> AnalysisResult {
    let mut result = AnalysisResult::new();
    for (path, outcome) in extracted {
        match outcome {
            Ok(graph) => {
                for caller in result.graph.merge(graph) {
                    debug!("{caller} redefined in {}, keeping the later entry", path.display());
                }
                result.files_processed += 1;
            }
            Err(e) => {
                warn!("Error processing {}: {e}", path.display());
                result.failures.push(FileFailure::new(path, e.to_string()));
            }
        }
    }
    result
}
