//! External graph rendering.
//!
//! Rendering is delegated to a Graphviz-compatible binary. Failures are
//! reported to the caller, who treats them as non-fatal: the DOT file is
//! already on disk by the time the renderer runs.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Errors raised while invoking the external renderer.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The renderer binary could not be started.
    #[error("failed to run '{program}': {source} (is Graphviz installed and on PATH?)")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The renderer ran but exited unsuccessfully.
    #[error("'{program}' exited with {status}: {stderr}")]
    Failed {
        /// Program that was invoked.
        program: String,
        /// Exit status description.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },
}

/// Turns a graph description file into an image.
pub trait Renderer {
    /// Renders `dot_path` into `output_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer cannot be run or fails.
    fn render(&self, dot_path: &Path, output_path: &Path) -> Result<(), RenderError>;
}

/// Renders through a Graphviz binary, e.g. `dot -Tpng in.dot -o out.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphvizRenderer {
    program: String,
    format: String,
}

impl GraphvizRenderer {
    /// Creates a renderer for `program` producing `format` output.
    #[must_use]
    pub fn new(program: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            format: format.into(),
        }
    }

    /// Arguments passed to the renderer binary.
    #[must_use]
    pub fn args(&self, dot_path: &Path, output_path: &Path) -> Vec<std::ffi::OsString> {
        vec![
            format!("-T{}", self.format).into(),
            dot_path.as_os_str().to_owned(),
            "-o".into(),
            PathBuf::from(output_path).into_os_string(),
        ]
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new("dot", "png")
    }
}

impl Renderer for GraphvizRenderer {
    fn render(&self, dot_path: &Path, output_path: &Path) -> Result<(), RenderError> {
        tracing::debug!(
            "Running {} -T{} {} -o {}",
            self.program,
            self.format,
            dot_path.display(),
            output_path.display()
        );

        let output = Command::new(&self.program)
            .args(self.args(dot_path, output_path))
            .output()
            .map_err(|e| RenderError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(RenderError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
