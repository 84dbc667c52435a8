//! Locating and loading `callmap.toml`.
//!
//! The first match wins:
//!
//! 1. `--config <PATH>`
//! 2. `callmap.toml` or `.callmap.toml` in the analyzed directory
//! 3. `config.toml` in the global directory (`$CALLMAP_CONFIG_DIR` or `~/.callmap/`)
//! 4. built-in defaults

use anyhow::{Context, Result};
use callmap_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found next to the analyzed sources.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; built-in defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed. An explicit
    /// path is not checked during resolution, so a missing one fails here.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            return Ok(Config::default());
        };
        match self {
            Self::Global(_) => tracing::info!("Using global config: {}", path.display()),
            _ => tracing::debug!("Using config: {}", path.display()),
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

const PROJECT_CONFIG_NAMES: [&str; 2] = ["callmap.toml", ".callmap.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration for a run over `source_dir`.
#[must_use]
pub fn resolve(source_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with_global(source_dir, explicit, global_config_dir().as_deref())
}

/// Resolution with the global directory injected, so tests don't touch the environment.
fn resolve_with_global(
    source_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| source_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

/// `$CALLMAP_CONFIG_DIR` if set, otherwise `~/.callmap/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os("CALLMAP_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".callmap")))
}
