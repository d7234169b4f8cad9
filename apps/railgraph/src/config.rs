//! # App Configuration
//!
//! Optional `railgraph.toml` in the working directory. CLI flags win over
//! the config file, the config file over built-in defaults.

use railgraph_core::RailgraphError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "railgraph.toml";

/// Application configuration.
///
/// `default_penalty` is a decimal string (e.g. `"2.5"`) rather than a TOML
/// number: the core's fixed-point parser stays the single numeric
/// authority, and the workspace carries no float arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Directory holding the artifact bundle.
    pub artifacts_dir: Option<PathBuf>,
    /// Transfer penalty used when `route` is called without `--penalty`.
    pub default_penalty: Option<String>,
}

/// Load the configuration from `dir`, or defaults when no file exists.
pub fn load(dir: &Path) -> Result<AppConfig, RailgraphError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(AppConfig::default());
    }

    let text = std::fs::read_to_string(&path)
        .map_err(|e| RailgraphError::Io(format!("cannot read '{}': {}", path.display(), e)))?;
    toml::from_str(&text).map_err(|e| {
        RailgraphError::InvalidInput(format!("malformed {}: {}", CONFIG_FILE_NAME, e))
    })
}

// =============================================================================
// TESTS
// =============================================================================
