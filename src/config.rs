//! Configuration file handling
//!
//! Settings live in `<config dir>/batchpr/config.toml`. Every key is
//! optional; a missing file means defaults. Command-line flags are applied
//! on top by the binary.

use crate::error::{Error, Result};
use crate::platform::DEFAULT_RAW_CONTENT_URL;
use crate::types::CloneProtocol;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Directory name under the user's config dir
const CONFIG_DIR: &str = "batchpr";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory forks are cloned into
    pub workdir: PathBuf,
    /// Echo output of every command, not only failing ones
    pub verbose: bool,
    /// Clone the fork over SSH or HTTPS
    pub protocol: CloneProtocol,
    /// GitHub Enterprise host (e.g. `github.example.com`)
    pub github_host: Option<String>,
    /// Base URL for raw file contents
    pub raw_content_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            verbose: false,
            protocol: CloneProtocol::default(),
            github_host: None,
            raw_content_url: None,
        }
    }
}

impl Config {
    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if let Some(host) = &self.github_host
            && (host.is_empty() || host.contains('/'))
        {
            return Err(Error::Config(format!(
                "github_host must be a bare host name, got '{host}'"
            )));
        }

        let raw = self
            .raw_content_url
            .as_deref()
            .unwrap_or(DEFAULT_RAW_CONTENT_URL);
        let parsed =
            Url::parse(raw).map_err(|e| Error::Config(format!("invalid raw_content_url '{raw}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "raw_content_url must be http(s), got '{raw}'"
            )));
        }

        Ok(())
    }
}

/// Default location of the config file, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load configuration from `path`
///
/// Returns defaults if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

    config.validate()?;
    Ok(config)
}
