//! `cloudwiz.toml` loading.

use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_FILE: &str = "cloudwiz.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub profile: String,
    /// Sandbox catalog; the built-in one when unset.
    pub catalog: Option<PathBuf>,
    /// JSON file holding sandbox servers; in memory when unset.
    pub sandbox_state: Option<PathBuf>,
    pub credentials_file: PathBuf,
    pub token_env: String,
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            catalog: None,
            sandbox_state: Some(PathBuf::from("cloudwiz-servers.json")),
            credentials_file: PathBuf::from("cloudwiz-credentials.toml"),
            token_env: "CLOUDWIZ_TOKEN".to_string(),
            timeout_secs: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load the config file.
    ///
    /// An explicitly named file must exist. The default `./cloudwiz.toml`
    /// is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_FILE), false),
        };
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read config file: {}", path.display()));
            }
        };
        let config = Self::from_toml_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), profile = %config.profile, "Config loaded");
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, profile: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(profile) = profile {
            self.profile = profile;
        }
        if timeout_secs.is_some() {
            self.timeout_secs = timeout_secs;
        }
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }
}
