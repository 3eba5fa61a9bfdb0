//! Credential storage backends.

use crate::credential::{Credential, StorageKind};
use crate::error::CredentialError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::debug;

pub trait CredentialProvider: Send + Sync {
    /// Short description used in diagnostics, e.g. `env:CLOUDWIZ_TOKEN`.
    fn name(&self) -> &str;

    fn kind(&self) -> StorageKind;

    /// `Ok(None)` when this backend simply has nothing for `profile`.
    fn fetch(&self, profile: &str) -> Result<Option<Credential>, CredentialError>;

    /// Whether a credential fetched from here may be used without a warning.
    fn is_secure(&self) -> bool {
        false
    }
}

/// Reads one environment variable for every profile.
pub struct EnvProvider {
    var: String,
    name: String,
}

impl EnvProvider {
    pub fn new(var: impl Into<String>) -> Self {
        let var = var.into();
        Self {
            name: format!("env:{}", var),
            var,
        }
    }
}

impl CredentialProvider for EnvProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StorageKind {
        StorageKind::Environment
    }

    fn fetch(&self, _profile: &str) -> Result<Option<Credential>, CredentialError> {
        Ok(std::env::var(&self.var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(Credential::new))
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CredentialsFile {
    #[serde(default)]
    profiles: BTreeMap<String, Credential>,
}

/// TOML file of `[profiles.<name>]` tables, each holding a `token`.
pub struct FileProvider {
    path: PathBuf,
    name: String,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: format!("file:{}", path.display()),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<CredentialsFile>, CredentialError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CredentialError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        toml::from_str(&raw).map(Some).map_err(|source| CredentialError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Save `credential` under `profile`, keeping other profiles.
    ///
    /// On unix the file is written owner read/write only.
    pub fn store(&self, profile: &str, credential: &Credential) -> Result<(), CredentialError> {
        let mut file = self.read()?.unwrap_or_default();
        file.profiles.insert(profile.to_string(), credential.clone());
        let raw = toml::to_string(&file)?;
        self.write(raw.as_bytes()).map_err(|source| CredentialError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), profile, "Credential stored");
        Ok(())
    }

    #[cfg(unix)]
    fn write(&self, raw: &[u8]) -> std::io::Result<()> {
        use std::io::Write;
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut f = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(&self.path)?;
        // `mode` only applies on creation.
        f.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        f.write_all(raw)
    }

    #[cfg(not(unix))]
    fn write(&self, raw: &[u8]) -> std::io::Result<()> {
        std::fs::write(&self.path, raw)
    }
}

impl CredentialProvider for FileProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StorageKind {
        StorageKind::File
    }

    fn fetch(&self, profile: &str) -> Result<Option<Credential>, CredentialError> {
        Ok(self
            .read()?
            .and_then(|mut file| file.profiles.remove(profile))
            .filter(|c| !c.token().trim().is_empty()))
    }

    #[cfg(unix)]
    fn is_secure(&self) -> bool {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(&self.path)
            .map(|m| m.permissions().mode() & 0o077 == 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_secure(&self) -> bool {
        true
    }
}

/// Credentials held in memory.
#[derive(Default)]
pub struct StaticProvider {
    profiles: HashMap<String, Credential>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, profile: impl Into<String>, token: impl Into<String>) -> Self {
        self.profiles.insert(profile.into(), Credential::new(token));
        self
    }
}

impl CredentialProvider for StaticProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn kind(&self) -> StorageKind {
        StorageKind::Memory
    }

    fn fetch(&self, profile: &str) -> Result<Option<Credential>, CredentialError> {
        Ok(self.profiles.get(profile).cloned())
    }
}
