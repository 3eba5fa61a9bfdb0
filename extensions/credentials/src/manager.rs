use crate::credential::{Credential, StorageKind};
use crate::error::CredentialError;
use crate::provider::CredentialProvider;
use tracing::debug;

/// A credential plus where it came from.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub credential: Credential,
    pub source: String,
    pub kind: StorageKind,
    pub secure: bool,
}

/// Tries providers in the order they were given; the first hit wins.
#[derive(Default)]
pub struct CredentialManager {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl CredentialManager {
    pub fn new(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self { providers }
    }

    pub fn push(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name())
    }

    /// A backend error stops the search; a silent backend does not.
    pub fn resolve(&self, profile: &str) -> Result<Resolved, CredentialError> {
        for provider in &self.providers {
            let Some(credential) = provider.fetch(profile)? else {
                debug!(provider = provider.name(), profile, "No credential");
                continue;
            };
            let secure = provider.is_secure();
            debug!(provider = provider.name(), profile, secure, "Credential resolved");
            return Ok(Resolved {
                credential,
                source: provider.name().to_string(),
                kind: provider.kind(),
                secure,
            });
        }
        Err(CredentialError::NotFound {
            profile: profile.to_string(),
            tried: self.providers().map(str::to_string).collect(),
        })
    }
}
