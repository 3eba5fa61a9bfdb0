//! Static resource catalog for the sandbox provider.

use crate::error::CloudResult;
use crate::types::{Image, Region, Size, SshKey};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CATALOG: &str = include_str!("../catalog/default.toml");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub ssh_keys: Vec<SshKey>,
}

impl Catalog {
    pub fn from_toml_str(source: &str) -> CloudResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> CloudResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// The catalog shipped with the binary.
    pub fn builtin() -> CloudResult<Self> {
        Self::from_toml_str(DEFAULT_CATALOG)
    }

    pub fn image(&self, id: &str) -> Option<&Image> {
        self.images.iter().find(|i| i.id == id)
    }

    pub fn size(&self, id: &str) -> Option<&Size> {
        self.sizes.iter().find(|s| s.id == id)
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn ssh_key(&self, id: &str) -> Option<&SshKey> {
        self.ssh_keys.iter().find(|k| k.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.images.is_empty());
        assert!(catalog.size("s-1vcpu-1gb").is_some());
        assert_eq!(catalog.region("nyc1").map(|r| r.available), Some(false));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[regions]]
            id = "lon1"
            name = "London 1"
            "#,
        )
        .unwrap();
        assert!(catalog.images.is_empty());
        assert!(catalog.ssh_keys.is_empty());
        assert!(catalog.regions[0].available);
    }

    #[test]
    fn test_malformed_catalog_is_an_error() {
        assert!(Catalog::from_toml_str("[[sizes]]\nid = 3").is_err());
    }
}
