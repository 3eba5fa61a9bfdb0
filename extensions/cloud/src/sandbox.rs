//! Offline provider backed by a [`Catalog`] and an optional JSON state file.

use crate::catalog::Catalog;
use crate::error::{CloudError, CloudResult};
use crate::provider::CloudProvider;
use crate::request::ServerRequest;
use crate::types::{Image, Region, Server, ServerStatus, Size, SshKey};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

pub struct SandboxCloud {
    catalog: Catalog,
    servers: Mutex<Vec<Server>>,
    path: Option<PathBuf>,
}

impl SandboxCloud {
    /// In-memory sandbox; servers vanish with the process.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            servers: Mutex::new(Vec::new()),
            path: None,
        }
    }

    /// Sandbox persisted to `path`. A missing file starts empty.
    pub fn open(catalog: Catalog, path: impl AsRef<Path>) -> CloudResult<Self> {
        let path = path.as_ref().to_path_buf();
        let servers: Vec<Server> = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Vec::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), servers = servers.len(), "Sandbox state loaded");
        Ok(Self {
            catalog,
            servers: Mutex::new(servers),
            path: Some(path),
        })
    }

    fn persist(&self, servers: &[Server]) -> CloudResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(servers)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    fn check_request(&self, request: &ServerRequest) -> CloudResult<()> {
        if self.catalog.image(&request.image).is_none() {
            return Err(not_found("image", &request.image));
        }
        if self.catalog.size(&request.size).is_none() {
            return Err(not_found("size", &request.size));
        }
        match self.catalog.region(&request.region) {
            None => return Err(not_found("region", &request.region)),
            Some(region) if !region.available => {
                return Err(CloudError::Unavailable(region.id.clone()));
            }
            Some(_) => {}
        }
        if let Some(key) = &request.ssh_key {
            if self.catalog.ssh_key(key).is_none() {
                return Err(not_found("ssh key", key));
            }
        }
        Ok(())
    }
}

fn not_found(kind: &'static str, id: &str) -> CloudError {
    CloudError::NotFound {
        kind,
        id: id.to_string(),
    }
}

#[async_trait]
impl CloudProvider for SandboxCloud {
    async fn list_images(&self) -> CloudResult<Vec<Image>> {
        Ok(self.catalog.images.clone())
    }

    async fn list_sizes(&self) -> CloudResult<Vec<Size>> {
        Ok(self.catalog.sizes.clone())
    }

    async fn list_regions(&self) -> CloudResult<Vec<Region>> {
        Ok(self
            .catalog
            .regions
            .iter()
            .filter(|r| r.available)
            .cloned()
            .collect())
    }

    async fn list_ssh_keys(&self) -> CloudResult<Vec<SshKey>> {
        Ok(self.catalog.ssh_keys.clone())
    }

    async fn list_servers(&self) -> CloudResult<Vec<Server>> {
        Ok(self.servers.lock().clone())
    }

    async fn create_server(&self, request: &ServerRequest) -> CloudResult<Server> {
        self.check_request(request)?;

        let mut servers = self.servers.lock();
        if servers.iter().any(|s| s.name == request.name) {
            return Err(CloudError::Conflict(request.name.clone()));
        }
        let server = Server {
            id: Uuid::new_v4().to_string(),
            name: request.name.clone(),
            image: request.image.clone(),
            size: request.size.clone(),
            region: request.region.clone(),
            ssh_key: request.ssh_key.clone(),
            status: ServerStatus::New,
            created_at: Utc::now(),
        };
        servers.push(server.clone());
        if let Err(error) = self.persist(&servers) {
            servers.pop();
            return Err(error);
        }
        info!(id = %server.id, name = %server.name, region = %server.region, "Server created");
        Ok(server)
    }

    async fn delete_server(&self, id: &str) -> CloudResult<Server> {
        let mut servers = self.servers.lock();
        let index = servers
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| not_found("server", id))?;
        let removed = servers.remove(index);
        if let Err(error) = self.persist(&servers) {
            servers.insert(index, removed);
            return Err(error);
        }
        info!(id = %removed.id, name = %removed.name, "Server deleted");
        Ok(removed)
    }
}
