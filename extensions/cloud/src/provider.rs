use crate::error::CloudResult;
use crate::request::ServerRequest;
use crate::types::{Image, Region, Server, Size, SshKey};
use async_trait::async_trait;

/// The cloud API as the wizard needs it.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    async fn list_images(&self) -> CloudResult<Vec<Image>>;
    async fn list_sizes(&self) -> CloudResult<Vec<Size>>;
    /// Regions currently accepting new servers.
    async fn list_regions(&self) -> CloudResult<Vec<Region>>;
    async fn list_ssh_keys(&self) -> CloudResult<Vec<SshKey>>;
    async fn list_servers(&self) -> CloudResult<Vec<Server>>;
    async fn create_server(&self, request: &ServerRequest) -> CloudResult<Server>;
    async fn delete_server(&self, id: &str) -> CloudResult<Server>;
}
