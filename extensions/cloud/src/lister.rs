use crate::provider::CloudProvider;
use async_trait::async_trait;
use cloudwiz_core::Context;
use cloudwiz_std::{Choice, ResourceLister};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resource {
    Images,
    Sizes,
    Regions,
    SshKeys,
    Servers,
}

/// Exposes one provider collection as menu choices.
#[derive(Clone)]
pub struct ProviderLister {
    provider: Arc<dyn CloudProvider>,
    resource: Resource,
}

impl ProviderLister {
    fn new(provider: Arc<dyn CloudProvider>, resource: Resource) -> Self {
        Self { provider, resource }
    }

    pub fn images(provider: Arc<dyn CloudProvider>) -> Self {
        Self::new(provider, Resource::Images)
    }

    pub fn sizes(provider: Arc<dyn CloudProvider>) -> Self {
        Self::new(provider, Resource::Sizes)
    }

    pub fn regions(provider: Arc<dyn CloudProvider>) -> Self {
        Self::new(provider, Resource::Regions)
    }

    pub fn ssh_keys(provider: Arc<dyn CloudProvider>) -> Self {
        Self::new(provider, Resource::SshKeys)
    }

    pub fn servers(provider: Arc<dyn CloudProvider>) -> Self {
        Self::new(provider, Resource::Servers)
    }
}

#[async_trait]
impl ResourceLister for ProviderLister {
    async fn list(&self, _ctx: &Context) -> anyhow::Result<Vec<Choice>> {
        let p = &self.provider;
        let choices = match self.resource {
            Resource::Images => p
                .list_images()
                .await?
                .into_iter()
                .map(|i| {
                    let choice = Choice::new(i.id, i.name);
                    if i.distribution.is_empty() {
                        choice
                    } else {
                        choice.with_detail(i.distribution)
                    }
                })
                .collect(),
            Resource::Sizes => p
                .list_sizes()
                .await?
                .into_iter()
                .map(|s| {
                    let detail = s.describe();
                    Choice::new(s.id.clone(), s.id).with_detail(detail)
                })
                .collect(),
            Resource::Regions => p
                .list_regions()
                .await?
                .into_iter()
                .map(|r| Choice::new(r.id.clone(), r.name).with_detail(r.id))
                .collect(),
            Resource::SshKeys => p
                .list_ssh_keys()
                .await?
                .into_iter()
                .map(|k| Choice::new(k.id, k.name).with_detail(k.fingerprint))
                .collect(),
            Resource::Servers => p
                .list_servers()
                .await?
                .into_iter()
                .map(|s| {
                    let detail = format!("{}, {}, {}", s.status, s.region, s.size);
                    Choice::new(s.id, s.name).with_detail(detail)
                })
                .collect(),
        };
        Ok(choices)
    }
}
