use async_trait::async_trait;
use cloudwiz_core::Context;
use cloudwiz_std::{Choice, ResourceLister};

/// Lister whose every call fails with `message`.
#[derive(Debug, Clone)]
pub struct FailingLister {
    message: String,
}

impl FailingLister {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl ResourceLister for FailingLister {
    async fn list(&self, _ctx: &Context) -> anyhow::Result<Vec<Choice>> {
        anyhow::bail!("{}", self.message)
    }
}
