use crate::prompt::Choice;
use async_trait::async_trait;
use cloudwiz_core::Context;

/// Source of selectable items.
///
/// An empty list is a normal answer; the step consuming it decides what to
/// tell the user.
#[async_trait]
pub trait ResourceLister: Send + Sync {
    async fn list(&self, ctx: &Context) -> anyhow::Result<Vec<Choice>>;
}

/// A fixed list of choices.
#[derive(Debug, Clone, Default)]
pub struct StaticLister {
    choices: Vec<Choice>,
}

impl StaticLister {
    pub fn new(choices: Vec<Choice>) -> Self {
        Self { choices }
    }
}

#[async_trait]
impl ResourceLister for StaticLister {
    async fn list(&self, _ctx: &Context) -> anyhow::Result<Vec<Choice>> {
        Ok(self.choices.clone())
    }
}
