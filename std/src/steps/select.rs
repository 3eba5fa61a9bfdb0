use super::{Check, run_checks};
use crate::lister::ResourceLister;
use crate::prompt::Prompter;
use anyhow::anyhow;
use async_trait::async_trait;
use cloudwiz_core::{Context, Outcome, State, Step, StepOutput, ValidationError};
use std::sync::Arc;

/// Pick one item from a [`ResourceLister`].
///
/// An empty list prints `empty_message` and ends the flow with the empty
/// state signal. The recorded answer is the choice id, with its label kept in
/// metadata for later summaries.
pub struct SelectStep {
    name: String,
    prompt: String,
    empty_message: String,
    lister: Arc<dyn ResourceLister>,
    prompter: Arc<dyn Prompter>,
    checks: Vec<Check>,
}

impl SelectStep {
    pub fn new(
        name: impl Into<String>,
        prompt: impl Into<String>,
        lister: Arc<dyn ResourceLister>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        let name = name.into();
        Self {
            empty_message: format!("Nothing available to choose for '{}'.", name),
            name,
            prompt: prompt.into(),
            lister,
            prompter,
            checks: Vec::new(),
        }
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn with_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&StepOutput, &State) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.checks.push(Arc::new(check));
        self
    }
}

#[async_trait]
impl Step for SelectStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn prompt(&self) -> &str {
        &self.prompt
    }

    async fn execute(&self, ctx: &Context, state: &State) -> Outcome {
        let listed = tokio::select! {
            _ = ctx.cancelled() => return Outcome::Interrupted,
            listed = self.lister.list(ctx) => listed,
        };
        let choices = match listed {
            Ok(choices) => choices,
            Err(error) => return Outcome::Fault(error.context(format!("could not list {}", self.name))),
        };
        tracing::debug!(step = %self.name, count = choices.len(), "Choices listed");

        if choices.is_empty() {
            self.prompter.notify(&self.empty_message);
            return Outcome::Empty;
        }

        let default = state.get_result(&self.name).and_then(|previous| {
            let id = previous.value.as_id()?.to_string();
            choices.iter().position(|c| c.id == id)
        });

        let picked = match self.prompter.select(ctx, &self.prompt, &choices, default).await.into_signal() {
            Ok(picked) => picked,
            Err(outcome) => return outcome,
        };
        match choices.get(picked) {
            Some(choice) => Outcome::Next(choice.to_output()),
            None => Outcome::fault(anyhow!(
                "selection {} is out of range ({} choices)",
                picked,
                choices.len()
            )),
        }
    }

    fn validate(&self, output: &StepOutput, state: &State) -> Result<(), ValidationError> {
        run_checks(&self.checks, output, state)
    }
}
