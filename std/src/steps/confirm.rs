use crate::prompt::Prompter;
use async_trait::async_trait;
use cloudwiz_core::{Context, Outcome, State, Step, StepOutput, StepValue};
use std::sync::Arc;

/// Final yes/no gate that summarises earlier answers.
///
/// "No" cancels the flow; going back returns to the previous step so the
/// user can change an answer.
pub struct ConfirmStep {
    name: String,
    prompt: String,
    summary: Vec<(String, String)>,
    default: bool,
    prompter: Arc<dyn Prompter>,
}

impl ConfirmStep {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            summary: Vec::new(),
            default: true,
            prompter,
        }
    }

    /// Include the answer of `step` in the summary under `caption`.
    pub fn show(mut self, step: impl Into<String>, caption: impl Into<String>) -> Self {
        self.summary.push((step.into(), caption.into()));
        self
    }

    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    /// Summary lines for the current state.
    pub fn summary(&self, state: &State) -> Vec<String> {
        let width = self.summary.iter().map(|(_, c)| c.chars().count()).max().unwrap_or(0);
        self.summary
            .iter()
            .map(|(step, caption)| {
                let shown = state
                    .get_result(step)
                    .map(|output| output.label())
                    .unwrap_or_else(|| "(not set)".to_string());
                format!("  {:<width$}  {}", format!("{}:", caption), shown, width = width + 1)
            })
            .collect()
    }
}

#[async_trait]
impl Step for ConfirmStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn prompt(&self) -> &str {
        &self.prompt
    }

    async fn execute(&self, ctx: &Context, state: &State) -> Outcome {
        if !self.summary.is_empty() {
            self.prompter.notify(&self.summary(state).join("\n"));
        }
        self.prompter
            .confirm(ctx, &self.prompt, self.default)
            .await
            .into_outcome(|confirmed| {
                if confirmed {
                    Outcome::next(StepOutput::new(true).with_meta("label", "confirmed"))
                } else {
                    Outcome::Cancel
                }
            })
    }

    fn default_value(&self) -> Option<StepValue> {
        Some(StepValue::Bool(self.default))
    }
}
