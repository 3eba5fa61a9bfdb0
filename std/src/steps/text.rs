use super::{Check, run_checks};
use crate::prompt::Prompter;
use crate::rules::Rule;
use async_trait::async_trait;
use cloudwiz_core::{Context, Outcome, State, Step, StepOutput, StepValue, ValidationError};
use std::sync::Arc;

/// Free-text question.
///
/// Rules are checked inside `execute`; a failing rule prints its message and
/// asks again without involving the navigator. After a rewind the previous
/// answer is offered as the default.
pub struct TextStep {
    name: String,
    prompt: String,
    default: Option<String>,
    rules: Vec<Rule>,
    checks: Vec<Check>,
    prompter: Arc<dyn Prompter>,
}

impl TextStep {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            default: None,
            rules: Vec::new(),
            checks: Vec::new(),
            prompter,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    pub fn with_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&StepOutput, &State) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.checks.push(Arc::new(check));
        self
    }

    fn prefill(&self, state: &State) -> Option<String> {
        state
            .get_result(&self.name)
            .and_then(|previous| previous.value.as_text().map(str::to_string))
            .or_else(|| self.default.clone())
    }
}

#[async_trait]
impl Step for TextStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn prompt(&self) -> &str {
        &self.prompt
    }

    async fn execute(&self, ctx: &Context, state: &State) -> Outcome {
        let prefill = self.prefill(state);
        loop {
            let text = match self.prompter.input(ctx, &self.prompt, prefill.as_deref()).await.into_signal() {
                Ok(text) => text,
                Err(outcome) => return outcome,
            };
            match self.rules.iter().try_for_each(|rule| rule(&text)) {
                Ok(()) => {
                    return Outcome::next(StepOutput::new(text.clone()).with_meta("label", text));
                }
                Err(message) => self.prompter.notify(&format!("  {}", message)),
            }
        }
    }

    fn validate(&self, output: &StepOutput, state: &State) -> Result<(), ValidationError> {
        run_checks(&self.checks, output, state)
    }

    fn default_value(&self) -> Option<StepValue> {
        self.default.clone().map(StepValue::Text)
    }
}
