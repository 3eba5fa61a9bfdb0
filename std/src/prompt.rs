//! Prompt renderer contract.
//!
//! Steps talk to the terminal only through [`Prompter`]. A prompter returns
//! either the user's answer or one of the navigation replies; how the
//! question is drawn is its own business.

use async_trait::async_trait;
use cloudwiz_core::{Context, Outcome, StepOutput, StepValue};
use serde::{Deserialize, Serialize};

/// What the user did with a prompt.
#[derive(Debug)]
pub enum Reply<T> {
    Answer(T),
    Back,
    Cancel,
    Interrupted,
    Failed(anyhow::Error),
}

impl<T> Reply<T> {
    /// Split into the answer or the outcome a step should return instead.
    pub fn into_signal(self) -> Result<T, Outcome> {
        match self {
            Reply::Answer(value) => Ok(value),
            Reply::Back => Err(Outcome::Back),
            Reply::Cancel => Err(Outcome::Cancel),
            Reply::Interrupted => Err(Outcome::Interrupted),
            Reply::Failed(error) => Err(Outcome::Fault(error)),
        }
    }

    /// Turn the reply into a step outcome, mapping an answer with `op`.
    pub fn into_outcome<F>(self, op: F) -> Outcome
    where
        F: FnOnce(T) -> Outcome,
    {
        match self.into_signal() {
            Ok(value) => op(value),
            Err(outcome) => outcome,
        }
    }

    pub fn answer(self) -> Option<T> {
        match self {
            Reply::Answer(value) => Some(value),
            _ => None,
        }
    }
}

/// One selectable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub detail: Option<String>,
}

impl Choice {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// The answer recorded when this choice is picked.
    pub fn to_output(&self) -> StepOutput {
        let output = StepOutput::new(StepValue::id(&self.id)).with_meta("label", &self.label);
        match &self.detail {
            Some(detail) => output.with_meta("detail", detail),
            None => output,
        }
    }
}

#[async_trait]
pub trait Prompter: Send + Sync {
    /// Ask for free text. An empty answer falls back to `default` when set.
    async fn input(&self, ctx: &Context, label: &str, default: Option<&str>) -> Reply<String>;

    /// Ask the user to pick one of `choices`. Returns the index picked.
    async fn select(
        &self,
        ctx: &Context,
        label: &str,
        choices: &[Choice],
        default: Option<usize>,
    ) -> Reply<usize>;

    /// Ask a yes/no question.
    async fn confirm(&self, ctx: &Context, label: &str, default: bool) -> Reply<bool>;

    /// Show an informational line.
    fn notify(&self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_maps_signals() {
        let out = Reply::<usize>::Back.into_outcome(|_| Outcome::Cancel);
        assert!(matches!(out, Outcome::Back));

        let out = Reply::Answer(2usize).into_outcome(|i| Outcome::next(i as i64));
        match out {
            Outcome::Next(o) => assert_eq!(o.value, StepValue::Integer(2)),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_choice_output_carries_label() {
        let output = Choice::new("fra1", "Frankfurt 1").with_detail("EU").to_output();
        assert_eq!(output.value.as_id(), Some("fra1"));
        assert_eq!(output.meta("label"), Some("Frankfurt 1"));
        assert_eq!(output.meta("detail"), Some("EU"));
    }
}
