use crate::context::Context;
use crate::error::ValidationError;
use crate::outcome::Outcome;
use crate::output::{StepOutput, StepValue};
use crate::state::State;
use async_trait::async_trait;

/// One interactive question in a flow.
///
/// Steps hold no state of their own beyond injected dependencies. Prior
/// answers are read through the `State` passed to [`Step::execute`].
#[async_trait]
pub trait Step: Send + Sync {
    /// History key. Must be unique within one flow.
    fn name(&self) -> &str;

    /// Text shown to the user.
    fn prompt(&self) -> &str;

    /// Run the interactive exchange.
    async fn execute(&self, ctx: &Context, state: &State) -> Outcome;

    /// Flow-level check run after a successful `execute`.
    ///
    /// A rejection makes the navigator ask the same step again.
    fn validate(&self, _output: &StepOutput, _state: &State) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Advertised prefill value. Informational only.
    fn default_value(&self) -> Option<StepValue> {
        None
    }
}

#[async_trait]
impl<S: Step + ?Sized> Step for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn prompt(&self) -> &str {
        (**self).prompt()
    }

    async fn execute(&self, ctx: &Context, state: &State) -> Outcome {
        (**self).execute(ctx, state).await
    }

    fn validate(&self, output: &StepOutput, state: &State) -> Result<(), ValidationError> {
        (**self).validate(output, state)
    }

    fn default_value(&self) -> Option<StepValue> {
        (**self).default_value()
    }
}
