mod confirm;
mod select;
mod text;

pub use confirm::ConfirmStep;
pub use select::SelectStep;
pub use text::TextStep;

use cloudwiz_core::{State, StepOutput, ValidationError};
use std::sync::Arc;

/// Flow-level check attached to a stock step.
pub type Check = Arc<dyn Fn(&StepOutput, &State) -> Result<(), ValidationError> + Send + Sync>;

pub(crate) fn run_checks(checks: &[Check], output: &StepOutput, state: &State) -> Result<(), ValidationError> {
    checks.iter().try_for_each(|check| check(output, state))
}
