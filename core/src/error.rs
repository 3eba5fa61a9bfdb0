use thiserror::Error;

/// Errors raised by [`State`](crate::state::State) cursor operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("step index {index} is out of range (max {max})")]
    InvalidStepIndex { index: usize, max: usize },
    #[error("already at the first step")]
    CannotGoBack,
}

/// A rejected answer. The navigator shows the message and asks again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Hard failures of a navigator run.
///
/// Control signals (back, cancel, interruption, empty state, rejected
/// answers) never appear here; they end as a [`FlowOutcome`](crate::navigator::FlowOutcome).
#[derive(Error, Debug)]
pub enum NavigatorError {
    #[error("flow '{flow}' has no steps")]
    NoSteps { flow: String },

    #[error("flow '{flow}' finished without recording any answer")]
    EmptyHistory { flow: String },

    #[error("step '{step}' failed: {source}")]
    Step {
        step: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    State(#[from] StateError),
}

impl NavigatorError {
    /// Name of the failing step, when the failure came from one.
    pub fn step(&self) -> Option<&str> {
        match self {
            NavigatorError::Step { step, .. } => Some(step),
            _ => None,
        }
    }
}
