//! Flow - Named Step Sequence
//!
//! A `Flow` owns an ordered list of steps and the single [`State`] the
//! navigator mutates while driving it.
//!
//! ```rust,ignore
//! let flow = Flow::new("create-server")
//!     .then(name_step)
//!     .then(image_step)
//!     .then(confirm_step);
//! ```

use crate::state::State;
use crate::step::Step;

pub struct Flow {
    name: String,
    steps: Vec<Box<dyn Step>>,
    state: State,
}

impl Flow {
    /// Start a flow with a fresh, unbounded state.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_state(name, State::new())
    }

    /// Start a flow around externally supplied state (resumption, tests).
    pub fn with_state(name: impl Into<String>, state: State) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            state,
        }
    }

    /// Append a step.
    pub fn then<S: Step + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Box<dyn Step>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Split borrow used by the navigator: steps read-only, state mutable.
    pub(crate) fn parts_mut(&mut self) -> (&[Box<dyn Step>], &mut State) {
        (&self.steps, &mut self.state)
    }
}

impl std::fmt::Debug for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flow")
            .field("name", &self.name)
            .field(
                "steps",
                &self.steps.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("state", &self.state)
            .finish()
    }
}
