//! State - Answer History and Cursor
//!
//! `State` records every answer a flow has collected together with a cursor
//! into the step sequence. Moving the cursor back leaves history alone;
//! recording a new answer behind the end of history discards everything
//! after the cursor first, so answers derived from a changed one never
//! survive the change.

use crate::error::StateError;
use crate::output::{StepOutput, StepRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    history: Vec<StepRecord>,
    cursor: usize,
    max_steps: Option<usize>,
}

impl State {
    /// Create an unbounded state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state whose cursor never exceeds `max_steps`.
    pub fn bounded(max_steps: usize) -> Self {
        Self {
            max_steps: Some(max_steps),
            ..Self::default()
        }
    }

    /// A copy of the recorded history, oldest first.
    pub fn history(&self) -> Vec<StepRecord> {
        self.history.clone()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn current_step(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to `index`.
    ///
    /// Fails when a bound is configured and `index >= max`.
    pub fn set_current_step(&mut self, index: usize) -> Result<(), StateError> {
        if let Some(max) = self.max_steps {
            if index >= max {
                return Err(StateError::InvalidStepIndex { index, max });
            }
        }
        self.cursor = index;
        Ok(())
    }

    /// Record `output` for `step` at the cursor and advance.
    ///
    /// When the cursor sits before the end of history, the suffix from the
    /// cursor onward is dropped first. Re-recording an identical answer
    /// still truncates.
    pub fn add_result(&mut self, step: impl Into<String>, output: StepOutput) -> Result<(), StateError> {
        if let Some(max) = self.max_steps {
            if self.cursor >= max {
                return Err(StateError::InvalidStepIndex {
                    index: self.cursor,
                    max,
                });
            }
        }
        self.history.truncate(self.cursor);
        self.history.push(StepRecord::new(step, output));
        self.cursor += 1;
        Ok(())
    }

    /// The most recent answer recorded for `step` at or before the cursor.
    ///
    /// Entries past the cursor belong to steps that will be asked again and
    /// are not visible. The entry exactly at the cursor is the answer the
    /// current step gave before a rewind, which steps use as a prefill.
    pub fn get_result(&self, step: &str) -> Option<StepOutput> {
        let visible = self.history.len().min(self.cursor.saturating_add(1));
        self.history[..visible]
            .iter()
            .rev()
            .find(|record| record.step == step)
            .map(|record| record.output.clone())
    }

    /// The last recorded entry, if any.
    pub fn last(&self) -> Option<&StepRecord> {
        self.history.last()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    /// Step the cursor back by one and return the new index.
    pub fn back(&mut self) -> Result<usize, StateError> {
        if !self.can_go_back() {
            return Err(StateError::CannotGoBack);
        }
        self.cursor -= 1;
        Ok(self.cursor)
    }

    /// Forget all answers and rewind to the first step.
    pub fn clear(&mut self) {
        self.history.clear();
        self.cursor = 0;
    }
}
