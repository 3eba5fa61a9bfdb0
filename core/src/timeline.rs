use serde::{Deserialize, Serialize};

/// A discrete event in one navigator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavEvent {
    /// A step started executing
    Entered { step: String, index: usize },
    /// A step's answer was recorded
    Recorded { step: String, index: usize },
    /// The cursor moved back
    Rewound { from: usize, to: usize },
    /// `validate` rejected an answer; the step runs again
    Rejected { step: String, message: String },
    /// The run stopped on a control signal
    Aborted { reason: String },
    /// The run finished with `steps` answers recorded
    Completed { steps: usize },
    /// The run stopped on a hard failure
    Failed { step: Option<String> },
}

/// A sequential record of a navigator run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    pub events: Vec<NavEvent>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: NavEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Names of the steps entered, in order, including re-entries.
    pub fn entered(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                NavEvent::Entered { step, .. } => Some(step.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count_rewinds(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, NavEvent::Rewound { .. }))
            .count()
    }
}
