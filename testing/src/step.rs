use async_trait::async_trait;
use cloudwiz_core::{Context, Outcome, State, Step, StepOutput, ValidationError};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// One scripted reaction of a [`ScriptedStep`].
#[derive(Debug, Clone)]
pub enum Scripted {
    Answer(StepOutput),
    /// Answer, then cancel the context before returning.
    AnswerAndCancel(StepOutput),
    Back,
    Cancel,
    Interrupt,
    Empty,
    Fail(String),
}

type Rejector = Arc<dyn Fn(&StepOutput) -> Option<String> + Send + Sync>;

#[derive(Default)]
struct Log {
    script: VecDeque<Scripted>,
    calls: usize,
    validations: usize,
    prefills: Vec<Option<StepOutput>>,
}

/// Read-only view of a [`ScriptedStep`]'s activity, usable after the step
/// has been moved into a flow.
#[derive(Clone)]
pub struct Probe {
    log: Arc<Mutex<Log>>,
}

impl Probe {
    /// How many times `execute` ran.
    pub fn calls(&self) -> usize {
        self.log.lock().calls
    }

    /// How many times `validate` ran.
    pub fn validations(&self) -> usize {
        self.log.lock().validations
    }

    /// The step's own earlier answer as visible in `State` at each call.
    pub fn prefills(&self) -> Vec<Option<StepOutput>> {
        self.log.lock().prefills.clone()
    }

    /// Scripted reactions not consumed yet.
    pub fn remaining(&self) -> usize {
        self.log.lock().script.len()
    }
}

/// A step that replays a fixed script. Running past the end is a fault.
pub struct ScriptedStep {
    name: String,
    log: Arc<Mutex<Log>>,
    rejector: Option<Rejector>,
}

impl ScriptedStep {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            log: Arc::new(Mutex::new(Log::default())),
            rejector: None,
        }
    }

    fn push(self, scripted: Scripted) -> Self {
        self.log.lock().script.push_back(scripted);
        self
    }

    pub fn answer(self, output: impl Into<StepOutput>) -> Self {
        self.push(Scripted::Answer(output.into()))
    }

    pub fn answer_and_cancel(self, output: impl Into<StepOutput>) -> Self {
        self.push(Scripted::AnswerAndCancel(output.into()))
    }

    pub fn back(self) -> Self {
        self.push(Scripted::Back)
    }

    pub fn cancel(self) -> Self {
        self.push(Scripted::Cancel)
    }

    pub fn interrupt(self) -> Self {
        self.push(Scripted::Interrupt)
    }

    pub fn empty(self) -> Self {
        self.push(Scripted::Empty)
    }

    pub fn fail(self, message: impl Into<String>) -> Self {
        self.push(Scripted::Fail(message.into()))
    }

    /// Reject answers for which `rule` returns a message.
    pub fn reject_when<F>(mut self, rule: F) -> Self
    where
        F: Fn(&StepOutput) -> Option<String> + Send + Sync + 'static,
    {
        self.rejector = Some(Arc::new(rule));
        self
    }

    pub fn probe(&self) -> Probe {
        Probe {
            log: self.log.clone(),
        }
    }
}

#[async_trait]
impl Step for ScriptedStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn prompt(&self) -> &str {
        &self.name
    }

    async fn execute(&self, ctx: &Context, state: &State) -> Outcome {
        let next = {
            let mut log = self.log.lock();
            log.calls += 1;
            log.prefills.push(state.get_result(&self.name));
            log.script.pop_front()
        };
        match next {
            Some(Scripted::Answer(output)) => Outcome::Next(output),
            Some(Scripted::AnswerAndCancel(output)) => {
                ctx.cancel();
                Outcome::Next(output)
            }
            Some(Scripted::Back) => Outcome::Back,
            Some(Scripted::Cancel) => Outcome::Cancel,
            Some(Scripted::Interrupt) => Outcome::Interrupted,
            Some(Scripted::Empty) => Outcome::Empty,
            Some(Scripted::Fail(message)) => Outcome::fault(anyhow::anyhow!(message)),
            None => Outcome::fault(anyhow::anyhow!("script for '{}' is exhausted", self.name)),
        }
    }

    fn validate(&self, output: &StepOutput, _state: &State) -> Result<(), ValidationError> {
        self.log.lock().validations += 1;
        match self.rejector.as_ref().and_then(|rule| rule(output)) {
            Some(message) => Err(ValidationError::new(message)),
            None => Ok(()),
        }
    }
}
