use async_trait::async_trait;
use cloudwiz_core::Context;
use cloudwiz_std::{Choice, Prompter, Reply};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// A canned user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Text(String),
    /// Zero-based choice index.
    Pick(usize),
    /// Accept whatever default the prompt offers.
    Default,
    Yes,
    No,
    Back,
    Cancel,
    Interrupt,
}

/// A prompt as the scripted prompter saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asked {
    pub label: String,
    pub default: Option<String>,
    pub choices: Vec<String>,
}

#[derive(Default)]
struct Inner {
    inputs: VecDeque<Input>,
    asked: Vec<Asked>,
    notices: Vec<String>,
}

/// Prompter that answers from a queue. Running out of input cancels.
#[derive(Default)]
pub struct ScriptedPrompter {
    inner: Mutex<Inner>,
}

impl ScriptedPrompter {
    pub fn new(inputs: impl IntoIterator<Item = Input>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                inputs: inputs.into_iter().collect(),
                ..Inner::default()
            }),
        }
    }

    pub fn push(&self, input: Input) {
        self.inner.lock().inputs.push_back(input);
    }

    pub fn asked(&self) -> Vec<Asked> {
        self.inner.lock().asked.clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.inner.lock().notices.clone()
    }

    pub fn remaining(&self) -> usize {
        self.inner.lock().inputs.len()
    }

    fn take(&self, asked: Asked) -> Option<Input> {
        let mut inner = self.inner.lock();
        inner.asked.push(asked);
        inner.inputs.pop_front()
    }
}

fn signal<T>(input: Option<Input>, expected: &str) -> Reply<T> {
    match input {
        None | Some(Input::Cancel) => Reply::Cancel,
        Some(Input::Back) => Reply::Back,
        Some(Input::Interrupt) => Reply::Interrupted,
        Some(other) => Reply::Failed(anyhow::anyhow!("scripted {:?} given to a {} prompt", other, expected)),
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn input(&self, ctx: &Context, label: &str, default: Option<&str>) -> Reply<String> {
        if ctx.is_cancelled() {
            return Reply::Interrupted;
        }
        let input = self.take(Asked {
            label: label.to_string(),
            default: default.map(str::to_string),
            choices: Vec::new(),
        });
        match input {
            Some(Input::Text(text)) => Reply::Answer(text),
            Some(Input::Default) => match default {
                Some(default) => Reply::Answer(default.to_string()),
                None => Reply::Failed(anyhow::anyhow!("no default offered for '{}'", label)),
            },
            other => signal(other, "text"),
        }
    }

    async fn select(
        &self,
        ctx: &Context,
        label: &str,
        choices: &[Choice],
        default: Option<usize>,
    ) -> Reply<usize> {
        if ctx.is_cancelled() {
            return Reply::Interrupted;
        }
        let input = self.take(Asked {
            label: label.to_string(),
            default: default.map(|d| d.to_string()),
            choices: choices.iter().map(|c| c.id.clone()).collect(),
        });
        match input {
            Some(Input::Pick(index)) => Reply::Answer(index),
            Some(Input::Default) => match default {
                Some(default) => Reply::Answer(default),
                None => Reply::Failed(anyhow::anyhow!("no default offered for '{}'", label)),
            },
            other => signal(other, "select"),
        }
    }

    async fn confirm(&self, ctx: &Context, label: &str, default: bool) -> Reply<bool> {
        if ctx.is_cancelled() {
            return Reply::Interrupted;
        }
        let input = self.take(Asked {
            label: label.to_string(),
            default: Some(default.to_string()),
            choices: Vec::new(),
        });
        match input {
            Some(Input::Yes) => Reply::Answer(true),
            Some(Input::No) => Reply::Answer(false),
            Some(Input::Default) => Reply::Answer(default),
            other => signal(other, "confirm"),
        }
    }

    fn notify(&self, message: &str) {
        self.inner.lock().notices.push(message.to_string());
    }
}
