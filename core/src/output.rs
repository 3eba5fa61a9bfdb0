//! Step answers.
//!
//! A step's answer is a [`StepValue`] from a closed set of shapes plus a bag
//! of display metadata. The navigator never looks inside either; only steps
//! read each other's answers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StepValue {
    Text(String),
    Integer(i64),
    Bool(bool),
    /// Opaque identifier of an external resource (image slug, key id, ...).
    Id(String),
}

impl StepValue {
    pub fn id(id: impl Into<String>) -> Self {
        StepValue::Id(id.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StepValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            StepValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StepValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_id(&self) -> Option<&str> {
        match self {
            StepValue::Id(s) => Some(s),
            _ => None,
        }
    }

    /// Text or identifier, whichever this value holds.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StepValue::Text(s) | StepValue::Id(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for StepValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepValue::Text(s) | StepValue::Id(s) => write!(f, "{}", s),
            StepValue::Integer(n) => write!(f, "{}", n),
            StepValue::Bool(b) => write!(f, "{}", if *b { "yes" } else { "no" }),
        }
    }
}

impl From<&str> for StepValue {
    fn from(s: &str) -> Self {
        StepValue::Text(s.to_string())
    }
}

impl From<String> for StepValue {
    fn from(s: String) -> Self {
        StepValue::Text(s)
    }
}

impl From<i64> for StepValue {
    fn from(n: i64) -> Self {
        StepValue::Integer(n)
    }
}

impl From<bool> for StepValue {
    fn from(b: bool) -> Self {
        StepValue::Bool(b)
    }
}

/// One step's answer plus auxiliary display metadata.
///
/// Missing metadata keys read as `None`; the map itself always exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutput {
    pub value: StepValue,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl StepOutput {
    pub fn new(value: impl Into<StepValue>) -> Self {
        Self {
            value: value.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// The `label` metadata entry, falling back to the rendered value.
    pub fn label(&self) -> String {
        self.meta("label")
            .map(str::to_string)
            .unwrap_or_else(|| self.value.to_string())
    }
}

macro_rules! output_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for StepOutput {
                fn from(value: $ty) -> Self {
                    StepOutput::new(value)
                }
            }
        )*
    };
}

output_from!(StepValue, &str, String, i64, bool);

/// A recorded answer, keyed by the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: String,
    pub output: StepOutput,
}

impl StepRecord {
    pub fn new(step: impl Into<String>, output: StepOutput) -> Self {
        Self {
            step: step.into(),
            output,
        }
    }
}
