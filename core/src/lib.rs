//! cloudwiz-core - Step Sequencing Engine
//!
//! Composes interactive wizard steps into a [`Flow`], runs them with a
//! [`Navigator`], and keeps the answers in a rewindable [`State`].
//!
//! This crate performs no I/O. Prompt rendering, resource listing and
//! credentials live in the collaborator crates.

pub mod context;
pub mod error;
pub mod flow;
pub mod navigator;
pub mod outcome;
pub mod output;
pub mod state;
pub mod step;
pub mod timeline;

pub use context::Context;
pub use error::{NavigatorError, StateError, ValidationError};
pub use flow::Flow;
pub use navigator::{AbortReason, FlowOutcome, Navigator, Notifier, TracingNotifier};
pub use outcome::Outcome;
pub use output::{StepOutput, StepRecord, StepValue};
pub use state::State;
pub use step::Step;
pub use timeline::{NavEvent, Timeline};

pub mod prelude {
    pub use crate::context::Context;
    pub use crate::error::{NavigatorError, StateError, ValidationError};
    pub use crate::flow::Flow;
    pub use crate::navigator::{AbortReason, FlowOutcome, Navigator};
    pub use crate::outcome::Outcome;
    pub use crate::output::{StepOutput, StepRecord, StepValue};
    pub use crate::state::State;
    pub use crate::step::Step;
    pub use async_trait::async_trait;
}
