//! cloudwiz-test - test doubles for wizard flows
//!
//! * [`ScriptedStep`] - a step that replays a fixed sequence of outcomes
//! * [`ScriptedPrompter`] - a prompter fed from a queue of canned inputs
//! * [`FailingLister`] - a resource lister that always errors
//! * `assert_completed!` / `assert_aborted!` - outcome assertions

mod lister;
mod prompter;
mod step;

pub use lister::FailingLister;
pub use prompter::{Input, ScriptedPrompter};
pub use step::{Probe, Scripted, ScriptedStep};

#[doc(hidden)]
pub use cloudwiz_core as __core;

use cloudwiz_core::State;

/// Rendered values of the recorded history, oldest first.
pub fn history_values(state: &State) -> Vec<String> {
    state
        .history()
        .into_iter()
        .map(|record| record.output.value.to_string())
        .collect()
}

/// Assert that a navigator result completed with the given final value.
#[macro_export]
macro_rules! assert_completed {
    ($result:expr, $value:expr) => {
        match $result {
            Ok($crate::__core::FlowOutcome::Completed(output)) => {
                assert_eq!(output.value, $crate::__core::StepValue::from($value));
            }
            other => panic!("expected a completed flow, got {:?}", other),
        }
    };
}

/// Assert that a navigator result aborted for the given reason.
#[macro_export]
macro_rules! assert_aborted {
    ($result:expr, $reason:ident) => {
        match $result {
            Ok($crate::__core::FlowOutcome::Aborted(reason)) => {
                assert_eq!(reason, $crate::__core::AbortReason::$reason);
            }
            other => panic!(
                "expected an aborted flow ({}), got {:?}",
                stringify!($reason),
                other
            ),
        }
    };
}
