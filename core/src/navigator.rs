//! # Navigator: Flow Driver
//!
//! The `Navigator` walks a [`Flow`] one step at a time. It executes the step
//! under the cursor, classifies the returned [`Outcome`], and moves the
//! flow's [`State`](crate::state::State) accordingly:
//!
//! * `Next` - validate, record, advance (a rejected answer re-asks the step)
//! * `Back` - rewind one step; at the first step this cancels the flow
//! * `Cancel` / `Interrupted` / `Empty` - stop with an [`AbortReason`]
//! * `Fault` - stop with a [`NavigatorError::Step`]
//!
//! Exactly one step runs at a time. Cancellation of the [`Context`] is
//! checked before every step, so a cancel requested between steps is
//! honoured even when the previous exchange completed.

use crate::context::Context;
use crate::error::{NavigatorError, ValidationError};
use crate::flow::Flow;
use crate::outcome::Outcome;
use crate::output::StepOutput;
use crate::timeline::{NavEvent, Timeline};
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;

/// Why a run stopped without completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The user cancelled, or went back from the first step.
    Cancelled,
    /// The context was cancelled (interrupt signal, deadline).
    Interrupted,
    /// A step had nothing to offer and explained so itself.
    EmptyState,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AbortReason::Cancelled => "cancelled",
            AbortReason::Interrupted => "interrupted",
            AbortReason::EmptyState => "empty_state",
        };
        write!(f, "{}", s)
    }
}

/// Terminal state of a run that did not hard-fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Every step answered. Holds the answer of the last recorded entry.
    Completed(StepOutput),
    Aborted(AbortReason),
}

/// Receives rejected answers so they can be shown inline.
pub trait Notifier: Send + Sync {
    fn validation_failed(&self, step: &str, error: &ValidationError);
}

impl<F> Notifier for F
where
    F: Fn(&str, &ValidationError) + Send + Sync,
{
    fn validation_failed(&self, step: &str, error: &ValidationError) {
        self(step, error)
    }
}

/// Default notifier: logs rejections.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn validation_failed(&self, step: &str, error: &ValidationError) {
        tracing::warn!(step, message = %error, "Answer rejected");
    }
}

#[derive(Clone)]
pub struct Navigator {
    notifier: Arc<dyn Notifier>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator").finish_non_exhaustive()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            notifier: Arc::new(TracingNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Drive `flow` to a terminal state.
    pub async fn run(&self, flow: &mut Flow, ctx: &Context) -> Result<FlowOutcome, NavigatorError> {
        let mut timeline = Timeline::new();
        self.run_with_timeline(flow, ctx, &mut timeline).await
    }

    /// Drive `flow` to a terminal state, recording every transition.
    pub async fn run_with_timeline(
        &self,
        flow: &mut Flow,
        ctx: &Context,
        timeline: &mut Timeline,
    ) -> Result<FlowOutcome, NavigatorError> {
        if flow.is_empty() {
            return Err(NavigatorError::NoSteps {
                flow: flow.name().to_string(),
            });
        }

        let span = tracing::info_span!("flow", flow.name = %flow.name(), flow.steps = flow.len());
        async move {
            let result = self.drive(flow, ctx, timeline).await;
            match &result {
                Ok(FlowOutcome::Completed(_)) => {
                    tracing::info!(answers = flow.state().len(), "Flow completed")
                }
                Ok(FlowOutcome::Aborted(reason)) => tracing::info!(%reason, "Flow aborted"),
                Err(error) => tracing::error!(%error, "Flow failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn drive(
        &self,
        flow: &mut Flow,
        ctx: &Context,
        timeline: &mut Timeline,
    ) -> Result<FlowOutcome, NavigatorError> {
        let flow_name = flow.name().to_string();
        let (steps, state) = flow.parts_mut();

        loop {
            let index = state.current_step();
            if index >= steps.len() {
                break;
            }

            if ctx.is_cancelled() {
                return Ok(abort(timeline, AbortReason::Interrupted));
            }

            let step = &steps[index];
            let name = step.name();
            timeline.push(NavEvent::Entered {
                step: name.to_string(),
                index,
            });
            tracing::debug!(step = name, index, "Entered step");

            let outcome = step
                .execute(ctx, state)
                .instrument(tracing::debug_span!("step", step.name = name, step.index = index))
                .await;
            tracing::debug!(step = name, outcome = outcome.kind(), "Step returned");

            match outcome {
                Outcome::Next(output) => match step.validate(&output, state) {
                    Ok(()) => {
                        state.add_result(name, output)?;
                        tracing::debug!(step = name, index, "Answer recorded");
                        timeline.push(NavEvent::Recorded {
                            step: name.to_string(),
                            index,
                        });
                    }
                    Err(rejection) => {
                        self.notifier.validation_failed(name, &rejection);
                        timeline.push(NavEvent::Rejected {
                            step: name.to_string(),
                            message: rejection.message,
                        });
                    }
                },
                Outcome::Back => {
                    if !state.can_go_back() {
                        tracing::debug!(step = name, "Back from the first step");
                        return Ok(abort(timeline, AbortReason::Cancelled));
                    }
                    let to = state.back()?;
                    tracing::debug!(from = index, to, "Rewound");
                    timeline.push(NavEvent::Rewound { from: index, to });
                }
                Outcome::Cancel => return Ok(abort(timeline, AbortReason::Cancelled)),
                Outcome::Interrupted => return Ok(abort(timeline, AbortReason::Interrupted)),
                Outcome::Empty => return Ok(abort(timeline, AbortReason::EmptyState)),
                Outcome::Fault(source) => {
                    timeline.push(NavEvent::Failed {
                        step: Some(name.to_string()),
                    });
                    return Err(NavigatorError::Step {
                        step: name.to_string(),
                        source,
                    });
                }
            }
        }

        match state.last() {
            Some(record) => {
                timeline.push(NavEvent::Completed { steps: state.len() });
                Ok(FlowOutcome::Completed(record.output.clone()))
            }
            None => {
                timeline.push(NavEvent::Failed { step: None });
                Err(NavigatorError::EmptyHistory { flow: flow_name })
            }
        }
    }
}

fn abort(timeline: &mut Timeline, reason: AbortReason) -> FlowOutcome {
    timeline.push(NavEvent::Aborted {
        reason: reason.to_string(),
    });
    FlowOutcome::Aborted(reason)
}
