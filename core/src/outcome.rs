use crate::output::StepOutput;

/// The explicit result of executing one step.
///
/// `Outcome` carries control flow as data: a step never signals "go back" or
/// "cancel" through an error value that has to be compared by identity. The
/// navigator classifies every outcome with a single exhaustive `match`.
#[derive(Debug)]
pub enum Outcome {
    /// The step produced an answer; record it and advance.
    Next(StepOutput),

    /// The user asked to revisit the previous step.
    Back,

    /// The user aborted the wizard.
    Cancel,

    /// The cancellation context fired while the step was waiting.
    Interrupted,

    /// There was nothing to choose from. The step has already explained
    /// why to the user.
    Empty,

    /// Any other failure. The navigator wraps it with the step name.
    Fault(anyhow::Error),
}

impl Outcome {
    pub fn next(output: impl Into<StepOutput>) -> Self {
        Outcome::Next(output.into())
    }

    pub fn fault(error: impl Into<anyhow::Error>) -> Self {
        Outcome::Fault(error.into())
    }

    /// Short label used in logs and timelines.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Next(_) => "next",
            Outcome::Back => "back",
            Outcome::Cancel => "cancel",
            Outcome::Interrupted => "interrupted",
            Outcome::Empty => "empty",
            Outcome::Fault(_) => "fault",
        }
    }
}

impl From<anyhow::Error> for Outcome {
    fn from(error: anyhow::Error) -> Self {
        Outcome::Fault(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(Outcome::next("a").kind(), "next");
        assert_eq!(Outcome::Back.kind(), "back");
        assert_eq!(Outcome::Interrupted.kind(), "interrupted");
        assert_eq!(Outcome::fault(anyhow::anyhow!("boom")).kind(), "fault");
    }

    #[test]
    fn test_anyhow_error_becomes_fault() {
        let outcome: Outcome = anyhow::anyhow!("listing failed").into();
        match outcome {
            Outcome::Fault(error) => assert_eq!(error.to_string(), "listing failed"),
            other => panic!("unexpected outcome: {}", other.kind()),
        }
    }
}
