//! Shared deterministic types for catalog core logic.
//!
//! These types carry no timing or I/O state, so a report built from them is
//! identical across runs of an unchanged catalog.

use std::fmt;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Why a demonstration did not pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Actual value or structure differs from the expected one.
    AssertionMismatch,
    /// An error or rejection was expected, none occurred.
    MissingThrow,
    WrongErrorKind,
    /// The action threw or rejected although a value was expected.
    UnexpectedThrow,
    /// The action aborted abnormally (a Rust panic).
    Panicked,
    /// An async action did not settle within its budget.
    Timeout,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::AssertionMismatch => "AssertionMismatch",
            FailureKind::MissingThrow => "MissingThrow",
            FailureKind::WrongErrorKind => "WrongErrorKind",
            FailureKind::UnexpectedThrow => "UnexpectedThrow",
            FailureKind::Panicked => "Panicked",
            FailureKind::Timeout => "Timeout",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub detail: String,
}

impl Failure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

/// Terminal result of one demonstration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed(Failure),
    TimedOut { budget_ms: u64 },
}

impl Outcome {
    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Outcome::Passed => None,
            Outcome::Failed(failure) => Some(failure.kind),
            Outcome::TimedOut { .. } => Some(FailureKind::Timeout),
        }
    }

    pub fn detail(&self) -> Option<String> {
        match self {
            Outcome::Passed => None,
            Outcome::Failed(failure) => Some(failure.detail.clone()),
            Outcome::TimedOut { budget_ms } => {
                Some(format!("did not settle within {budget_ms}ms"))
            }
        }
    }
}

/// Lifecycle of a demonstration within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoState {
    Pending,
    Running,
    Passed,
    Failed,
    TimedOut,
}

impl DemoState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DemoState::Passed | DemoState::Failed | DemoState::TimedOut
        )
    }

    /// Move to `next`, rejecting anything but `Pending -> Running -> terminal`.
    pub fn advance(self, next: DemoState) -> Result<DemoState> {
        let legal = match self {
            DemoState::Pending => next == DemoState::Running,
            DemoState::Running => next.is_terminal(),
            DemoState::Passed | DemoState::Failed | DemoState::TimedOut => false,
        };
        if !legal {
            bail!("illegal demonstration transition {:?} -> {:?}", self, next);
        }
        Ok(next)
    }
}

impl From<&Outcome> for DemoState {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Passed => DemoState::Passed,
            Outcome::Failed(_) => DemoState::Failed,
            Outcome::TimedOut { .. } => DemoState::TimedOut,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_machine_allows_only_forward_transitions() {
        let running = DemoState::Pending
            .advance(DemoState::Running)
            .expect("pending -> running");
        assert_eq!(
            running.advance(DemoState::TimedOut).expect("terminal"),
            DemoState::TimedOut
        );
        assert!(DemoState::Pending.advance(DemoState::Passed).is_err());
        assert!(DemoState::Passed.advance(DemoState::Running).is_err());
        assert!(DemoState::Running.advance(DemoState::Pending).is_err());
    }

    #[test]
    fn timed_out_is_reported_as_timeout_kind() {
        let outcome = Outcome::TimedOut { budget_ms: 50 };
        assert_eq!(outcome.failure_kind(), Some(FailureKind::Timeout));
        assert_eq!(outcome.detail().as_deref(), Some("did not settle within 50ms"));
        assert!(!outcome.passed());
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome = Outcome::Failed(Failure::new(FailureKind::MissingThrow, "returned 1"));
        let json = serde_json::to_value(&outcome).expect("json");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["kind"], "MissingThrow");
    }
}
