//! Orchestration for `run()`: execute selected demonstrations one at a time.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::{Duration, Instant};

use futures::FutureExt;
use tracing::{debug, info, instrument, warn};

use crate::action::{Action, Completion};
use crate::catalog::Catalog;
use crate::core::expectation::evaluate;
use crate::core::path::GroupPath;
use crate::core::types::{DemoState, Failure, FailureKind, Outcome};
use crate::io::config::RunConfig;
use crate::report::{DemoResult, RunReport};
use crate::tree::Demonstration;

/// Options for a single `run()` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Only demonstrations whose group path starts with this prefix.
    pub filter: Option<GroupPath>,
    /// Budget for each async demonstration to settle.
    pub async_timeout: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            filter: None,
            async_timeout: Duration::from_millis(RunConfig::default().async_timeout_ms),
        }
    }
}

impl RunOptions {
    pub fn from_config(cfg: &RunConfig, filter: Option<GroupPath>) -> Self {
        Self {
            filter,
            async_timeout: Duration::from_millis(cfg.async_timeout_ms),
        }
    }
}

/// Execute every selected demonstration in order and collect a report.
///
/// Never fails: every per-demonstration problem is recorded in the report.
/// Demonstrations run sequentially on the calling task; the next one starts
/// only after the current one has passed, failed or timed out.
#[instrument(skip_all, fields(filter = ?options.filter, timeout_ms = options.async_timeout.as_millis() as u64))]
pub async fn run(catalog: &Catalog, options: &RunOptions) -> RunReport {
    let selected = catalog.select(options.filter.as_ref());
    info!(selected = selected.len(), "run started");
    let started = Instant::now();

    let mut results = Vec::with_capacity(selected.len());
    for demo in selected {
        results.push(run_demonstration(demo, options.async_timeout).await);
    }

    let report = RunReport::from_results(results);
    info!(
        total = report.total,
        passed = report.passed,
        failed = report.failed,
        timed_out = report.timed_out,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "run finished"
    );
    report
}

async fn run_demonstration(demo: &Demonstration, budget: Duration) -> DemoResult {
    let started = Instant::now();
    let state = transition(DemoState::Pending, DemoState::Running);
    let outcome = execute(demo, budget).await;
    let state = transition(state, DemoState::from(&outcome));

    match &outcome {
        Outcome::Passed => {
            debug!(group = %demo.path, description = %demo.description, ?state, "demonstration passed");
        }
        Outcome::Failed(failure) if failure.kind == FailureKind::Panicked => {
            warn!(group = %demo.path, description = %demo.description, detail = %failure.detail, "demonstration panicked");
        }
        Outcome::Failed(failure) => {
            debug!(group = %demo.path, description = %demo.description, kind = %failure.kind, detail = %failure.detail, "demonstration failed");
        }
        Outcome::TimedOut { budget_ms } => {
            warn!(group = %demo.path, description = %demo.description, budget_ms, "demonstration timed out");
        }
    }
    debug!(elapsed_ms = started.elapsed().as_millis() as u64, "demonstration settled");

    DemoResult {
        path: demo.path.clone(),
        description: demo.description.clone(),
        expectation: demo.expectation.kind(),
        outcome,
    }
}

async fn execute(demo: &Demonstration, budget: Duration) -> Outcome {
    let completion = match &demo.action {
        Action::Sync(action) => match catch_unwind(AssertUnwindSafe(|| action())) {
            Ok(completion) => completion,
            Err(payload) => return panicked(payload),
        },
        Action::Async(action) => {
            let future = match catch_unwind(AssertUnwindSafe(|| action())) {
                Ok(future) => future,
                Err(payload) => return panicked(payload),
            };
            match settle(future, budget).await {
                Settled::Completed(completion) => completion,
                Settled::Panicked(payload) => return panicked(payload),
                Settled::TimedOut => {
                    return Outcome::TimedOut {
                        budget_ms: budget.as_millis() as u64,
                    };
                }
            }
        }
    };

    match evaluate(&demo.expectation, &completion) {
        Ok(()) => Outcome::Passed,
        Err(failure) => Outcome::Failed(failure),
    }
}

fn transition(from: DemoState, to: DemoState) -> DemoState {
    if let Err(err) = from.advance(to) {
        warn!(%err, "unexpected demonstration state change");
    }
    to
}

enum Settled {
    Completed(Completion),
    Panicked(Box<dyn Any + Send>),
    TimedOut,
}

/// Await `future` for at most `budget`. On expiry the future is dropped, not
/// driven further.
async fn settle(
    future: futures::future::BoxFuture<'static, Completion>,
    budget: Duration,
) -> Settled {
    match tokio::time::timeout(budget, AssertUnwindSafe(future).catch_unwind()).await {
        Ok(Ok(completion)) => Settled::Completed(completion),
        Ok(Err(payload)) => Settled::Panicked(payload),
        Err(_elapsed) => Settled::TimedOut,
    }
}

fn panicked(payload: Box<dyn Any + Send>) -> Outcome {
    let message = if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };
    Outcome::Failed(Failure::new(
        FailureKind::Panicked,
        format!("action panicked: {message}"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ErrorKind, Thrown};
    use crate::core::expectation::Expectation;
    use crate::core::value::Value;
    use crate::test_support::{never_settles, resolves_after};

    fn options(timeout_ms: u64) -> RunOptions {
        RunOptions {
            filter: None,
            async_timeout: Duration::from_millis(timeout_ms),
        }
    }

    #[tokio::test]
    async fn sync_panic_is_isolated() {
        let mut catalog = Catalog::new();
        let mut scope = catalog.scope(["isolation"]);
        scope
            .check(
                "panics",
                Action::sync(|| panic!("boom")),
                Expectation::Equal(Value::from(1)),
            )
            .expect("register");
        scope.equal("still runs", || 1, 1).expect("register");

        let report = run(&catalog, &options(100)).await;
        assert_eq!(report.total, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(
            report.results[0].outcome.failure_kind(),
            Some(FailureKind::Panicked)
        );
        assert!(
            report.results[0]
                .outcome
                .detail()
                .is_some_and(|detail| detail.contains("boom"))
        );
    }

    #[tokio::test]
    async fn async_panic_is_isolated() {
        let mut catalog = Catalog::new();
        catalog
            .scope(["isolation"])
            .resolves(
                "panics while polled",
                || async {
                    if true {
                        panic!("async boom");
                    }
                    Ok(Value::Undefined)
                },
                None,
            )
            .expect("register");

        let report = run(&catalog, &options(100)).await;
        assert_eq!(
            report.results[0].outcome.failure_kind(),
            Some(FailureKind::Panicked)
        );
    }

    #[tokio::test]
    async fn timeout_is_distinct_from_mismatch() {
        let mut catalog = Catalog::new();
        let mut scope = catalog.scope(["async"]);
        scope
            .check("never settles", never_settles(), Expectation::resolves())
            .expect("register");
        scope
            .check(
                "resolves with the wrong value",
                resolves_after(Duration::from_millis(1), Value::from(41)),
                Expectation::resolves_to(Expectation::Equal(Value::from(42))),
            )
            .expect("register");

        let report = run(&catalog, &options(50)).await;
        assert_eq!(report.results[0].outcome, Outcome::TimedOut { budget_ms: 50 });
        assert_eq!(
            report.results[1].outcome.failure_kind(),
            Some(FailureKind::AssertionMismatch)
        );
        assert_eq!(report.failed, 2);
        assert_eq!(report.timed_out, 1);
    }

    #[tokio::test]
    async fn rejection_matches_error_kind() {
        let mut catalog = Catalog::new();
        catalog
            .scope(["async"])
            .rejects(
                "rejects with a TypeError",
                || async { Err(Thrown::type_error("nope")) },
                ErrorKind::TypeError,
            )
            .expect("register");

        let report = run(&catalog, &options(100)).await;
        assert_eq!(report.passed, 1);
    }

    #[tokio::test]
    async fn filter_limits_the_run() {
        let mut catalog = Catalog::new();
        catalog.scope(["a"]).equal("one", || 1, 1).expect("register");
        catalog.scope(["b"]).equal("two", || 2, 2).expect("register");

        let opts = RunOptions {
            filter: Some(GroupPath::from(["b"])),
            ..options(100)
        };
        let report = run(&catalog, &opts).await;
        assert_eq!(report.total, 1);
        assert_eq!(report.results[0].description, "two");
    }
}
