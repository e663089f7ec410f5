//! Run reports: per-demonstration results plus aggregate counts.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::expectation::ExpectationKind;
use crate::core::path::GroupPath;
use crate::core::types::Outcome;
use crate::exit_codes;

/// Result of one demonstration within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoResult {
    pub path: GroupPath,
    pub description: String,
    pub expectation: ExpectationKind,
    pub outcome: Outcome,
}

/// Aggregate outcome of one `run()`.
///
/// `failed` counts every demonstration that did not pass, timeouts included;
/// `timed_out` is the subset that did not settle in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub results: Vec<DemoResult>,
}

impl RunReport {
    pub fn from_results(results: Vec<DemoResult>) -> Self {
        let mut report = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in &results {
            match result.outcome {
                Outcome::Passed => report.passed += 1,
                Outcome::Failed(_) => report.failed += 1,
                Outcome::TimedOut { .. } => {
                    report.failed += 1;
                    report.timed_out += 1;
                }
            }
        }
        report.results = results;
        report
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// `0` when everything passed, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            exit_codes::OK
        } else {
            exit_codes::FAILED
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &DemoResult> {
        self.results.iter().filter(|result| !result.outcome.passed())
    }

    /// Human-readable report. Failing demonstrations always list path,
    /// description, failure kind and detail; passing ones only when `verbose`.
    pub fn render_text(&self, verbose: bool) -> String {
        let mut out = String::new();
        for result in &self.results {
            let Some(kind) = result.outcome.failure_kind() else {
                if verbose {
                    let _ = writeln!(out, "ok   {} > {}", result.path, result.description);
                }
                continue;
            };
            let _ = writeln!(out, "FAIL {} > {}", result.path, result.description);
            let _ = writeln!(out, "     {} [{}]", kind, result.expectation);
            if let Some(detail) = result.outcome.detail() {
                let _ = writeln!(out, "     {detail}");
            }
        }
        let _ = writeln!(
            out,
            "total={} passed={} failed={} timed_out={}",
            self.total, self.passed, self.failed, self.timed_out
        );
        out
    }

    pub fn render_json(&self) -> Result<String> {
        let mut contents = serde_json::to_string_pretty(self).context("serialize report")?;
        contents.push('\n');
        Ok(contents)
    }
}
