//! Example catalog runner.
//!
//! A catalog holds named demonstrations: an action paired with the outcome it
//! is expected to produce (a value, a thrown error kind, or an async
//! resolution/rejection). Running the catalog executes each demonstration
//! once, in registration order, and collects a report.
//!
//! - **[`core`]**: Pure, deterministic logic (values, equality, expectations,
//!   group paths, selection, registration invariants). No I/O.
//! - **[`io`]**: Side-effecting helpers (configuration files).
//!
//! [`catalog`] is the registration surface, [`run`] executes a catalog and
//! [`report`] aggregates the outcome.

pub mod action;
pub mod catalog;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod report;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod tree;

pub use crate::action::{Action, Completion, ErrorKind, Thrown};
pub use crate::catalog::{Catalog, RegistrationError, Scope};
pub use crate::core::expectation::{ErrorMatch, Expectation, ExpectationKind};
pub use crate::core::path::GroupPath;
pub use crate::core::types::{Failure, FailureKind, Outcome};
pub use crate::core::value::Value;
pub use crate::report::{DemoResult, RunReport};
pub use crate::run::{RunOptions, run};
