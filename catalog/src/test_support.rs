//! Test-only helpers for building catalogs and demonstrations.

use std::time::Duration;

use crate::action::{Action, Completion};
use crate::core::expectation::Expectation;
use crate::core::path::GroupPath;
use crate::core::value::Value;
use crate::tree::{Demonstration, Group};

/// Create a passing demonstration (`1 === 1`) under `path`.
pub fn demo(path: &GroupPath, description: &str) -> Demonstration {
    Demonstration {
        path: path.clone(),
        description: description.to_string(),
        action: Action::value(|| 1),
        expectation: Expectation::Equal(Value::from(1)),
    }
}

/// Build a group tree from `(segments, description)` pairs in order.
pub fn group_with(entries: &[(&[&str], &str)]) -> Group {
    let mut root = Group::default();
    for (segments, description) in entries {
        let path = GroupPath::new(segments.iter().copied());
        root.group_mut(path.segments()).push(demo(&path, description));
    }
    root
}

/// Async action that settles with `value` after `delay`.
pub fn resolves_after(delay: Duration, value: Value) -> Action {
    Action::future(move || {
        let value = value.clone();
        async move {
            tokio::time::sleep(delay).await;
            Ok(value)
        }
    })
}

/// Async action that never settles.
pub fn never_settles() -> Action {
    Action::future(futures::future::pending::<Completion>)
}
