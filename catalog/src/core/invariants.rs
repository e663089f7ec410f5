//! Registration invariants checked before a demonstration enters the catalog.

use crate::action::Action;
use crate::core::expectation::Expectation;
use crate::core::path::GroupPath;

/// Check a prospective demonstration:
/// - Group segments are non-empty, trimmed and free of `/`
/// - Description is non-empty
/// - Sync actions carry sync expectations, async actions async ones
/// - `Resolves` only wraps a value comparison
pub fn validate_registration(
    path: &GroupPath,
    description: &str,
    action: &Action,
    expectation: &Expectation,
) -> Vec<String> {
    let mut errors = Vec::new();

    if path.is_root() {
        errors.push("group path must have at least one segment".to_string());
    }
    for segment in path.segments() {
        if segment.trim().is_empty() {
            errors.push("group segment must be non-empty".to_string());
        } else if segment.trim() != segment {
            errors.push(format!("group segment {segment:?} has surrounding whitespace"));
        }
        if segment.contains('/') {
            errors.push(format!("group segment {segment:?} must not contain '/'"));
        }
    }

    if description.trim().is_empty() {
        errors.push("description must be non-empty".to_string());
    }

    match (action.is_async(), expectation.is_async()) {
        (false, true) => errors.push(format!(
            "{} requires an async action",
            expectation.kind()
        )),
        (true, false) => errors.push(format!(
            "{} requires a sync action",
            expectation.kind()
        )),
        _ => {}
    }

    if let Expectation::Resolves(Some(check)) = expectation
        && !check.is_value_check()
    {
        errors.push(format!(
            "async-resolves cannot wrap {}",
            check.kind()
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ErrorKind;
    use crate::core::value::Value;

    fn path() -> GroupPath {
        GroupPath::from(["strings"])
    }

    #[test]
    fn accepts_well_formed_registration() {
        let errors = validate_registration(
            &path(),
            "adds 1+2",
            &Action::value(|| 3),
            &Expectation::Equal(Value::from(3)),
        );
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn reports_bad_path_and_description() {
        let errors = validate_registration(
            &GroupPath::from(["a/b", " "]),
            "  ",
            &Action::value(|| 3),
            &Expectation::Equal(Value::from(3)),
        );
        assert!(errors.iter().any(|err| err.contains("must not contain '/'")));
        assert!(errors.iter().any(|err| err.contains("must be non-empty")));
        assert!(errors.iter().any(|err| err.contains("description")));
    }

    #[test]
    fn rejects_root_group() {
        let errors = validate_registration(
            &GroupPath::root(),
            "orphan",
            &Action::value(|| 3),
            &Expectation::Equal(Value::from(3)),
        );
        assert!(errors.iter().any(|err| err.contains("at least one segment")));
    }

    #[test]
    fn rejects_mismatched_action_kind() {
        let errors = validate_registration(
            &path(),
            "sync resolves",
            &Action::value(|| 3),
            &Expectation::resolves(),
        );
        assert!(errors.iter().any(|err| err.contains("requires an async action")));

        let errors = validate_registration(
            &path(),
            "async equal",
            &Action::future(|| async { Ok(Value::from(1)) }),
            &Expectation::Equal(Value::from(1)),
        );
        assert!(errors.iter().any(|err| err.contains("requires a sync action")));
    }

    #[test]
    fn rejects_resolves_wrapping_error_check() {
        let errors = validate_registration(
            &path(),
            "nested throws",
            &Action::future(|| async { Ok(Value::from(1)) }),
            &Expectation::resolves_to(Expectation::throws(ErrorKind::TypeError)),
        );
        assert!(errors.iter().any(|err| err.contains("cannot wrap error-kind-match")));
    }
}
