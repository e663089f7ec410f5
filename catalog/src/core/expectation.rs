//! Expected outcomes and their evaluation against a completion.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::{Completion, ErrorKind, Thrown};
use crate::core::equality::{deep_equals, same_value, strict_equals};
use crate::core::types::{Failure, FailureKind};
use crate::core::value::Value;

/// Which thrown values satisfy an error expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMatch {
    Any,
    Kind(ErrorKind),
}

impl fmt::Display for ErrorMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorMatch::Any => f.write_str("any thrown value"),
            ErrorMatch::Kind(kind) => write!(f, "{kind}"),
        }
    }
}

impl From<ErrorKind> for ErrorMatch {
    fn from(kind: ErrorKind) -> Self {
        ErrorMatch::Kind(kind)
    }
}

#[derive(Debug, Clone)]
pub enum Expectation {
    Equal(Value),
    SameValue(Value),
    DeepEqual(Value),
    Throws(ErrorMatch),
    /// The future settles with a value; optionally checked by a nested value expectation.
    Resolves(Option<Box<Expectation>>),
    Rejects(ErrorMatch),
}

/// Stable labels for expectation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectationKind {
    #[serde(rename = "exact-value-equality")]
    ExactValueEquality,
    #[serde(rename = "same-value-equality")]
    SameValueEquality,
    #[serde(rename = "deep-structural-equality")]
    DeepStructuralEquality,
    #[serde(rename = "error-kind-match")]
    ErrorKindMatch,
    #[serde(rename = "async-resolves")]
    AsyncResolves,
    #[serde(rename = "async-rejects")]
    AsyncRejects,
}

impl fmt::Display for ExpectationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExpectationKind::ExactValueEquality => "exact-value-equality",
            ExpectationKind::SameValueEquality => "same-value-equality",
            ExpectationKind::DeepStructuralEquality => "deep-structural-equality",
            ExpectationKind::ErrorKindMatch => "error-kind-match",
            ExpectationKind::AsyncResolves => "async-resolves",
            ExpectationKind::AsyncRejects => "async-rejects",
        };
        f.write_str(label)
    }
}

impl Expectation {
    pub fn throws(kind: ErrorKind) -> Self {
        Expectation::Throws(ErrorMatch::Kind(kind))
    }

    pub fn throws_any() -> Self {
        Expectation::Throws(ErrorMatch::Any)
    }

    pub fn resolves() -> Self {
        Expectation::Resolves(None)
    }

    pub fn resolves_to(check: Expectation) -> Self {
        Expectation::Resolves(Some(Box::new(check)))
    }

    pub fn rejects() -> Self {
        Expectation::Rejects(ErrorMatch::Any)
    }

    pub fn kind(&self) -> ExpectationKind {
        match self {
            Expectation::Equal(_) => ExpectationKind::ExactValueEquality,
            Expectation::SameValue(_) => ExpectationKind::SameValueEquality,
            Expectation::DeepEqual(_) => ExpectationKind::DeepStructuralEquality,
            Expectation::Throws(_) => ExpectationKind::ErrorKindMatch,
            Expectation::Resolves(_) => ExpectationKind::AsyncResolves,
            Expectation::Rejects(_) => ExpectationKind::AsyncRejects,
        }
    }

    pub fn is_async(&self) -> bool {
        matches!(self, Expectation::Resolves(_) | Expectation::Rejects(_))
    }

    /// True for the three value comparisons.
    pub fn is_value_check(&self) -> bool {
        matches!(
            self,
            Expectation::Equal(_) | Expectation::SameValue(_) | Expectation::DeepEqual(_)
        )
    }
}

/// Judge a completion against an expectation.
pub fn evaluate(expectation: &Expectation, completion: &Completion) -> Result<(), Failure> {
    match expectation {
        Expectation::Equal(_) | Expectation::SameValue(_) | Expectation::DeepEqual(_) => {
            match completion {
                Ok(actual) => compare(expectation, actual),
                Err(thrown) => Err(Failure::new(
                    FailureKind::UnexpectedThrow,
                    format!("expected a value, but threw {thrown}"),
                )),
            }
        }
        Expectation::Throws(matcher) => match completion {
            Ok(actual) => Err(Failure::new(
                FailureKind::MissingThrow,
                format!("expected {matcher} to be thrown, but returned {actual}"),
            )),
            Err(thrown) => match_error(*matcher, thrown),
        },
        Expectation::Resolves(check) => match completion {
            Ok(actual) => match check {
                Some(check) => compare(check, actual),
                None => Ok(()),
            },
            Err(thrown) => Err(Failure::new(
                FailureKind::UnexpectedThrow,
                format!("expected to resolve, but rejected with {thrown}"),
            )),
        },
        Expectation::Rejects(matcher) => match completion {
            Ok(actual) => Err(Failure::new(
                FailureKind::MissingThrow,
                format!("expected a rejection with {matcher}, but resolved with {actual}"),
            )),
            Err(thrown) => match_error(*matcher, thrown),
        },
    }
}

fn compare(expectation: &Expectation, actual: &Value) -> Result<(), Failure> {
    let (expected, equal, relation) = match expectation {
        Expectation::Equal(expected) => (expected, strict_equals(expected, actual), "==="),
        Expectation::SameValue(expected) => (expected, same_value(expected, actual), "Object.is"),
        Expectation::DeepEqual(expected) => (expected, deep_equals(expected, actual), "deep equal"),
        other => {
            return Err(Failure::new(
                FailureKind::AssertionMismatch,
                format!("{} cannot compare a resolved value", other.kind()),
            ));
        }
    };
    if equal {
        return Ok(());
    }
    Err(Failure::new(
        FailureKind::AssertionMismatch,
        format!("expected {expected} ({relation}), actual {actual}"),
    ))
}

fn match_error(matcher: ErrorMatch, thrown: &Thrown) -> Result<(), Failure> {
    let ErrorMatch::Kind(expected) = matcher else {
        return Ok(());
    };
    match thrown.kind() {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(Failure::new(
            FailureKind::WrongErrorKind,
            format!("expected {expected}, got {actual} ({thrown})"),
        )),
        None => Err(Failure::new(
            FailureKind::WrongErrorKind,
            format!("expected {expected}, got non-error value {thrown}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(result: Result<(), Failure>) -> Option<FailureKind> {
        result.err().map(|failure| failure.kind)
    }

    #[test]
    fn equal_passes_and_reports_mismatch() {
        let expectation = Expectation::Equal(Value::from(3));
        assert!(evaluate(&expectation, &Ok(Value::from(3))).is_ok());

        let failure = evaluate(&expectation, &Ok(Value::from(4))).expect_err("mismatch");
        assert_eq!(failure.kind, FailureKind::AssertionMismatch);
        assert!(failure.detail.contains("expected 3"));
        assert!(failure.detail.contains("actual 4"));
    }

    #[test]
    fn value_expectation_reports_unexpected_throw() {
        let expectation = Expectation::DeepEqual(Value::array([1]));
        let thrown = Err(Thrown::type_error("boom"));
        assert_eq!(
            kind_of(evaluate(&expectation, &thrown)),
            Some(FailureKind::UnexpectedThrow)
        );
    }

    #[test]
    fn throws_distinguishes_missing_and_wrong_kind() {
        let expectation = Expectation::throws(ErrorKind::RangeError);
        assert_eq!(
            kind_of(evaluate(&expectation, &Ok(Value::from("")))),
            Some(FailureKind::MissingThrow)
        );

        let failure = evaluate(&expectation, &Err(Thrown::type_error("nope"))).expect_err("kind");
        assert_eq!(failure.kind, FailureKind::WrongErrorKind);
        assert!(failure.detail.contains("RangeError"));
        assert!(failure.detail.contains("TypeError"));

        assert!(evaluate(&expectation, &Err(Thrown::range_error("count"))).is_ok());
    }

    #[test]
    fn throws_any_accepts_bare_values() {
        let expectation = Expectation::throws_any();
        assert!(evaluate(&expectation, &Err(Thrown::Value(Value::Undefined))).is_ok());
    }

    #[test]
    fn resolves_checks_nested_value() {
        let expectation = Expectation::resolves_to(Expectation::Equal(Value::from(42)));
        assert!(evaluate(&expectation, &Ok(Value::from(42))).is_ok());
        assert_eq!(
            kind_of(evaluate(&expectation, &Ok(Value::from(41)))),
            Some(FailureKind::AssertionMismatch)
        );
        assert_eq!(
            kind_of(evaluate(&expectation, &Err(Thrown::Value(Value::Undefined)))),
            Some(FailureKind::UnexpectedThrow)
        );
    }

    #[test]
    fn rejects_requires_rejection() {
        let expectation = Expectation::rejects();
        assert!(evaluate(&expectation, &Err(Thrown::Value(Value::Undefined))).is_ok());
        assert_eq!(
            kind_of(evaluate(&expectation, &Ok(Value::Undefined))),
            Some(FailureKind::MissingThrow)
        );
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(
            Expectation::SameValue(Value::Null).kind().to_string(),
            "same-value-equality"
        );
        assert_eq!(
            serde_json::to_string(&ExpectationKind::AsyncRejects).expect("json"),
            "\"async-rejects\""
        );
    }
}
