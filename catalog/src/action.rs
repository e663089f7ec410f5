//! Operations under test and what they can throw.

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::core::value::Value;

/// Built-in error constructors a demonstration can throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Error,
    TypeError,
    RangeError,
    ReferenceError,
    SyntaxError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Error => "Error",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::SyntaxError => "SyntaxError",
        };
        f.write_str(name)
    }
}

/// Something thrown by a sync action or carried by a rejection.
#[derive(Debug, Clone)]
pub enum Thrown {
    /// An error object, e.g. `new RangeError("Invalid count value")`.
    Error { kind: ErrorKind, message: String },
    /// Any other value, e.g. `Promise.reject()` rejects with `undefined`.
    Value(Value),
}

impl Thrown {
    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Thrown::Error {
            kind,
            message: message.into(),
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::error(ErrorKind::TypeError, message)
    }

    pub fn range_error(message: impl Into<String>) -> Self {
        Self::error(ErrorKind::RangeError, message)
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Thrown::Error { kind, .. } => Some(*kind),
            Thrown::Value(_) => None,
        }
    }
}

impl fmt::Display for Thrown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thrown::Error { kind, message } if message.is_empty() => write!(f, "{kind}"),
            Thrown::Error { kind, message } => write!(f, "{kind}: {message}"),
            Thrown::Value(value) => write!(f, "{value}"),
        }
    }
}

/// Either the value an action produced or what it threw.
pub type Completion = Result<Value, Thrown>;

type SyncFn = dyn Fn() -> Completion + Send + Sync;
type AsyncFn = dyn Fn() -> BoxFuture<'static, Completion> + Send + Sync;

/// Zero-argument operation under test. Re-invocable, so every run starts fresh.
pub enum Action {
    Sync(Box<SyncFn>),
    Async(Box<AsyncFn>),
}

impl Action {
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn() -> Completion + Send + Sync + 'static,
    {
        Action::Sync(Box::new(f))
    }

    /// Action that always completes with a value.
    pub fn value<F, V>(f: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Action::Sync(Box::new(move || Ok(f().into())))
    }

    pub fn future<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Completion> + Send + 'static,
    {
        Action::Async(Box::new(move || Box::pin(f())))
    }

    pub fn is_async(&self) -> bool {
        matches!(self, Action::Async(_))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Sync(_) => f.write_str("Action::Sync"),
            Action::Async(_) => f.write_str("Action::Async"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thrown_renders_kind_and_message() {
        let thrown = Thrown::range_error("Invalid count value: -1");
        assert_eq!(thrown.to_string(), "RangeError: Invalid count value: -1");
        assert_eq!(thrown.kind(), Some(ErrorKind::RangeError));

        let bare = Thrown::Value(Value::Undefined);
        assert_eq!(bare.to_string(), "undefined");
        assert_eq!(bare.kind(), None);
    }

    #[test]
    fn value_action_wraps_result() {
        let action = Action::value(|| 1 + 2);
        assert!(!action.is_async());
        match action {
            Action::Sync(f) => assert!(matches!(f(), Ok(Value::Number(n)) if n == 3.0)),
            Action::Async(_) => panic!("expected sync action"),
        }
    }
}
