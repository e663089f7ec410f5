//! Just enough of the source language's runtime for the katas to be honest.
//!
//! Demonstrations exercise these helpers instead of hard-coding answers, so a
//! kata that claims `'123'.includes([1])` is `true` actually coerces an array
//! to a string and searches UTF-16 code units.

pub mod class;
pub mod coerce;
pub mod object;
pub mod promise;
pub mod scope;
pub mod string;
pub mod template;

use catalog::Value;

/// Default parameters and destructuring defaults apply to `undefined` only.
pub fn default_if_undefined(value: Value, default: impl Into<Value>) -> Value {
    match value {
        Value::Undefined => default.into(),
        value => value,
    }
}
