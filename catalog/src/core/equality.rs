//! Equality policies used by expectations.

use std::sync::Arc;

use crate::core::value::Value;

/// `===`: NaN never equals itself, `+0` equals `-0`, composites by identity.
pub fn strict_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a == b,
        _ => primitive_or_identity(left, right),
    }
}

/// `Object.is`: NaN equals itself, `+0` differs from `-0`, composites by identity.
pub fn same_value(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => same_value_number(*a, *b),
        _ => primitive_or_identity(left, right),
    }
}

/// Recursive structural comparison.
///
/// Leaves compare with same-value-zero, so NaN matches NaN and the sign of
/// zero is ignored.
pub fn deep_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| deep_equals(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, value)| {
                    b.get(key)
                        .is_some_and(|other| deep_equals(value, other))
                })
        }
        (Value::RegExp(a), Value::RegExp(b)) => a == b,
        _ => primitive_or_identity(left, right),
    }
}

fn same_value_number(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    a == b && a.is_sign_negative() == b.is_sign_negative()
}

fn primitive_or_identity(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
        (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
        (Value::RegExp(a), Value::RegExp(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}
