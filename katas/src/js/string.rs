//! `String.prototype` search and repeat built-ins.
//!
//! Receivers and search strings are coerced to strings, positions to
//! integers, and all indexing is in UTF-16 code units.

use catalog::core::value::format_number;
use catalog::{Completion, Thrown, Value};

use crate::js::coerce::{ToPrimitive, to_integer_or_infinity, to_string};

/// Longest string the source runtime will build.
const MAX_STRING_LENGTH: usize = (1 << 29) - 24;

/// `receiver.includes(search, position)`.
pub fn includes(receiver: &Value, search: &dyn ToPrimitive, position: &Value) -> Completion {
    let text = this_string(receiver, "includes")?;
    let search = search_string(search, "includes")?;
    let start = clamp_position(position, text.len());
    Ok(Value::Bool(contains(&text[start..], &search)))
}

/// `receiver.startsWith(search, position)`.
pub fn starts_with(receiver: &Value, search: &dyn ToPrimitive, position: &Value) -> Completion {
    let text = this_string(receiver, "startsWith")?;
    let search = search_string(search, "startsWith")?;
    let start = clamp_position(position, text.len());
    Ok(Value::Bool(text[start..].starts_with(&search)))
}

/// `receiver.endsWith(search, end_position)`; an undefined end means the whole string.
pub fn ends_with(receiver: &Value, search: &dyn ToPrimitive, end_position: &Value) -> Completion {
    let text = this_string(receiver, "endsWith")?;
    let search = search_string(search, "endsWith")?;
    let end = match end_position {
        Value::Undefined => text.len(),
        position => clamp_position(position, text.len()),
    };
    Ok(Value::Bool(text[..end].ends_with(&search)))
}

/// `receiver.repeat(count)`.
pub fn repeat(receiver: &Value, count: &Value) -> Completion {
    let text = this_string(receiver, "repeat")?;
    let n = to_integer_or_infinity(count);
    if n < 0.0 || n.is_infinite() {
        return Err(Thrown::range_error(format!(
            "Invalid count value: {}",
            format_number(n)
        )));
    }
    let n = n as usize;
    if n == 0 || text.is_empty() {
        return Ok(Value::from(""));
    }
    if text.len().saturating_mul(n) > MAX_STRING_LENGTH {
        return Err(Thrown::range_error("Invalid string length"));
    }
    Ok(Value::from(String::from_utf16_lossy(&text).repeat(n)))
}

fn this_string(receiver: &Value, method: &str) -> Result<Vec<u16>, Thrown> {
    if matches!(receiver, Value::Undefined | Value::Null) {
        return Err(Thrown::type_error(format!(
            "String.prototype.{method} called on null or undefined"
        )));
    }
    Ok(to_string(receiver).encode_utf16().collect())
}

fn search_string(search: &dyn ToPrimitive, method: &str) -> Result<Vec<u16>, Thrown> {
    let search = search.to_primitive();
    if matches!(search, Value::RegExp(_)) {
        return Err(Thrown::type_error(format!(
            "First argument to String.prototype.{method} must not be a regular expression"
        )));
    }
    Ok(to_string(&search).encode_utf16().collect())
}

fn clamp_position(position: &Value, len: usize) -> usize {
    to_integer_or_infinity(position).clamp(0.0, len as f64) as usize
}

fn contains(haystack: &[u16], needle: &[u16]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::ErrorKind;

    fn s(text: &str) -> Value {
        Value::from(text)
    }

    #[test]
    fn includes_coerces_search_and_position() {
        let abc = s("abc");
        assert!(matches!(includes(&abc, &Value::Undefined, &Value::Undefined), Ok(Value::Bool(false))));
        assert!(matches!(includes(&s("123"), &Value::array([1]), &Value::Undefined), Ok(Value::Bool(true))));
        assert!(matches!(includes(&abc, &s("a"), &Value::from(2)), Ok(Value::Bool(false))));
        assert!(matches!(includes(&abc, &s("a"), &Value::from(f64::NAN)), Ok(Value::Bool(true))));
        assert!(matches!(includes(&s(""), &s(""), &Value::from(5)), Ok(Value::Bool(true))));
    }

    #[test]
    fn regexp_search_is_a_type_error() {
        let err = starts_with(&s(""), &Value::regexp("&$"), &Value::Undefined)
            .expect_err("regexp");
        assert_eq!(err.kind(), Some(ErrorKind::TypeError));
        let err = includes(&s(""), &Value::regexp("$%"), &Value::Undefined).expect_err("regexp");
        assert_eq!(err.kind(), Some(ErrorKind::TypeError));
    }

    #[test]
    fn ends_with_limits_the_length() {
        let fin = s("el fin");
        assert!(matches!(ends_with(&fin, &s("el"), &Value::from(2)), Ok(Value::Bool(true))));
        assert!(matches!(ends_with(&fin, &s("fi"), &s("5")), Ok(Value::Bool(true))));
        assert!(matches!(ends_with(&s("1"), &s(""), &Value::from(-1)), Ok(Value::Bool(true))));
        assert!(matches!(ends_with(&s("1"), &s("lol"), &Value::from(-1)), Ok(Value::Bool(false))));
    }

    #[test]
    fn positions_count_utf16_units() {
        let text = s("a\u{1F600}b");
        assert!(matches!(starts_with(&text, &s("b"), &Value::from(3)), Ok(Value::Bool(true))));
    }

    #[test]
    fn repeat_validates_the_count() {
        assert!(matches!(repeat(&s("x"), &Value::from(3)), Ok(Value::String(ref r)) if r == "xxx"));
        assert!(matches!(repeat(&Value::from(false), &Value::from(2)), Ok(Value::String(ref r)) if r == "falsefalse"));
        let err = repeat(&s(""), &Value::from(-1)).expect_err("negative");
        assert_eq!(err.to_string(), "RangeError: Invalid count value: -1");
        let err = repeat(&s(""), &s("+Infinity")).expect_err("infinite");
        assert_eq!(err.kind(), Some(ErrorKind::RangeError));
        let err = repeat(&s("ab"), &Value::from(1e12)).expect_err("too long");
        assert_eq!(err.to_string(), "RangeError: Invalid string length");
        let err = repeat(&Value::Null, &Value::from(1)).expect_err("null receiver");
        assert_eq!(err.kind(), Some(ErrorKind::TypeError));
    }
}
