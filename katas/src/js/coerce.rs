//! Implicit conversions: to-string, to-number and to-integer.

use catalog::Value;
use catalog::core::value::format_number;

/// Values that convert themselves before a string or number is needed.
///
/// Plain values convert to themselves; kata types with a custom `toString`
/// implement this to hand back whatever their `toString` returns.
pub trait ToPrimitive {
    fn to_primitive(&self) -> Value;
}

impl ToPrimitive for Value {
    fn to_primitive(&self) -> Value {
        self.clone()
    }
}

/// `String(value)`.
pub fn string(value: &dyn ToPrimitive) -> String {
    to_string(&value.to_primitive())
}

pub fn to_string(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        // `String(-0)` is "0".
        Value::Number(n) if *n == 0.0 => "0".to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Undefined | Value::Null => String::new(),
                other => to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        Value::RegExp(pattern) => format!("/{pattern}/"),
    }
}

pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => *n,
        Value::String(s) => string_to_number(s),
        Value::Array(_) => string_to_number(&to_string(value)),
        Value::Object(_) | Value::RegExp(_) => f64::NAN,
    }
}

/// `ToIntegerOrInfinity`: NaN becomes 0, fractions truncate toward zero.
pub fn to_integer_or_infinity(value: &Value) -> f64 {
    let n = to_number(value);
    if n.is_nan() || n == 0.0 {
        0.0
    } else if n.is_infinite() {
        n
    } else {
        n.trunc() + 0.0
    }
}

/// `Number.isInteger`: no coercion, so `"0"` is not an integer.
pub fn is_integer(value: &Value) -> bool {
    matches!(value, Value::Number(n) if n.is_finite() && n.trunc() == *n)
}

/// `parseInt(text)` in base 10 (or 16 with a `0x` prefix): the longest
/// leading run of digits, NaN when there is none.
pub fn parse_int(text: &str) -> f64 {
    let text = text.trim_start();
    let (sign, rest) = match text.as_bytes().first() {
        Some(b'-') => (-1.0, &text[1..]),
        Some(b'+') => (1.0, &text[1..]),
        _ => (1.0, text),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let mut value: Option<f64> = None;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        value = Some(value.unwrap_or(0.0) * f64::from(radix) + f64::from(digit));
    }
    value.map_or(f64::NAN, |n| sign * n)
}

/// `Math.max(...values)`.
pub fn max(values: &[Value]) -> f64 {
    values
        .iter()
        .map(to_number)
        .try_fold(f64::NEG_INFINITY, |acc, n| {
            if n.is_nan() { None } else { Some(acc.max(n)) }
        })
        .unwrap_or(f64::NAN)
}

fn string_to_number(text: &str) -> f64 {
    let text = text.trim();
    match text {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
    }
    // Rust also accepts "inf" and "nan" spellings, the source language does not.
    let numeric = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !numeric {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_follow_the_source_rules() {
        assert_eq!(to_string(&Value::from(-0.0)), "0");
        assert_eq!(to_string(&Value::from(1984)), "1984");
        assert_eq!(
            to_string(&Value::array([Value::from(1), Value::Null, Value::from("x")])),
            "1,,x"
        );
        assert_eq!(to_string(&Value::object([("a", 1)])), "[object Object]");
        assert_eq!(to_string(&Value::Undefined), "undefined");
    }

    #[test]
    fn numbers_from_strings() {
        assert_eq!(to_number(&Value::from(" 42 ")), 42.0);
        assert_eq!(to_number(&Value::from("")), 0.0);
        assert_eq!(to_number(&Value::from("+Infinity")), f64::INFINITY);
        assert_eq!(to_number(&Value::from("0x10")), 16.0);
        assert!(to_number(&Value::from("inf")).is_nan());
        assert!(to_number(&Value::from("12px")).is_nan());
        assert_eq!(to_number(&Value::array([7])), 7.0);
    }

    #[test]
    fn integers_truncate_and_default_nan_to_zero() {
        assert_eq!(to_integer_or_infinity(&Value::from(f64::NAN)), 0.0);
        assert_eq!(to_integer_or_infinity(&Value::from(-2.7)), -2.0);
        assert_eq!(to_integer_or_infinity(&Value::from("3")), 3.0);
        assert_eq!(to_integer_or_infinity(&Value::Undefined), 0.0);
        assert!(to_integer_or_infinity(&Value::from(-0.4)).is_sign_positive());
    }

    #[test]
    fn parse_int_reads_a_digit_prefix() {
        assert_eq!(parse_int("1.01"), 1.0);
        assert_eq!(parse_int("  -12abc"), -12.0);
        assert_eq!(parse_int("0x1f"), 31.0);
        assert!(parse_int("abc").is_nan());
    }

    #[test]
    fn max_coerces_and_propagates_nan() {
        let chars: Vec<Value> = "12345".chars().map(Value::from).collect();
        assert_eq!(max(&chars), 5.0);
        assert_eq!(max(&[]), f64::NEG_INFINITY);
        assert!(max(&[Value::from(1), Value::from("x")]).is_nan());
    }
}
