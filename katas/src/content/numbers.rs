use catalog::core::equality::{same_value, strict_equals};
use catalog::{Catalog, RegistrationError, Value};

use crate::js::coerce::{is_integer, parse_int};

/// `Number.isInteger(value)` and what it should say.
const IS_INTEGER: &[(&str, fn() -> Value, bool)] = &[
    ("0 is an integer", || Value::from(0), true),
    ("0.000 is an integer", || Value::from(0.000), true),
    ("the string \"0\" is not an integer", || Value::from("0"), false),
    ("0.111 + 0.889 is an integer", || Value::from(0.111 + 0.889), true),
    (
        "0.5 + 0.2 + 0.2 + 0.1 is not quite one",
        || Value::from(0.5 + 0.2 + 0.2 + 0.1),
        false,
    ),
    (
        "parseInt of \"1.01\" is an integer",
        || Value::from(parse_int("1.01")),
        true,
    ),
    // `Number()` with no argument is 0.
    ("Number() is an integer", || Value::from(0.0), true),
    (
        "an empty object is not an integer",
        || Value::object(Vec::<(String, Value)>::new()),
        false,
    ),
    ("0.1 is not an integer", || Value::from(0.1), false),
    ("Infinity is not an integer", || Value::from(f64::INFINITY), false),
    ("NaN is not an integer", || Value::from(f64::NAN), false),
];

fn divide(a: f64, b: f64) -> f64 {
    a / b
}

fn empty_object() -> Value {
    Value::object(Vec::<(String, Value)>::new())
}

pub fn register(catalog: &mut Catalog) -> Result<(), RegistrationError> {
    let mut numbers = catalog.scope(["numbers"]);

    let mut scope = numbers.group("isInteger");
    for &(description, value, expected) in IS_INTEGER {
        scope.equal(description, move || is_integer(&value()), expected)?;
    }

    let mut scope = numbers.group("Object.is");
    scope.equal(
        "1 is the same as 1",
        || same_value(&Value::from(1), &Value::from(1)),
        true,
    )?;
    scope.equal(
        "the number 1 is different from the string \"1\"",
        || same_value(&Value::from(1), &Value::from("1")),
        false,
    )?;
    scope.equal(
        "strings just have to match",
        || same_value(&Value::from("one"), &Value::from("one")),
        true,
    )?;
    scope.equal(
        "+0 is not the same as -0",
        || same_value(&Value::from(0.0), &Value::from(-0.0)),
        false,
    )?;
    scope.same_value("NaN is the same as NaN", || f64::NAN, f64::NAN)?;
    scope.same_value("NaN is the same as 0/0", || divide(0.0, 0.0), f64::NAN)?;
    scope.deep_equal(
        "=== says +0 and -0 are equal, Object.is disagrees",
        || {
            let (pos, neg) = (Value::from(0.0), Value::from(-0.0));
            Value::array([strict_equals(&pos, &neg), same_value(&pos, &neg)])
        },
        Value::array([true, false]),
    )?;
    scope.deep_equal(
        "=== says NaN is not NaN, Object.is disagrees",
        || {
            let nan = Value::from(f64::NAN);
            Value::array([strict_equals(&nan, &nan), same_value(&nan, &nan)])
        },
        Value::array([false, true]),
    )?;
    scope.equal(
        "the empty string and false are not the same",
        || same_value(&Value::from(""), &Value::from(false)),
        false,
    )?;
    scope.equal(
        "two empty objects are not the same",
        || same_value(&empty_object(), &empty_object()),
        false,
    )?;
    scope.equal(
        "two maps with the same entry are not the same",
        || {
            let map1 = Value::object([("1", "one")]);
            let map2 = Value::object([("1", "one")]);
            same_value(&map1, &map2)
        },
        false,
    )?;
    scope.equal(
        "an object is the same as itself",
        || {
            let obj = empty_object();
            same_value(&obj, &obj.clone())
        },
        true,
    )?;
    scope.equal("+0 === -0", || -0.0, 0.0)?;
    Ok(())
}
