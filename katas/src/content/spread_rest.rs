use catalog::{Catalog, RegistrationError, Scope, Value};

use crate::js::coerce::max;

/// `(...args) => args`
fn collect(args: &[Value]) -> Value {
    Value::array(args.iter().cloned())
}

/// `[...text]`
fn spread_chars(text: &str) -> Vec<Value> {
    text.chars().map(Value::from).collect()
}

pub fn register(catalog: &mut Catalog) -> Result<(), RegistrationError> {
    let mut spread_rest = catalog.scope(["spread-rest"]);
    register_rest_parameters(&mut spread_rest.group("rest-parameters"))?;
    register_rest_destructuring(&mut spread_rest.group("rest-destructuring"))?;
    register_spread_arrays(&mut spread_rest.group("spread-arrays"))?;
    register_spread_strings(&mut spread_rest.group("spread-strings"))?;
    Ok(())
}

fn register_rest_parameters(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.deep_equal(
        "collects all parameters",
        || collect(&[Value::from(1), Value::from(2)]),
        Value::array([1, 2]),
    )?;
    scope.deep_equal(
        "collects the parameters after the named ones",
        || {
            let f = |args: &[Value]| collect(args.get(2..).unwrap_or_default());
            f(&[Value::Null, Value::from(2), Value::from(3), Value::from(4)])
        },
        Value::array([3, 4]),
    )?;
    scope.deep_equal(
        "is empty when there is nothing left",
        || {
            let f = |args: &[Value]| collect(args.get(2..).unwrap_or_default());
            f(&[Value::from(1)])
        },
        Value::array(Vec::<Value>::new()),
    )?;
    scope.deep_equal(
        "an array argument stays one parameter",
        || {
            let f = |args: &[Value]| args.first().cloned().unwrap_or(Value::Undefined);
            f(&[Value::array([Value::from(42), Value::from("twenty three"), Value::from("win")])])
        },
        Value::array([Value::from(42), Value::from("twenty three"), Value::from("win")]),
    )?;
    scope.deep_equal(
        "destructuring the collected parameters",
        || {
            let args = [Value::from(1), Value::from(2), Value::from(3)];
            let [_first, rest @ ..] = args;
            Value::array(rest)
        },
        Value::array([2, 3]),
    )?;
    Ok(())
}

fn register_rest_destructuring(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.deep_equal(
        "rest takes everything",
        || {
            let [all @ ..] = [1, 2, 3, 4];
            Value::array(all)
        },
        Value::array([1, 2, 3, 4]),
    )?;
    scope.deep_equal(
        "rest takes what is left",
        || {
            let [_, all @ ..] = [1, 2, 3, 4];
            Value::array(all)
        },
        Value::array([2, 3, 4]),
    )?;
    scope.deep_equal(
        "rest can sit in the middle of a slice pattern",
        || {
            let [first, middle @ .., last] = [1, 2, 3, 4];
            Value::array([Value::from(first), Value::array(middle), Value::from(last)])
        },
        Value::array([Value::from(1), Value::array([2, 3]), Value::from(4)]),
    )?;
    scope.deep_equal(
        "spread concatenates arrays",
        || {
            let the_end = [3, 4];
            Value::array([&[1, 2][..], &the_end[..]].concat())
        },
        Value::array([1, 2, 3, 4]),
    )?;
    Ok(())
}

fn register_spread_arrays(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.deep_equal(
        "extracts each array item",
        || {
            let [a, b] = [1, 2];
            Value::array([a, b])
        },
        Value::array([1, 2]),
    )?;
    scope.deep_equal(
        "combines with rest",
        || {
            let [_, a, b, rest @ ..] = [0, 1, 2, 3, 4, 5];
            Value::array([Value::from(a), Value::from(b), Value::array(rest)])
        },
        Value::array([Value::from(1), Value::from(2), Value::array([3, 4, 5])]),
    )?;
    scope.deep_equal(
        "spreads into the rest",
        || {
            let [rest @ ..] = [1, 2, 3, 4, 5];
            Value::array(rest)
        },
        Value::array([1, 2, 3, 4, 5]),
    )?;
    scope.deep_equal(
        "spreads into function parameters",
        || {
            let magic_numbers = [1, 2];
            let f = |magic_a: i32, magic_b: i32| Value::array([magic_a, magic_b]);
            let [a, b] = magic_numbers;
            f(a, b)
        },
        Value::array([1, 2]),
    )?;
    scope.equal(
        "passes an array of numbers to Math.max",
        || max(&[Value::from(23), Value::from(0), Value::from(42), Value::from(42)]),
        42,
    )?;
    Ok(())
}

fn register_spread_strings(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.deep_equal(
        "spreads each character of a string",
        || Value::from(spread_chars("ab")),
        Value::array(["a", "b"]),
    )?;
    scope.deep_equal(
        "digits stay strings",
        || Value::from(spread_chars("12")),
        Value::array(["1", "2"]),
    )?;
    scope.equal(
        "works anywhere inside an array",
        || {
            let mut letters = vec![Value::from("a")];
            letters.extend(spread_chars("bcd"));
            letters.extend([Value::from("e"), Value::from("f")]);
            letters.len()
        },
        6,
    )?;
    scope.deep_equal(
        "several strings spread into one array",
        || Value::from([spread_chars("1234"), spread_chars("5")].concat()),
        Value::array(["1", "2", "3", "4", "5"]),
    )?;
    scope.equal(
        "Math.max coerces spread characters",
        || max(&spread_chars("12345")),
        5,
    )?;
    Ok(())
}
