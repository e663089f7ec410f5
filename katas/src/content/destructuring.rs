use catalog::{Catalog, RegistrationError, Scope, Value};

use crate::js::default_if_undefined;

/// `array[index]`, `undefined` past the end.
fn at(value: &Value, index: usize) -> Value {
    value
        .as_array()
        .and_then(|items| items.get(index))
        .cloned()
        .unwrap_or(Value::Undefined)
}

/// Destructuring a string yields one-character strings.
fn chars(text: &str) -> Value {
    Value::array(text.chars())
}

pub fn register(catalog: &mut Catalog) -> Result<(), RegistrationError> {
    let mut destructuring = catalog.scope(["destructuring"]);
    register_arrays(&mut destructuring.group("arrays"))?;
    register_strings(&mut destructuring.group("strings"))?;
    register_objects(&mut destructuring.group("objects"))?;
    register_defaults(&mut destructuring.group("defaults"))?;
    register_parameters(&mut destructuring.group("parameters"))?;
    register_renaming(&mut destructuring.group("renaming"))?;
    Ok(())
}

fn register_arrays(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.equal(
        "extracts the first value",
        || {
            let [first_value] = [1];
            first_value
        },
        1,
    )?;
    scope.deep_equal(
        "swaps two variables in one assignment",
        || {
            let (mut x, mut y) = ("ax", "why");
            (x, y) = (y, x);
            Value::array([x, y])
        },
        Value::array(["why", "ax"]),
    )?;
    scope.equal(
        "skips leading values",
        || {
            let all = ["ax", "why", "zet"];
            let [_, _, z] = all;
            z
        },
        "zet",
    )?;
    scope.equal(
        "extracts from nested arrays",
        || {
            let user = (["Some", "One"], 23);
            let ([first_name, surname], age) = user;
            format!("{first_name} {surname} = {age} years")
        },
        "Some One = 23 years",
    )?;
    scope.deep_equal(
        "chained assignments",
        || {
            let [c, d] = [1, 2];
            let [a, b] = [c, d];
            Value::array([a, b, c, d])
        },
        Value::array([1, 2, 1, 2]),
    )?;
    scope.deep_equal(
        "works in a for-of loop",
        || {
            let mut last = Value::Undefined;
            for [_, a, b] in [[0, 1, 2]] {
                last = Value::array([a, b]);
            }
            last
        },
        Value::array([1, 2]),
    )?;
    Ok(())
}

fn register_strings(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.deep_equal(
        "destructures every character",
        || {
            let abc = chars("abc");
            Value::array([at(&abc, 0), at(&abc, 1), at(&abc, 2)])
        },
        Value::array(["a", "b", "c"]),
    )?;
    scope.equal(
        "missing characters are undefined",
        || at(&chars("a"), 1),
        Value::Undefined,
    )?;
    scope.equal(
        "unicode characters work too",
        || at(&chars("a☕"), 1),
        '\u{2615}',
    )?;
    Ok(())
}

fn register_objects(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.equal(
        "is simple",
        || Value::object([("x", 1)]).get("x"),
        1,
    )?;
    scope.equal(
        "reaches into nested objects",
        || {
            let magic = Value::object([("first", 23), ("second", 42)]);
            let outer = Value::object([("magic", magic)]);
            outer.get("magic").get("second")
        },
        42,
    )?;
    scope.equal(
        "reaches into an array inside an object",
        || {
            let obj = Value::object([("z", Value::array([23, 42]))]);
            at(&obj.get("z"), 1)
        },
        42,
    )?;
    scope.equal(
        "reaches into an object inside an array",
        || {
            let env = Value::object([("env", "browser"), ("lang", "ES6")]);
            let data = Value::array([Value::Null, Value::array([env])]);
            at(&at(&data, 1), 0).get("lang")
        },
        "ES6",
    )?;
    scope.equal(
        "missing properties become undefined",
        || Value::object([("x", 1), ("y", 2)]).get("z"),
        Value::Undefined,
    )?;
    Ok(())
}

fn register_defaults(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.equal(
        "apply to an empty array",
        || default_if_undefined(at(&Value::array(Vec::<Value>::new()), 0), 1),
        1,
    )?;
    scope.equal(
        "apply to a hole in an array",
        || {
            let holey = Value::array([Value::from(1), Value::Undefined, Value::from(3)]);
            default_if_undefined(at(&holey, 1), 2)
        },
        2,
    )?;
    scope.equal(
        "apply to a missing property",
        || default_if_undefined(Value::object([("a", 1)]).get("b"), 2),
        2,
    )?;
    scope.equal(
        "apply to a property that is undefined",
        || {
            let obj = Value::object([("a", Value::from(1)), ("b", Value::Undefined)]);
            default_if_undefined(obj.get("b"), 2)
        },
        2,
    )?;
    scope.equal(
        "do not apply to null",
        || {
            let obj = Value::object([("b", Value::Null)]);
            default_if_undefined(obj.get("b"), 2)
        },
        Value::Null,
    )?;
    scope.deep_equal(
        "work when destructuring a string",
        || {
            let one = chars("1");
            Value::array([at(&one, 0), default_if_undefined(at(&one, 1), 2)])
        },
        Value::array([Value::from("1"), Value::from(2)]),
    )?;
    Ok(())
}

fn register_parameters(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.deep_equal(
        "takes several parameters from one object",
        || {
            let f = |user: &Value| Value::array([user.get("name"), user.get("id")]);
            f(&Value::object([
                ("name", Value::from("Wolfram")),
                ("id", Value::from(42)),
            ]))
        },
        Value::array([Value::from("Wolfram"), Value::from(42)]),
    )?;
    scope.equal(
        "takes a parameter from an object inside an array",
        || {
            let f = |users: &Value| at(users, 0).get("name");
            let users = Value::array([
                Value::object([("name", Value::from("Alice")), ("id", Value::from(42))]),
                Value::object([("name", "nobody")]),
            ]);
            f(&users)
        },
        "Alice",
    )?;
    scope.deep_equal(
        "defaults simple values",
        || {
            let f = |id: Value, name: Value| Value::array([id, default_if_undefined(name, "Bob")]);
            f(Value::from(23), Value::Undefined)
        },
        Value::array([Value::from(23), Value::from("Bob")]),
    )?;
    scope.deep_equal(
        "passes an object through an array parameter",
        || {
            let default_user = Value::object([("id", Value::from(23)), ("name", Value::from("Joe"))]);
            let f = |users: &Value| at(users, 0);
            f(&Value::array([default_user]))
        },
        Value::object([("id", Value::from(23)), ("name", Value::from("Joe"))]),
    )?;
    scope.deep_equal(
        "mixes parameter kinds with defaults",
        || {
            let f = |id: Value, arr: &Value, obj: &Value| {
                Value::array([
                    default_if_undefined(id, 1),
                    default_if_undefined(at(arr, 0), 2),
                    default_if_undefined(obj.get("obj"), 3),
                ])
            };
            f(
                Value::Undefined,
                &Value::array(Vec::<Value>::new()),
                &Value::object(Vec::<(String, Value)>::new()),
            )
        },
        Value::array([1, 2, 3]),
    )?;
    Ok(())
}

fn register_renaming(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.equal(
        "binds a property to a new name",
        || Value::object([("x", 1)]).get("x"),
        1,
    )?;
    scope.equal(
        "binds a new name with a default",
        || default_if_undefined(Value::object([("y", 23)]).get("x"), 42),
        42,
    )?;
    scope.equal(
        "renames a parameter",
        || {
            let f = |param: &Value| param.get("x");
            f(&Value::object([("x", 1)]))
        },
        1,
    )?;
    scope.equal(
        "renames a parameter with an unused default",
        || {
            let f = |param: &Value| default_if_undefined(param.get("x"), 3);
            f(&Value::object([("x", 3)]))
        },
        3,
    )?;
    Ok(())
}
