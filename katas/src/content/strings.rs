use std::cell::Cell;

use catalog::{
    Action, Catalog, Completion, ErrorKind, Expectation, RegistrationError, Scope, Value,
};

use super::returns;
use crate::js::coerce::{self, ToPrimitive};
use crate::js::string::{ends_with, includes, repeat, starts_with};
use crate::js::template::Template;

/// A search built-in and the boolean it should answer.
type Search = (&'static str, fn() -> Completion, bool);

/// `{ toString() { return 1 } }`
struct ToStringReturnsOne;

impl ToPrimitive for ToStringReturnsOne {
    fn to_primitive(&self) -> Value {
        Value::from(1)
    }
}

struct MyString;

impl ToPrimitive for MyString {
    fn to_primitive(&self) -> Value {
        Value::from("my string")
    }
}

/// `toString()` returns a counter that increments on every call.
struct Counting {
    counter: Cell<u32>,
}

impl ToPrimitive for Counting {
    fn to_primitive(&self) -> Value {
        let n = self.counter.get();
        self.counter.set(n + 1);
        Value::from(n)
    }
}

fn s(text: &str) -> Value {
    Value::from(text)
}

const INCLUDES: &[Search] = &[
    (
        "finds a character in a three char string",
        || includes(&s("xyz"), &s("x"), &Value::Undefined),
        true,
    ),
    (
        "reports false if the character was not found",
        || includes(&s("xyz"), &s("abc"), &Value::Undefined),
        false,
    ),
    (
        "a string includes itself",
        || {
            let find_some = |find_me: &Value| includes(find_me, find_me, &Value::Undefined);
            find_some(&s("xyz"))
        },
        true,
    ),
    (
        "the empty string is found in an empty string",
        || includes(&s(""), &s(""), &Value::Undefined),
        true,
    ),
    (
        "the empty string is found in `abc`",
        || includes(&s("abc"), &s(""), &Value::Undefined),
        true,
    ),
    (
        "searching for undefined looks for the text `undefined`",
        || includes(&s("abc"), &Value::Undefined, &Value::Undefined),
        false,
    ),
    (
        "searches case-sensitively",
        || includes(&s("abc"), &s("A"), &Value::Undefined),
        false,
    ),
    (
        "coerces a number search to a string",
        || includes(&s("123"), &Value::from(2), &Value::Undefined),
        true,
    ),
    (
        "coerces an array search to a string",
        || includes(&s("123"), &Value::array([1]), &Value::Undefined),
        true,
    ),
    (
        "coerces an object through its toString",
        || includes(&s("123"), &ToStringReturnsOne, &Value::Undefined),
        true,
    ),
    (
        "does not find `a` after position 1 in `abc`",
        || includes(&s("abc"), &s("a"), &Value::from(2)),
        false,
    ),
    (
        "the position gets coerced",
        || includes(&s("xyz"), &s("z"), &s("2")),
        true,
    ),
    (
        "an undefined position means 0",
        || includes(&s("xyz"), &s("x"), &Value::Undefined),
        true,
    ),
    (
        "a negative position means 0",
        || includes(&s("xyz"), &s("x"), &Value::from(-2)),
        true,
    ),
    (
        "a NaN position means 0",
        || includes(&s("xyz"), &s("x"), &Value::from(f64::NAN)),
        true,
    ),
];

const THE_STRING_S: &str = "the string s";

const STARTS_WITH: &[Search] = &[
    (
        "works with just a character",
        || starts_with(&s(THE_STRING_S), &s("t"), &Value::Undefined),
        true,
    ),
    (
        "works with a string",
        || starts_with(&s(THE_STRING_S), &s("the"), &Value::Undefined),
        true,
    ),
    (
        "works with unicode characters",
        || starts_with(&s("☢ NO"), &s("☢"), &Value::Undefined),
        true,
    ),
    (
        "finds `str` at position 4",
        || starts_with(&s(THE_STRING_S), &s("str"), &Value::from(4)),
        true,
    ),
    (
        "position 0 is the default",
        || starts_with(&s(THE_STRING_S), &s("the"), &Value::from(0)),
        true,
    ),
    (
        "the position gets coerced to an integer",
        || starts_with(&s(THE_STRING_S), &s("str"), &s("4")),
        true,
    ),
    (
        "a position past the end returns false",
        || {
            let past_end = THE_STRING_S.encode_utf16().count() + 1;
            starts_with(&s(THE_STRING_S), &s(" "), &Value::from(past_end))
        },
        false,
    ),
    (
        "works on a boolean receiver",
        || {
            let a_bool = true;
            starts_with(&Value::from(!a_bool), &s("false"), &Value::Undefined)
        },
        true,
    ),
    (
        "works on a number receiver",
        || {
            let a_number = 1900;
            starts_with(&Value::from(a_number + 84), &s("1984"), &Value::Undefined)
        },
        true,
    ),
    (
        "works on a number receiver with a position",
        || starts_with(&Value::from(1994), &s("99"), &Value::from(1)),
        true,
    ),
];

const EL_FIN: &str = "el fin";

const ENDS_WITH: &[Search] = &[
    (
        "works with just a character",
        || ends_with(&s(EL_FIN), &s("n"), &Value::Undefined),
        true,
    ),
    (
        "works with a string",
        || ends_with(&s(EL_FIN), &s("fin"), &Value::Undefined),
        true,
    ),
    (
        "works with unicode characters",
        || ends_with(&s("NO ☢"), &s("☢"), &Value::Undefined),
        true,
    ),
    (
        "finds `el` in the first 2 characters",
        || ends_with(&s(EL_FIN), &s("el"), &Value::from(2)),
        true,
    ),
    (
        "an undefined end uses the entire string",
        || ends_with(&s(EL_FIN), &s("fin"), &Value::Undefined),
        true,
    ),
    (
        "the end gets coerced to an integer",
        || ends_with(&s(EL_FIN), &s("fi"), &s("5")),
        true,
    ),
    (
        "a negative end still finds the empty string",
        || ends_with(&s("1"), &s(""), &Value::from(-1)),
        true,
    ),
    (
        "a negative end finds no non-empty string",
        || ends_with(&s("1"), &s("lol"), &Value::from(-1)),
        false,
    ),
    (
        "works on a boolean receiver",
        || {
            let a_bool = true;
            ends_with(&Value::from(!a_bool), &s("lse"), &Value::Undefined)
        },
        true,
    ),
    (
        "works on a number receiver with a number search",
        || {
            let a_number = 84;
            ends_with(&Value::from(a_number + 1900), &Value::from(84), &Value::Undefined)
        },
        true,
    ),
    (
        "works on a number receiver with an end",
        || ends_with(&Value::from(1994), &s("99"), &s("3")),
        true,
    ),
];

pub fn register(catalog: &mut Catalog) -> Result<(), RegistrationError> {
    let mut strings = catalog.scope(["strings"]);

    let mut scope = strings.group("includes");
    register_searches(&mut scope, INCLUDES)?;
    scope.throws(
        "a regular expression is a TypeError",
        || includes(&s(""), &Value::regexp("$%"), &Value::Undefined),
        ErrorKind::TypeError,
    )?;

    register_repeat(&mut strings.group("repeat"))?;

    let mut scope = strings.group("startsWith");
    register_searches(&mut scope, STARTS_WITH)?;
    scope.throws(
        "a regular expression is a TypeError",
        || starts_with(&s(""), &Value::regexp("&$"), &Value::Undefined),
        ErrorKind::TypeError,
    )?;

    let mut scope = strings.group("endsWith");
    register_searches(&mut scope, ENDS_WITH)?;
    scope.throws(
        "a regular expression is a TypeError",
        || ends_with(&s(""), &Value::regexp("%&"), &Value::Undefined),
        ErrorKind::TypeError,
    )?;

    register_templates(&mut strings.group("template"))?;
    Ok(())
}

fn register_searches(scope: &mut Scope<'_>, cases: &[Search]) -> Result<(), RegistrationError> {
    for &(description, action, expected) in cases {
        returns(scope, description, action, expected)?;
    }
    Ok(())
}

fn register_repeat(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    returns(
        scope,
        "a count of 1 keeps the string",
        || repeat(&s("one"), &Value::from(1)),
        "one",
    )?;
    returns(
        scope,
        "a count of 3 turns `x` into `xxx`",
        || repeat(&s("x"), &Value::from(3)),
        "xxx",
    )?;
    returns(
        scope,
        "a count of 0 returns the empty string",
        || repeat(&s("shrink"), &Value::from(0)),
        "",
    )?;
    returns(
        scope,
        "a string count is coerced to an integer",
        || repeat(&s("three"), &s("3")),
        "threethreethree",
    )?;
    returns(
        scope,
        "a fractional count is truncated",
        || repeat(&s("ab"), &Value::from(2.9)),
        "abab",
    )?;
    scope.throws(
        "a count below 0 is a RangeError",
        || repeat(&s(""), &Value::from(-1)),
        ErrorKind::RangeError,
    )?;
    scope.throws(
        "a count of +Infinity is a RangeError",
        || repeat(&s(""), &s("+Infinity")),
        ErrorKind::RangeError,
    )?;
    returns(
        scope,
        "a boolean receiver is coerced to a string",
        || repeat(&Value::from(false), &Value::from(2)),
        "falsefalse",
    )?;
    returns(
        scope,
        "a number receiver is coerced to a string",
        || repeat(&Value::from(1), &Value::from(2)),
        "11",
    )?;
    scope.throws(
        "a null receiver is a TypeError",
        || repeat(&Value::Null, &Value::from(2)),
        ErrorKind::TypeError,
    )?;

    let mut own = scope.group("own-class");
    returns(
        &mut own,
        "String() calls toString",
        || repeat(&Value::from(coerce::string(&MyString)), &Value::from(1)),
        "my string",
    )?;
    own.check(
        "toString is only called once",
        Action::sync(|| {
            let x = Counting {
                counter: Cell::new(1),
            };
            let repeated = repeat(&Value::from(coerce::string(&x)), &Value::from(2))?;
            Ok(Value::array([repeated, Value::from(x.counter.get())]))
        }),
        Expectation::DeepEqual(Value::array([s("11"), Value::from(2)])),
    )?;
    Ok(())
}

fn register_templates(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    returns(
        scope,
        "substitutions are inserted",
        || {
            let x = 42;
            Template::new(&["x = ", ""]).interpolate(&[Value::from(x)])
        },
        "x = 42",
    )?;
    returns(
        scope,
        "substitutions are coerced to strings",
        || Template::new(&["[", "]"]).interpolate(&[Value::array([1, 2])]),
        "[1,2]",
    )?;
    returns(
        scope,
        "escapes are processed",
        || Template::new(&[r"a\tb"]).interpolate(&[]),
        "a\tb",
    )?;
    scope.equal(
        "String.raw keeps the backslash",
        || Template::new(&[r"\n"]).raw_string(&[]).len(),
        2,
    )?;
    scope.equal(
        "String.raw still substitutes",
        || Template::new(&[r"\n", r"\t"]).raw_string(&[Value::from(1)]),
        r"\n1\t",
    )?;
    scope.deep_equal(
        "a tag receives the cooked strings",
        || Template::new(&["one", r"\ntwo"]).strings(),
        Value::array(["one", "\ntwo"]),
    )?;
    scope.deep_equal(
        "a tag can read the raw strings",
        || Template::new(&["one", r"\ntwo"]).raw(),
        Value::array(["one", r"\ntwo"]),
    )?;
    scope.equal(
        "an invalid escape is undefined for a tag",
        || {
            Template::new(&[r"\unicode"])
                .parts
                .first()
                .and_then(|part| part.cooked.clone())
        },
        Value::Undefined,
    )?;
    scope.throws(
        "an invalid escape is a SyntaxError without a tag",
        || Template::new(&[r"\unicode"]).interpolate(&[]),
        ErrorKind::SyntaxError,
    )?;
    Ok(())
}
