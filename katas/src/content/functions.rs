use std::cell::Cell;

use catalog::core::equality::strict_equals;
use catalog::{Action, Catalog, ErrorKind, Expectation, RegistrationError, Scope, Value};

use crate::js::default_if_undefined;
use crate::js::scope::Env;

/// A method that hands out a closure over its receiver.
struct LexicallyBound {
    this: Value,
}

impl LexicallyBound {
    fn new() -> Self {
        Self {
            this: Value::object([("class", "LexicallyBound")]),
        }
    }

    /// `getFunction() { return () => this }`
    fn get_function(&self) -> impl Fn() -> Value {
        let this = self.this.clone();
        move || this.clone()
    }
}

/// `fn.call(context)`: a closure has no `this` of its own to replace.
fn call_with<F: Fn() -> Value>(f: &F, _context: &Value) -> Value {
    f()
}

pub fn register(catalog: &mut Catalog) -> Result<(), RegistrationError> {
    let mut functions = catalog.scope(["functions"]);
    register_arrows(&mut functions.group("arrow"))?;
    register_lexical_this(&mut functions.group("lexical-this"))?;
    register_defaults(&mut functions.group("default-parameters"))?;
    register_block_scope(&mut functions.group("block-scope"))?;
    register_const(&mut functions.group("const"))?;
    Ok(())
}

fn register_arrows(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.equal(
        "are shorter to write",
        || {
            let func = || "I am func";
            func()
        },
        "I am func",
    )?;
    scope.equal(
        "a single expression body returns its value",
        || {
            let func = |p: f64| p - 1.0;
            func(25.0)
        },
        24,
    )?;
    scope.equal(
        "many parameters",
        || {
            let func = |param: i32, param1: i32| param + param1;
            func(23, 42)
        },
        23 + 42,
    )?;
    scope.deep_equal(
        "can return an object",
        || {
            let func = || Value::object([("iAm", "an object")]);
            func()
        },
        Value::object([("iAm", "an object")]),
    )?;
    Ok(())
}

fn register_lexical_this(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.equal(
        "`this` is bound at definition time",
        || {
            let bound = LexicallyBound::new();
            let f = bound.get_function();
            strict_equals(&f(), &bound.this)
        },
        true,
    )?;
    scope.equal(
        "a different context cannot be bound",
        || {
            let bound = LexicallyBound::new();
            let f = bound.get_function();
            let another = Value::object(Vec::<(String, Value)>::new());
            strict_equals(&call_with(&f, &another), &bound.this)
        },
        true,
    )?;
    Ok(())
}

fn register_defaults(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.equal(
        "a default is used when nothing is passed",
        || {
            let number = |int: Option<f64>| int.unwrap_or(0.0);
            number(None)
        },
        0,
    )?;
    scope.equal(
        "a default is used when undefined is passed",
        || {
            let number = |int: Value| default_if_undefined(int, 23);
            number(Value::Undefined)
        },
        23,
    )?;
    scope.equal(
        "a default is not used when null is passed",
        || {
            let number = |int: Value| default_if_undefined(int, 23);
            number(Value::Null)
        },
        Value::Null,
    )?;
    scope.equal(
        "a default is not used when a value is given",
        || {
            let xhr = |method: Option<&str>| method.unwrap_or("turuuru").to_string();
            xhr(Some("POST"))
        },
        "POST",
    )?;
    scope.equal(
        "a default is evaluated at call time",
        || {
            let default_value = Cell::new(0);
            let xhr = |method: Option<String>| {
                method.unwrap_or_else(|| format!("value: {}", default_value.get()))
            };
            default_value.set(42);
            xhr(None)
        },
        "value: 42",
    )?;
    scope.equal(
        "a default can come from a function call",
        || {
            let default_value = || Value::Undefined;
            let f = |value: Option<Value>| value.unwrap_or_else(default_value);
            strict_equals(&f(None), &default_value())
        },
        true,
    )?;
    Ok(())
}

fn register_block_scope(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.check(
        "`var` is visible after its block",
        Action::sync(|| {
            let mut env = Env::new();
            env.block(|env| env.declare_var("varX", true));
            env.lookup("varX")
        }),
        Expectation::Equal(Value::from(true)),
    )?;
    scope.throws(
        "`let` is gone after its block",
        || {
            let mut env = Env::new();
            env.block(|env| env.declare_let("letX", true));
            env.lookup("letX")
        },
        ErrorKind::ReferenceError,
    )?;
    scope.throws(
        "a `let` loop variable is gone after the loop",
        || {
            let mut env = Env::new();
            let obj = Value::object([("x", 1)]);
            if let Value::Object(fields) = &obj {
                for key in fields.keys() {
                    env.block(|env| env.declare_let("key", key.as_str()));
                }
            }
            env.lookup("key")
        },
        ErrorKind::ReferenceError,
    )?;
    scope.throws(
        "bare curly braces make a block",
        || {
            let mut env = Env::new();
            env.block(|env| env.declare_let("letX", true));
            env.declare_var("varY", 1);
            env.lookup("letX")
        },
        ErrorKind::ReferenceError,
    )?;
    Ok(())
}

fn register_const(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.throws(
        "a const number is read-only",
        || {
            let mut env = Env::new();
            env.declare_const("constNum", 0);
            env.assign("constNum", 1).map(|()| Value::Undefined)
        },
        ErrorKind::TypeError,
    )?;
    scope.throws(
        "a const string is read-only",
        || {
            let mut env = Env::new();
            env.declare_const("constString", "I am a const");
            env.assign("constString", "Cant change you?")
                .map(|()| Value::Undefined)
        },
        ErrorKind::TypeError,
    )?;
    scope.check(
        "a const declared outside a block is visible inside it",
        Action::sync(|| {
            let mut env = Env::new();
            env.declare_const("notChangeable", 23);
            env.block(|env| env.lookup("notChangeable"))
        }),
        Expectation::Equal(Value::from(23)),
    )?;
    scope.equal(
        "the contents of a const array can change",
        || {
            let arr = [Cell::new(4), Cell::new(23)];
            arr[0].set(42);
            arr[0].get()
        },
        42,
    )?;
    scope.equal(
        "the fields of a const object can change",
        || {
            let obj = Cell::new(1);
            obj.set(3);
            obj.get()
        },
        3,
    )?;
    Ok(())
}
