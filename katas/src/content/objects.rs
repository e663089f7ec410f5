use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use catalog::{Catalog, RegistrationError, Scope, Value};

use crate::js::object::AccessorObject;

type Method = fn() -> &'static str;

fn func() -> &'static str {
    "func"
}

/// `key in obj` for a plain object value.
fn has_key(obj: &Value, key: &str) -> bool {
    matches!(obj, Value::Object(fields) if fields.contains_key(key))
}

pub fn register(catalog: &mut Catalog) -> Result<(), RegistrationError> {
    let mut objects = catalog.scope(["objects"]);
    register_shorthand(&mut objects.group("shorthand"))?;
    register_computed(&mut objects.group("computed"))?;
    register_getters(&mut objects.group("getters"))?;
    register_setters(&mut objects.group("setters"))?;
    Ok(())
}

fn register_shorthand(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.deep_equal(
        "`{y}` is short for `{y: y}`",
        || {
            let y = 2;
            Value::object([("y", y)])
        },
        Value::object([("y", 2)]),
    )?;
    scope.deep_equal(
        "works with several variables",
        || {
            let (x, y) = (1, 2);
            Value::object([("x", x), ("y", y)])
        },
        Value::object([("x", 1), ("y", 2)]),
    )?;
    scope.equal(
        "a function name becomes the key",
        || {
            let short: BTreeMap<&str, Method> = BTreeMap::from([("func", func as Method)]);
            short
                .get("func")
                .is_some_and(|&method| std::ptr::fn_addr_eq(method, func as Method))
        },
        true,
    )?;
    scope.equal(
        "a different key must be given explicitly",
        || {
            let short: BTreeMap<&str, Method> = BTreeMap::from([("otherKey", func as Method)]);
            short.get("otherKey").map(|method| method())
        },
        "func",
    )?;
    scope.equal(
        "methods can be written inline",
        || {
            let mut short = AccessorObject::new();
            short.define_getter("inlineFunc", |_| Value::from("I am inline"));
            short.get("inlineFunc")
        },
        "I am inline",
    )?;
    Ok(())
}

fn register_computed(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.equal(
        "a computed key comes from a variable",
        || {
            let property_name = "x";
            Value::object([(property_name, 1)]).get("x")
        },
        1,
    )?;
    scope.equal(
        "a computed key can name a method",
        || {
            let key = "func";
            let obj: BTreeMap<&str, Method> = BTreeMap::from([(key, (|| "seven") as Method)]);
            obj.get("func").map(|method| method())
        },
        "seven",
    )?;
    scope.equal(
        "a computed key can be built by an expression",
        || {
            let what = "tyName";
            let obj = Value::object([(format!("proper{what}"), Value::Null)]);
            has_key(&obj, "propertyName")
        },
        true,
    )?;
    scope.equal(
        "accessor keys can be computed too",
        || {
            let key = ["k", "ey"].concat();
            let mut obj = AccessorObject::new();
            obj.define_getter(&key, |_| Value::from(1));
            obj.get("key")
        },
        1,
    )?;
    Ok(())
}

fn register_getters(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.equal(
        "a getter is read like a property",
        || {
            let mut obj = AccessorObject::new();
            obj.define_getter("x", |_| Value::from("ax"));
            obj.get("x")
        },
        "ax",
    )?;
    scope.equal(
        "a getter can have a computed name",
        || {
            let key_name = "x";
            let mut obj = AccessorObject::new();
            obj.define_getter(key_name, |_| Value::from("ax"));
            obj.get("x")
        },
        "ax",
    )?;
    scope.equal(
        "a getter can be removed with delete",
        || {
            let mut obj = AccessorObject::new();
            obj.define_getter("x", |_| Value::from("ax"));
            obj.delete("x");
            obj.get("x")
        },
        Value::Undefined,
    )?;
    Ok(())
}

fn register_setters(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.equal(
        "assignment calls the setter",
        || {
            let the_x = Rc::new(RefCell::new(Value::Null));
            let target = Rc::clone(&the_x);
            let mut obj = AccessorObject::new();
            obj.define_setter("x", move |_, new_x| *target.borrow_mut() = new_x);
            obj.set("x", "the new X");
            the_x.borrow().clone()
        },
        "the new X",
    )?;
    scope.equal(
        "a setter receives exactly the assigned value",
        || {
            let called_with = Rc::new(RefCell::new(Value::Undefined));
            let target = Rc::clone(&called_with);
            let mut obj = AccessorObject::new();
            obj.define_setter("x", move |_, value| *target.borrow_mut() = value);
            obj.set("x", "new value");
            called_with.borrow().clone()
        },
        "new value",
    )?;
    scope.equal(
        "a setter can have a computed name",
        || {
            let public_name = "x";
            let private_name = format!("_{public_name}");
            let mut obj = AccessorObject::new();
            obj.define_setter(public_name, move |this, value| this.set(&private_name, value));
            obj.set("x", "axe");
            obj.get("_x")
        },
        "axe",
    )?;
    scope.equal(
        "delete removes the setter too",
        || {
            let setter_called = Rc::new(Cell::new(false));
            let flag = Rc::clone(&setter_called);
            let mut obj = AccessorObject::new();
            obj.define_setter("x", move |_, _| flag.set(true));
            obj.delete("x");
            obj.set("x", true);
            setter_called.get()
        },
        false,
    )?;
    Ok(())
}
