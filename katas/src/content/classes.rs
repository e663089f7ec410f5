use std::sync::Arc;

use catalog::{Catalog, RegistrationError, Scope, Value};

use crate::js::class::{Class, Instance, Parent};
use crate::js::object::AccessorObject;
use crate::js::scope::Env;

/// `class User { wroteATest() {...} isLazy() {...} }`
#[derive(Default)]
struct User {
    ever_wrote_a_test: bool,
}

impl User {
    fn writes_tests(&self) -> bool {
        false
    }

    fn wrote_a_test(&mut self) {
        self.ever_wrote_a_test = true;
    }

    fn is_lazy(&self) -> bool {
        !self.ever_wrote_a_test
    }
}

/// An account whose `balance` accessor reads and writes `amount`.
fn account(property_name: &str) -> AccessorObject {
    let mut account = AccessorObject::new();
    account.define_getter(property_name, |this| this.get("amount"));
    account.define_setter(property_name, |this, amount| this.set("amount", amount));
    account
}

pub fn register(catalog: &mut Catalog) -> Result<(), RegistrationError> {
    let mut classes = catalog.scope(["classes"]);
    register_creation(&mut classes.group("creation"))?;
    register_accessors(&mut classes.group("accessors"))?;
    register_extends(&mut classes.group("extends"))?;
    register_prototypes(&mut classes.group("prototypes"))?;
    Ok(())
}

fn register_creation(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.equal(
        "`new` creates an instance of the class",
        || {
            let test_class = Class::new("TestClass");
            let instance = Instance::new(&test_class);
            instance.instance_of(&test_class) && instance.instance_of_object()
        },
        true,
    )?;
    scope.equal(
        "a class is block scoped",
        || {
            let mut env = Env::new();
            env.block(|env| env.declare_let("Inside", Value::from("class Inside")));
            env.lookup("Inside")
                .map_or("undefined", |inside| inside.type_name())
        },
        "undefined",
    )?;
    scope.equal(
        "the constructor sets up the instance",
        || {
            let user_class = Class::new("User");
            let construct = |id: i32| {
                let mut user = Instance::new(&user_class);
                user.set("id", id);
                user
            };
            construct(42).get("id")
        },
        42,
    )?;
    scope.equal(
        "defining a method is simple",
        || User::default().writes_tests(),
        false,
    )?;
    scope.deep_equal(
        "methods share the instance state",
        || {
            let mut tester = User::default();
            let before = tester.is_lazy();
            tester.wrote_a_test();
            Value::array([before, tester.is_lazy()])
        },
        Value::array([true, false]),
    )?;
    Ok(())
}

fn register_accessors(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.equal(
        "a getter is defined with `get`",
        || {
            let mut my_account = AccessorObject::new();
            my_account.define_getter("balance", |_| Value::from(f64::INFINITY));
            my_account.get("balance")
        },
        f64::INFINITY,
    )?;
    scope.equal(
        "a setter is defined with `set`",
        || {
            let mut my_account = account("balance");
            my_account.set("balance", 23);
            my_account.get("balance")
        },
        23,
    )?;

    let mut dynamic = scope.group("dynamic");
    dynamic.equal(
        "a getter name can be computed",
        || {
            let balance = "yourMoney";
            let mut your_account = AccessorObject::new();
            your_account.define_getter(balance, |_| Value::from(f64::NEG_INFINITY));
            your_account.get("yourMoney")
        },
        f64::NEG_INFINITY,
    )?;
    dynamic.equal(
        "a setter name can be computed",
        || {
            let property_name = "balance";
            let mut my_account = account(property_name);
            my_account.set("balance", 23);
            my_account.get("balance")
        },
        23,
    )?;
    Ok(())
}

fn register_extends(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.equal(
        "a class extending Object is an instance of Object",
        || Instance::new(&Class::new("A")).instance_of_object(),
        true,
    )?;
    scope.deep_equal(
        "B extends A, so a B is an A and an Object",
        || {
            let a = Class::new("A");
            let b = Class::extends("B", &a);
            let instance = Instance::new(&b);
            Value::array([instance.instance_of(&a), instance.instance_of_object()])
        },
        Value::array([true, true]),
    )?;
    scope.equal(
        "a class extending null is not an instance of Object",
        || Instance::new(&Class::extends_null("NullClass")).instance_of_object(),
        false,
    )?;
    scope.equal(
        "inheritance spans several levels",
        || {
            let a = Class::new("A");
            let b = Class::extends("B", &a);
            let c = Class::extends("C", &b);
            Instance::new(&c).instance_of(&a)
        },
        true,
    )?;
    scope.equal(
        "a parent is not an instance of its child",
        || {
            let a = Class::new("A");
            let b = Class::extends("B", &a);
            Instance::new(&a).instance_of(&b)
        },
        false,
    )?;
    Ok(())
}

fn register_prototypes(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.equal(
        "A is the prototype of B",
        || {
            let a = Class::new("A");
            let b = Class::extends("B", &a);
            a.is_prototype_of(&b)
        },
        true,
    )?;
    scope.equal(
        "A is not the prototype of itself",
        || {
            let a = Class::new("A");
            a.is_prototype_of(&a)
        },
        false,
    )?;
    scope.equal(
        "the parent can come from an expression",
        || {
            let a = Class::new("A");
            let b = Class::extends("B", &Arc::clone(&a));
            Instance::new(&b).instance_of(&a)
        },
        true,
    )?;
    scope.equal(
        "a parent expression may yield null",
        || {
            let return_parent = |be_null: bool| be_null.then(|| Class::new("A"));
            let b = match return_parent(false) {
                Some(parent) => Class::extends("B", &parent),
                None => Class::extends_null("B"),
            };
            matches!(b.parent, Parent::Null)
        },
        true,
    )?;
    Ok(())
}
