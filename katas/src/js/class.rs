//! Classes as an explicit type hierarchy.
//!
//! Each class records its parent up front; `instanceof` and `isPrototypeOf`
//! walk that chain. Identity is the `Arc`, so two classes with the same name
//! are still different classes.

use std::collections::BTreeMap;
use std::sync::Arc;

use catalog::Value;

#[derive(Debug)]
pub enum Parent {
    /// Implicit or explicit `extends Object`.
    Object,
    /// `extends null`: instances are not objects in the `instanceof` sense.
    Null,
    Class(Arc<Class>),
}

#[derive(Debug)]
pub struct Class {
    pub name: String,
    pub parent: Parent,
}

impl Class {
    /// `class Name {}`
    pub fn new(name: &str) -> Arc<Class> {
        Arc::new(Class {
            name: name.to_string(),
            parent: Parent::Object,
        })
    }

    /// `class Name extends parent {}`
    pub fn extends(name: &str, parent: &Arc<Class>) -> Arc<Class> {
        Arc::new(Class {
            name: name.to_string(),
            parent: Parent::Class(Arc::clone(parent)),
        })
    }

    /// `class Name extends null {}`
    pub fn extends_null(name: &str) -> Arc<Class> {
        Arc::new(Class {
            name: name.to_string(),
            parent: Parent::Null,
        })
    }

    /// `self.isPrototypeOf(other)`: `self` is a strict ancestor of `other`.
    pub fn is_prototype_of(self: &Arc<Self>, other: &Arc<Class>) -> bool {
        other.ancestors().any(|ancestor| Arc::ptr_eq(self, ancestor))
    }

    /// True unless the chain ends in `extends null`.
    pub fn derives_from_object(&self) -> bool {
        let mut current = self;
        loop {
            match &current.parent {
                Parent::Object => return true,
                Parent::Null => return false,
                Parent::Class(parent) => current = parent.as_ref(),
            }
        }
    }

    /// Parent classes from nearest to furthest.
    pub fn ancestors(&self) -> impl Iterator<Item = &Arc<Class>> {
        let mut next = match &self.parent {
            Parent::Class(parent) => Some(parent),
            _ => None,
        };
        std::iter::from_fn(move || {
            let current = next?;
            next = match &current.parent {
                Parent::Class(parent) => Some(parent),
                _ => None,
            };
            Some(current)
        })
    }
}

/// `new Class()` with own data properties.
#[derive(Debug, Clone)]
pub struct Instance {
    class: Arc<Class>,
    fields: BTreeMap<String, Value>,
}

impl Instance {
    pub fn new(class: &Arc<Class>) -> Self {
        Self {
            class: Arc::clone(class),
            fields: BTreeMap::new(),
        }
    }

    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    /// `instance instanceof class`.
    pub fn instance_of(&self, class: &Arc<Class>) -> bool {
        Arc::ptr_eq(&self.class, class) || class.is_prototype_of(&self.class)
    }

    /// `instance instanceof Object`.
    pub fn instance_of_object(&self) -> bool {
        self.class.derives_from_object()
    }

    /// Property read; `undefined` when unset.
    pub fn get(&self, key: &str) -> Value {
        self.fields.get(key).cloned().unwrap_or(Value::Undefined)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_of_walks_the_chain() {
        let a = Class::new("A");
        let b = Class::extends("B", &a);
        let c = Class::extends("C", &b);
        let instance = Instance::new(&c);
        assert!(instance.instance_of(&a));
        assert!(instance.instance_of(&c));
        assert!(instance.instance_of_object());
        assert!(!Instance::new(&a).instance_of(&b));
    }

    #[test]
    fn same_name_is_not_the_same_class() {
        let a = Class::new("A");
        let other_a = Class::new("A");
        assert!(!Instance::new(&a).instance_of(&other_a));
    }

    #[test]
    fn null_parent_is_not_an_object() {
        let null_class = Class::extends_null("NullClass");
        assert!(!Instance::new(&null_class).instance_of_object());
        let child = Class::extends("Child", &null_class);
        assert!(!child.derives_from_object());
    }

    #[test]
    fn prototype_relation_is_strict() {
        let a = Class::new("A");
        let b = Class::extends("B", &a);
        assert!(a.is_prototype_of(&b));
        assert!(!b.is_prototype_of(&a));
        assert!(!a.is_prototype_of(&a));
    }
}
