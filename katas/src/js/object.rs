//! Objects whose properties may be accessors (`get x()` / `set x(v)`).

use std::collections::BTreeMap;
use std::rc::Rc;

use catalog::Value;

pub type Getter = Rc<dyn Fn(&AccessorObject) -> Value>;
pub type Setter = Rc<dyn Fn(&mut AccessorObject, Value)>;

enum Property {
    Data(Value),
    Accessor {
        get: Option<Getter>,
        set: Option<Setter>,
    },
}

/// An object literal with data and accessor properties.
#[derive(Default)]
pub struct AccessorObject {
    properties: BTreeMap<String, Property>,
}

impl AccessorObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// `get [key]() { ... }`; keeps an existing setter for the same key.
    pub fn define_getter(&mut self, key: &str, getter: impl Fn(&AccessorObject) -> Value + 'static) {
        let set = self.setter(key);
        self.properties.insert(
            key.to_string(),
            Property::Accessor {
                get: Some(Rc::new(getter)),
                set,
            },
        );
    }

    /// `set [key](value) { ... }`; keeps an existing getter for the same key.
    pub fn define_setter(
        &mut self,
        key: &str,
        setter: impl Fn(&mut AccessorObject, Value) + 'static,
    ) {
        let get = match self.properties.get(key) {
            Some(Property::Accessor { get, .. }) => get.clone(),
            _ => None,
        };
        self.properties.insert(
            key.to_string(),
            Property::Accessor {
                get,
                set: Some(Rc::new(setter)),
            },
        );
    }

    /// Property read. A setter-only accessor reads as `undefined`.
    pub fn get(&self, key: &str) -> Value {
        match self.properties.get(key) {
            Some(Property::Data(value)) => value.clone(),
            Some(Property::Accessor { get: Some(getter), .. }) => getter(self),
            _ => Value::Undefined,
        }
    }

    /// Property write: calls the setter if there is an accessor, otherwise
    /// stores a data property. A getter-only accessor ignores the write.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        if matches!(self.properties.get(key), Some(Property::Accessor { .. })) {
            if let Some(setter) = self.setter(key) {
                setter(self, value);
            }
            return;
        }
        self.properties
            .insert(key.to_string(), Property::Data(value));
    }

    /// `key in object`.
    pub fn has(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// `delete object[key]`, accessor included.
    pub fn delete(&mut self, key: &str) -> bool {
        self.properties.remove(key);
        true
    }

    fn setter(&self, key: &str) -> Option<Setter> {
        match self.properties.get(key) {
            Some(Property::Accessor { set, .. }) => set.clone(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn getter_and_setter_share_a_key() {
        let mut account = AccessorObject::new();
        account.define_getter("balance", |this| this.get("_amount"));
        account.define_setter("balance", |this, amount| this.set("_amount", amount));
        account.set("balance", 23);
        assert!(matches!(account.get("balance"), Value::Number(n) if n == 23.0));
        assert!(account.has("_amount"));
    }

    #[test]
    fn delete_removes_the_accessor() {
        let called = Rc::new(Cell::new(false));
        let flag = Rc::clone(&called);
        let mut obj = AccessorObject::new();
        obj.define_setter("x", move |_, _| flag.set(true));
        assert!(matches!(obj.get("x"), Value::Undefined));
        obj.delete("x");
        obj.set("x", true);
        assert!(!called.get());
        assert!(matches!(obj.get("x"), Value::Bool(true)));
    }
}
