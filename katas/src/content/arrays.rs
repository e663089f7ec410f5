use catalog::core::equality::strict_equals;
use catalog::{Catalog, RegistrationError, Value};

/// `array.find(predicate)`: the first match, `undefined` when nothing matches.
fn find(array: &Value, predicate: impl Fn(&Value) -> bool) -> Value {
    array
        .as_array()
        .and_then(|items| items.iter().find(|item| predicate(item)))
        .cloned()
        .unwrap_or(Value::Undefined)
}

pub fn register(catalog: &mut Catalog) -> Result<(), RegistrationError> {
    let mut scope = catalog.scope(["arrays", "find"]);
    scope.equal(
        "takes a compare function",
        || find(&Value::array([false, true]), |check| strict_equals(check, &Value::from(true))),
        true,
    )?;
    scope.equal(
        "returns the first value found",
        || {
            find(&Value::array([0, 2, 1]), |item| {
                item.as_number().is_some_and(|n| n > 1.0)
            })
        },
        2,
    )?;
    scope.equal(
        "returns undefined when nothing was found",
        || find(&Value::array([1, 3]), |item| strict_equals(item, &Value::from(2))),
        Value::Undefined,
    )?;
    scope.equal(
        "returns the very object that matched",
        || {
            let bob = Value::object([("name", "Bob")]);
            let alice = Value::object([("name", "Alice")]);
            let found = find(&Value::array([bob, alice.clone()]), |user| {
                user.get("name").as_str() == Some("Alice")
            });
            strict_equals(&found, &alice)
        },
        true,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_ignores_non_arrays() {
        assert!(matches!(find(&Value::Null, |_| true), Value::Undefined));
    }

    #[test]
    fn find_stops_at_the_first_match() {
        let found = find(&Value::array([1, 2, 3]), |item| {
            item.as_number().is_some_and(|n| n >= 2.0)
        });
        assert_eq!(found.as_number(), Some(2.0));
    }
}
