use catalog::{Catalog, RegistrationError, Value};

fn sum(a: f64, b: f64) -> f64 {
    a + b
}

/// `fizz` for multiples of 3, `buzz` for 5, both for 15, otherwise the number.
fn fizzbuzz(n: u32) -> Value {
    match (n % 3, n % 5) {
        (0, 0) => Value::from("fizzbuzz"),
        (0, _) => Value::from("fizz"),
        (_, 0) => Value::from("buzz"),
        _ => Value::from(n),
    }
}

pub fn register(catalog: &mut Catalog) -> Result<(), RegistrationError> {
    let mut basics = catalog.scope(["basics"]);

    let mut sums = basics.group("sum");
    sums.equal("adds 1 + 2 to equal 3", || sum(1.0, 2.0), 3)?;
    sums.equal("adds positive and negative numbers", || sum(-1.0, 1.0), 0)?;
    sums.equal("adds decimal numbers", || sum(1.25, 1.75), 3)?;

    let mut fizz = basics.group("fizzbuzz");
    fizz.equal("returns 1 when input is 1", || fizzbuzz(1), 1)?;
    fizz.equal("returns fizz when input is 3", || fizzbuzz(3), "fizz")?;
    fizz.equal("returns buzz when input is 5", || fizzbuzz(5), "buzz")?;
    fizz.equal("returns fizzbuzz when input is 15", || fizzbuzz(15), "fizzbuzz")?;
    Ok(())
}
