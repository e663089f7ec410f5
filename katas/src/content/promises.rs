use std::time::Duration;

use catalog::{
    Catalog, ErrorKind, ErrorMatch, Expectation, RegistrationError, Scope, Thrown, Value,
};

use crate::js::promise::{
    Settle, all, delayed, executor, new_promise, race, reject, resolve,
};

const LATER: Duration = Duration::from_millis(100);

/// What `reject()` and `Promise.reject()` carry when called without a reason.
fn no_reason() -> Thrown {
    Thrown::Value(Value::Undefined)
}

pub fn register(catalog: &mut Catalog) -> Result<(), RegistrationError> {
    let mut promises = catalog.scope(["promises"]);
    register_basics(&mut promises.group("basics"))?;
    register_api(&mut promises.group("api"))?;
    register_all(&mut promises.group("all"))?;
    register_race(&mut promises.group("race"))?;
    Ok(())
}

fn register_basics(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    let mut constructor = scope.group("constructor");
    constructor.throws(
        "calling it without an executor throws",
        || new_promise(None).map(|_| Value::Undefined),
        ErrorKind::TypeError,
    )?;
    constructor.equal(
        "an executor function is all it needs",
        || new_promise(executor(|_| Ok(()))).is_ok(),
        true,
    )?;

    let mut simplest = scope.group("simplest");
    simplest.resolves(
        "calling `resolve` resolves the promise",
        || async {
            new_promise(executor(|settle| {
                settle.resolve(Value::Undefined);
                Ok(())
            }))?
            .await
        },
        None,
    )?;
    simplest.resolves(
        "the value given to `resolve` reaches `then`",
        || async {
            new_promise(executor(|settle| {
                settle.resolve(42);
                Ok(())
            }))?
            .await
        },
        Some(Expectation::Equal(Value::from(42))),
    )?;
    simplest.rejects(
        "an executor that throws rejects the promise",
        || async {
            new_promise(executor(|_| {
                Err(Thrown::error(
                    ErrorKind::ReferenceError,
                    "reject is not defined",
                ))
            }))?
            .await
        },
        ErrorKind::ReferenceError,
    )?;

    let mut later = scope.group("asynchronous");
    later.resolves(
        "can resolve later",
        || async {
            new_promise(executor(|settle| {
                tokio::spawn(async move {
                    tokio::time::sleep(LATER).await;
                    settle.resolve(Value::Undefined);
                });
                Ok(())
            }))?
            .await
        },
        None,
    )?;
    later.rejects(
        "can reject later",
        || async {
            new_promise(executor(|settle| {
                tokio::spawn(async move {
                    tokio::time::sleep(LATER).await;
                    settle.reject(no_reason());
                });
                Ok(())
            }))?
            .await
        },
        ErrorMatch::Any,
    )?;
    later.resolves(
        "returning the promise lets the runner await it",
        || async {
            new_promise(executor(|settle| {
                settle.resolve(Value::Undefined);
                Ok(())
            }))?
            .await
        },
        None,
    )?;
    Ok(())
}

fn register_api(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.resolves(
        "resolving through the constructor parameter",
        || async {
            let param = |settle: Settle| -> Result<(), Thrown> {
                settle.resolve(Value::Undefined);
                Ok(())
            };
            new_promise(executor(param))?.await
        },
        None,
    )?;
    scope.resolves(
        "Promise.resolve() resolves with its argument",
        || resolve("all fine"),
        Some(Expectation::Equal(Value::from("all fine"))),
    )?;
    scope.rejects(
        "rejecting through the constructor parameter",
        || async {
            new_promise(executor(|settle| {
                settle.reject(no_reason());
                Ok(())
            }))?
            .await
        },
        ErrorMatch::Any,
    )?;
    scope.rejects(
        "Promise.reject() rejects",
        || reject(no_reason()),
        ErrorMatch::Any,
    )?;
    Ok(())
}

fn register_all(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.resolves(
        "resolves when every promise resolves",
        || all(vec![resolve(Value::Undefined), resolve(Value::Undefined)]),
        Some(Expectation::DeepEqual(Value::array([
            Value::Undefined,
            Value::Undefined,
        ]))),
    )?;
    scope.rejects(
        "rejects when one promise rejects",
        || all(vec![resolve(Value::Undefined), reject(no_reason())]),
        ErrorMatch::Any,
    )?;
    scope.resolves(
        "keeps the input order, not the settling order",
        || {
            all(vec![
                delayed(Duration::from_millis(50), Ok(Value::from(1))),
                delayed(Duration::from_millis(10), Ok(Value::from(2))),
            ])
        },
        Some(Expectation::DeepEqual(Value::array([1, 2]))),
    )?;
    Ok(())
}

fn register_race(scope: &mut Scope<'_>) -> Result<(), RegistrationError> {
    scope.resolves(
        "resolves when the first promise resolves",
        || race(vec![resolve(Value::Undefined), reject(no_reason())]),
        None,
    )?;
    scope.rejects(
        "rejects when the first promise rejects",
        || race(vec![reject(no_reason()), resolve(Value::Undefined)]),
        ErrorMatch::Any,
    )?;
    scope.resolves(
        "the fastest promise wins",
        || {
            race(vec![
                delayed(Duration::from_millis(50), Ok(Value::from("slow"))),
                delayed(Duration::from_millis(10), Ok(Value::from("fast"))),
            ])
        },
        Some(Expectation::Equal(Value::from("fast"))),
    )?;
    Ok(())
}
