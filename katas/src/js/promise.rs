//! Promises as boxed futures that settle with a [`Completion`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{self, BoxFuture};

use catalog::{Completion, Thrown, Value};

pub type Promise = BoxFuture<'static, Completion>;

/// Body passed to `new Promise(executor)`.
pub type Executor = Box<dyn FnOnce(Settle) -> Result<(), Thrown> + Send>;

/// The `resolve`/`reject` pair handed to an executor. Only the first call
/// settles the promise; clones share the same promise.
#[derive(Clone)]
pub struct Settle {
    slot: Arc<Mutex<Option<oneshot::Sender<Completion>>>>,
}

impl Settle {
    pub fn resolve(&self, value: impl Into<Value>) {
        self.settle(Ok(value.into()));
    }

    pub fn reject(&self, reason: Thrown) {
        self.settle(Err(reason));
    }

    fn settle(&self, completion: Completion) {
        if let Ok(mut slot) = self.slot.lock()
            && let Some(sender) = slot.take()
        {
            // The receiver is gone only if nobody awaits the promise.
            let _ = sender.send(completion);
        }
    }
}

/// Box an executor closure for [`new_promise`].
pub fn executor<F>(body: F) -> Option<Executor>
where
    F: FnOnce(Settle) -> Result<(), Thrown> + Send + 'static,
{
    Some(Box::new(body))
}

/// `new Promise(executor)`.
///
/// Without an executor this throws a `TypeError` like the source runtime.
/// An executor that throws rejects the promise, unless it settled first. A
/// promise whose `Settle` handles are all dropped unsettled stays pending.
pub fn new_promise(executor: Option<Executor>) -> Result<Promise, Thrown> {
    let Some(executor) = executor else {
        return Err(Thrown::type_error("Promise resolver undefined is not a function"));
    };
    let (sender, receiver) = oneshot::channel();
    let settle = Settle {
        slot: Arc::new(Mutex::new(Some(sender))),
    };
    if let Err(thrown) = executor(settle.clone()) {
        settle.reject(thrown);
    }
    drop(settle);
    Ok(async move {
        match receiver.await {
            Ok(completion) => completion,
            Err(oneshot::Canceled) => future::pending().await,
        }
    }
    .boxed())
}

/// `Promise.resolve(value)`.
pub fn resolve(value: impl Into<Value>) -> Promise {
    future::ready(Ok(value.into())).boxed()
}

/// `Promise.reject(reason)`.
pub fn reject(reason: Thrown) -> Promise {
    future::ready(Err(reason)).boxed()
}

/// Settle with `completion` once `delay` has passed, like a `setTimeout`.
pub fn delayed(delay: Duration, completion: Completion) -> Promise {
    async move {
        tokio::time::sleep(delay).await;
        completion
    }
    .boxed()
}

/// `Promise.all`: every value in input order, or the first rejection.
pub fn all(promises: Vec<Promise>) -> Promise {
    future::try_join_all(promises)
        .map(|settled| settled.map(Value::array))
        .boxed()
}

/// `Promise.race`: whichever promise settles first, either way. An empty
/// race never settles.
pub fn race(promises: Vec<Promise>) -> Promise {
    if promises.is_empty() {
        return future::pending().boxed();
    }
    future::select_all(promises)
        .map(|(completion, _index, _rest)| completion)
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::ErrorKind;

    #[test]
    fn constructor_requires_an_executor() {
        let err = new_promise(None).err().expect("type error");
        assert_eq!(err.kind(), Some(ErrorKind::TypeError));
    }

    #[tokio::test]
    async fn first_settlement_wins() {
        let promise = new_promise(executor(|settle| {
            settle.resolve(1);
            settle.reject(Thrown::type_error("late"));
            Err(Thrown::range_error("thrown after resolve"))
        }))
        .expect("executor");
        assert!(matches!(promise.await, Ok(Value::Number(n)) if n == 1.0));
    }

    #[tokio::test]
    async fn throwing_executor_rejects() {
        let promise = new_promise(executor(|_settle| {
            Err(Thrown::error(ErrorKind::ReferenceError, "reject is not defined"))
        }))
        .expect("executor");
        let err = promise.await.expect_err("rejected");
        assert_eq!(err.kind(), Some(ErrorKind::ReferenceError));
    }

    #[tokio::test]
    async fn settling_later_from_a_task() {
        let promise = new_promise(executor(|settle| {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                settle.resolve("later");
            });
            Ok(())
        }))
        .expect("executor");
        assert!(matches!(promise.await, Ok(Value::String(ref s)) if s == "later"));
    }

    #[tokio::test]
    async fn all_and_race() {
        let values = all(vec![resolve(1), resolve(2)]).await.expect("all resolves");
        assert_eq!(values.as_array().map(<[Value]>::len), Some(2));
        assert!(all(vec![resolve(1), reject(Thrown::Value(Value::Undefined))]).await.is_err());

        let winner = race(vec![
            delayed(Duration::from_millis(50), Ok(Value::from("slow"))),
            resolve("fast"),
        ])
        .await;
        assert!(matches!(winner, Ok(Value::String(ref s)) if s == "fast"));
        assert!(race(vec![reject(Thrown::Value(Value::Null)), resolve(1)]).await.is_err());
    }
}
