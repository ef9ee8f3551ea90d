//! Callback and deferred calling conventions.
//!
//! Every operation runs through [`dispatch`], which spawns it on the ambient
//! tokio runtime and hands the outcome to a single `FnOnce` completion. The
//! deferred form is built on top of it: [`deferred`] installs a completion
//! that forwards into a oneshot channel and returns the receiving end as a
//! [`Deferred`] future. Both conventions therefore see the same result, and
//! it is delivered exactly once: a panicking operation, a runtime shutdown
//! or a missing runtime all complete with an error.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Completion handler receiving the outcome of an operation.
pub type Callback<T> = Box<dyn FnOnce(Result<T>) + Send + 'static>;

/// Pending completion. Delivers `ClientError::Dropped` if it is dropped
/// before `complete` runs, which happens when the runtime shuts down with
/// the operation in flight.
struct Completion<T> {
    callback: Option<Callback<T>>,
}

impl<T> Completion<T> {
    fn complete(mut self, result: Result<T>) {
        if let Some(callback) = self.callback.take() {
            callback(result);
        }
    }
}

impl<T> Drop for Completion<T> {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            debug!("operation dropped before completion");
            callback(Err(ClientError::Dropped));
        }
    }
}

/// Run `operation` in the background and deliver its result to `callback`.
///
/// Without a current tokio runtime the operation is not started and the
/// callback receives `ClientError::NoRuntime` before this function returns.
pub fn dispatch<T, F>(operation: F, callback: Callback<T>)
where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    let completion = Completion {
        callback: Some(callback),
    };
    let handle = match Handle::try_current() {
        Ok(handle) => handle,
        Err(e) => {
            debug!(error = %e, "no tokio runtime to run operation");
            completion.complete(Err(ClientError::NoRuntime(e.to_string())));
            return;
        }
    };

    let task = handle.spawn(operation);
    handle.spawn(async move {
        let result = task.await.unwrap_or_else(|e| {
            debug!(error = %e, "operation task failed");
            Err(ClientError::Dropped)
        });
        completion.complete(result);
    });
}

/// Run `operation` in the background and return a future for its result.
pub fn deferred<T, F>(operation: F) -> Deferred<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    dispatch(
        operation,
        Box::new(move |result| {
            if tx.send(result).is_err() {
                debug!("deferred result discarded, receiver dropped");
            }
        }),
    );
    Deferred { rx }
}

/// Eventual result of an operation started without a callback.
///
/// The operation runs whether or not this value is polled; dropping it only
/// discards the result.
#[derive(Debug)]
#[must_use = "the result of the operation is lost unless the deferred value is awaited"]
pub struct Deferred<T> {
    rx: oneshot::Receiver<Result<T>>,
}

impl<T> Future for Deferred<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(ClientError::Dropped)))
    }
}
