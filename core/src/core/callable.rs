// proctor/src/core/callable.rs

//! Callable types stored in a process's slot maps, plus helpers that wrap
//! plain async closures into them.
//!
//! Every callable receives a clone of the owning [`Process`] handle, so it can
//! read the last result, touch the metadata bag, or register more callables.
//! Callables must not hold any guard obtained from the process across an
//! `.await`.

use crate::process::Process;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed, `Send` future as returned by every stored callable.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A job: produces a result that is merged into the process's aggregate result.
pub type JobFn<R, E> = dyn Fn(Process<R, E>) -> BoxFuture<Result<R, E>> + Send + Sync;
pub type Job<R, E> = Arc<JobFn<R, E>>;

/// An `onStart` / `onSuccess` callback. Its `Ok` value is discarded.
pub type CallbackFn<R, E> = dyn Fn(Process<R, E>) -> BoxFuture<Result<(), E>> + Send + Sync;
pub type Callback<R, E> = Arc<CallbackFn<R, E>>;

/// An `onError` callback. Receives the captured failure exactly as it was produced.
pub type ErrorCallbackFn<R, E> = dyn Fn(Process<R, E>, Arc<E>) -> BoxFuture<Result<(), E>> + Send + Sync;
pub type ErrorCallback<R, E> = Arc<ErrorCallbackFn<R, E>>;

/// A predicate gating the jobs. `Ok(false)` skips them.
pub type PredicateFn<R, E> = dyn Fn(Process<R, E>) -> BoxFuture<Result<bool, E>> + Send + Sync;
pub type Predicate<R, E> = Arc<PredicateFn<R, E>>;

/// Wraps an async closure into a [`Job`].
pub fn job<R, E, F, Fut>(f: F) -> Job<R, E>
where
  R: 'static,
  E: 'static,
  F: Fn(Process<R, E>) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<R, E>> + Send + 'static,
{
  Arc::new(move |process: Process<R, E>| -> BoxFuture<Result<R, E>> { Box::pin(f(process)) })
}

/// Wraps an async closure into a [`Callback`].
pub fn callback<R, E, F, Fut>(f: F) -> Callback<R, E>
where
  R: 'static,
  E: 'static,
  F: Fn(Process<R, E>) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<(), E>> + Send + 'static,
{
  Arc::new(move |process: Process<R, E>| -> BoxFuture<Result<(), E>> { Box::pin(f(process)) })
}

/// Wraps an async closure into an [`ErrorCallback`].
pub fn error_callback<R, E, F, Fut>(f: F) -> ErrorCallback<R, E>
where
  R: 'static,
  E: 'static,
  F: Fn(Process<R, E>, Arc<E>) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<(), E>> + Send + 'static,
{
  Arc::new(move |process: Process<R, E>, err: Arc<E>| -> BoxFuture<Result<(), E>> {
    Box::pin(f(process, err))
  })
}

/// Wraps an async closure into a [`Predicate`].
pub fn predicate<R, E, F, Fut>(f: F) -> Predicate<R, E>
where
  R: 'static,
  E: 'static,
  F: Fn(Process<R, E>) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<bool, E>> + Send + 'static,
{
  Arc::new(move |process: Process<R, E>| -> BoxFuture<Result<bool, E>> { Box::pin(f(process)) })
}
