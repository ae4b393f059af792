//! Asynchronous validators
//!
//! Remote checks (a username lookup, a server-side rule) cannot answer
//! inline. They return a boxed future that resolves to the same partial
//! error record a synchronous validator produces.

use std::fmt;
use std::future::Future;

use futures::future::{BoxFuture, FutureExt};

use crate::foundation::FieldErrors;
use crate::value::Value;

/// A validator whose verdict arrives later.
///
/// The returned future owns everything it needs (`'static`), so it can be
/// spawned on any executor while the form tree moves on.
pub trait AsyncValidate: Send + Sync {
    /// Start validating `value`.
    fn validate(&self, value: &Value) -> BoxFuture<'static, Result<(), FieldErrors>>;
}

/// An async validator built from a closure. See [`from_async_fn`].
pub struct AsyncFnValidator<F> {
    f: F,
}

impl<F, Fut> AsyncValidate for AsyncFnValidator<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), FieldErrors>> + Send + 'static,
{
    fn validate(&self, value: &Value) -> BoxFuture<'static, Result<(), FieldErrors>> {
        (self.f)(value.clone()).boxed()
    }
}

impl<F> fmt::Debug for AsyncFnValidator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncFnValidator").finish_non_exhaustive()
    }
}

/// Wrap an async closure as an [`AsyncValidate`].
///
/// The closure receives an owned copy of the value.
///
/// # Examples
///
/// ```rust
/// use formtree_validator::foundation::{from_async_fn, AsyncValidate, FieldErrors, ValidationError};
/// use formtree_validator::value::Value;
///
/// let taken = from_async_fn(|value: Value| async move {
///     if value.as_str() == Some("admin") {
///         Err(FieldErrors::from(ValidationError::new("taken", "Username is taken")))
///     } else {
///         Ok(())
///     }
/// });
///
/// let verdict = futures::executor::block_on(taken.validate(&Value::from("admin")));
/// assert!(verdict.is_err());
/// ```
pub fn from_async_fn<F, Fut>(f: F) -> AsyncFnValidator<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), FieldErrors>> + Send + 'static,
{
    AsyncFnValidator { f }
}
