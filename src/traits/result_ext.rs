//! Extension trait for applying a [`Handler`] to `Result` values.
//!
//! This module provides [`ResultExt`], which reads left-to-right in call chains
//! instead of nesting the result inside a handler call.
//!
//! # Examples
//!
//! ```
//! use error_annotate::traits::ResultExt;
//! use error_annotate::{Handler, WrappedError};
//!
//! fn load_config(handler: &Handler) -> Result<String, WrappedError> {
//!     std::fs::read_to_string("does-not-exist.toml").wrap_op(handler, "loading configuration")
//! }
//!
//! let handler = Handler::new("config.load").with("path", "does-not-exist.toml");
//! let err = load_config(&handler).unwrap_err();
//! assert_eq!(err.operation(), "config.load");
//! ```

use core::fmt::Display;

use crate::handler::Handler;
use crate::types::{BoxError, WrapResult};

/// Extension methods mirroring [`Handler::wrap`], [`Handler::check`] and
/// [`Handler::must`].
pub trait ResultExt<T, E> {
    /// Wraps the error with `handler`'s operation and context.
    ///
    /// # Examples
    ///
    /// ```
    /// use error_annotate::traits::ResultExt;
    /// use error_annotate::Handler;
    ///
    /// let handler = Handler::new("cache.get");
    /// let result: Result<(), &str> = Err("miss");
    /// assert_eq!(
    ///     result.wrap_op(&handler, "lookup failed").unwrap_err().to_string(),
    ///     "cache.get: lookup failed -> miss"
    /// );
    /// ```
    fn wrap_op<M: Into<String>>(self, handler: &Handler, message: M) -> WrapResult<T>;

    /// Like [`wrap_op`](ResultExt::wrap_op), but builds the message only on
    /// failure.
    fn wrap_op_with<F>(self, handler: &Handler, f: F) -> WrapResult<T>
    where
        F: FnOnce() -> String;

    /// Logs the error through `handler`; returns whether there was one.
    #[track_caller]
    fn check_op(&self, handler: &Handler) -> bool;

    /// Returns the value or escalates the error through `handler`.
    #[track_caller]
    fn must_op(self, handler: &Handler) -> T;
}

impl<T, E> ResultExt<T, E> for Result<T, E>
where
    E: Into<BoxError> + Display,
{
    #[inline]
    fn wrap_op<M: Into<String>>(self, handler: &Handler, message: M) -> WrapResult<T> {
        handler.wrap(self, message)
    }

    #[inline]
    fn wrap_op_with<F>(self, handler: &Handler, f: F) -> WrapResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| handler.wrap_err(err, f()))
    }

    #[inline]
    #[track_caller]
    fn check_op(&self, handler: &Handler) -> bool {
        handler.check(self)
    }

    #[inline]
    #[track_caller]
    fn must_op(self, handler: &Handler) -> T {
        handler.must(self)
    }
}
