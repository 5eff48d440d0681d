//! Per-call-site error handler.
//!
//! A [`Handler`] carries an operation label plus the context accumulated at
//! one call site, and applies it to failures in three ways:
//!
//! | Method | Effect on `Err` | Effect on `Ok` |
//! |--------|-----------------|----------------|
//! | [`check`](Handler::check) | logs one record, returns `true` | returns `false` |
//! | [`wrap`](Handler::wrap) | returns a [`WrappedError`] | passes the value through |
//! | [`must`](Handler::must) | logs a fatal record, then escalates | returns the value |
//!
//! Context is copied into a [`WrappedError`] at wrap time, so attaching more
//! context afterwards never changes errors already produced.
//!
//! # Threading
//!
//! A handler belongs to one unit of work on one thread. Attaching context
//! needs `&mut self`, so sharing a handler across threads requires wrapping it
//! in a `Mutex`; giving each task its own handler is usually simpler.
//!
//! # Examples
//!
//! ```
//! use error_annotate::Handler;
//!
//! let handler = Handler::new("api.request")
//!     .with("endpoint", "/users")
//!     .with("method", "GET");
//!
//! let response: Result<(), &str> = Err("status 500");
//! let err = handler.wrap(response, "request failed").unwrap_err();
//!
//! assert_eq!(
//!     err.to_string(),
//!     "api.request: request failed [endpoint=/users, method=GET] -> status 500"
//! );
//! ```
use core::fmt::Display;

use crate::fatal;
use crate::sink::{self, CallSite, LogRecord, Severity};
use crate::types::{BoxError, ContextMap, ContextValue, WrapResult, WrappedError};

/// Message used by [`Handler::must`] for the escalated error.
pub const CRITICAL_MESSAGE: &str = "critical error";

/// Message used by [`try_op`] when the operation fails.
pub const FAILED_MESSAGE: &str = "operation failed";

/// Accumulates an operation label and context for one unit of work.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Handler {
    operation: String,
    context: ContextMap,
}

impl Handler {
    /// Creates a handler with an empty context.
    #[inline]
    pub fn new<O: Into<String>>(operation: O) -> Self {
        Self { operation: operation.into(), context: ContextMap::new() }
    }

    /// Sets `key` to `value`, overwriting any previous value.
    #[inline]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<ContextValue>,
    {
        self.context.insert(key, value);
        self
    }

    /// Merges all `entries`, overwriting on key collision.
    #[inline]
    pub fn with_map<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ContextValue>,
    {
        self.context.merge(entries);
        self
    }

    /// In-place form of [`with`](Handler::with).
    #[inline]
    pub fn insert<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<ContextValue>,
    {
        self.context.insert(key, value);
        self
    }

    /// In-place form of [`with_map`](Handler::with_map).
    #[inline]
    pub fn insert_all<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ContextValue>,
    {
        self.context.merge(entries);
        self
    }

    #[inline]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    #[inline]
    pub fn context(&self) -> &ContextMap {
        &self.context
    }

    /// Logs `result`'s error, if any, and reports whether there was one.
    ///
    /// The record names the caller's file and line. The error itself is left
    /// untouched; the caller still decides what to do with it.
    #[track_caller]
    pub fn check<T, E: Display>(&self, result: &Result<T, E>) -> bool {
        self.check_at(CallSite::caller(), result)
    }

    /// [`check`](Handler::check) with an explicit call site.
    pub fn check_at<T, E: Display>(&self, site: CallSite, result: &Result<T, E>) -> bool {
        match result {
            Ok(_) => false,
            Err(err) => {
                sink::emit(&LogRecord::new(
                    Severity::Normal,
                    site,
                    &self.operation,
                    err.to_string(),
                    &self.context,
                ));
                true
            },
        }
    }

    /// Returns the success value or escalates the error.
    ///
    /// On `Err`, wraps it with [`CRITICAL_MESSAGE`], logs a fatal record naming
    /// the caller, and panics with a
    /// [`FatalEscalation`](crate::fatal::FatalEscalation) payload. See
    /// [`fatal::recover`](crate::fatal::recover) for a recovery boundary.
    #[track_caller]
    pub fn must<T, E: Into<BoxError>>(&self, result: Result<T, E>) -> T {
        self.must_at(CallSite::caller(), result)
    }

    /// [`must`](Handler::must) with an explicit call site.
    ///
    /// The panic itself is attributed to the caller of this method.
    #[track_caller]
    pub fn must_at<T, E: Into<BoxError>>(&self, site: CallSite, result: Result<T, E>) -> T {
        match result {
            Ok(value) => value,
            Err(err) => {
                let wrapped = self.wrap_err(err, CRITICAL_MESSAGE);
                sink::emit(&LogRecord::new(
                    Severity::Fatal,
                    site,
                    &self.operation,
                    wrapped.to_string(),
                    &self.context,
                ));
                fatal::escalate(site, wrapped)
            },
        }
    }

    /// Wraps `result`'s error with this handler's operation and context.
    ///
    /// `Ok` passes through unchanged. Never logs.
    #[inline]
    pub fn wrap<T, E, M>(&self, result: Result<T, E>, message: M) -> WrapResult<T>
    where
        E: Into<BoxError>,
        M: Into<String>,
    {
        result.map_err(|err| self.wrap_err(err, message))
    }

    /// Wraps an error that is known to be present.
    pub fn wrap_err<E, M>(&self, err: E, message: M) -> WrappedError
    where
        E: Into<BoxError>,
        M: Into<String>,
    {
        WrappedError::new(
            self.operation.clone(),
            message,
            self.context.clone(),
            Some(err.into()),
        )
    }
}

/// Runs `f` and wraps its failure with [`FAILED_MESSAGE`] under `operation`.
pub fn try_op<T, E, O, F>(operation: O, f: F) -> WrapResult<T>
where
    E: Into<BoxError>,
    O: Into<String>,
    F: FnOnce() -> Result<T, E>,
{
    let handler = Handler::new(operation);
    handler.wrap(f(), FAILED_MESSAGE)
}

/// Runs `f` and escalates its failure under `operation`.
///
/// Returns the success value; never returns on failure.
#[track_caller]
pub fn must_do<T, E, O, F>(operation: O, f: F) -> T
where
    E: Into<BoxError>,
    O: Into<String>,
    F: FnOnce() -> Result<T, E>,
{
    let handler = Handler::new(operation);
    handler.must(f())
}
