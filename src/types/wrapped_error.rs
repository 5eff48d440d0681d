//! The error value produced by [`Handler::wrap`](crate::Handler::wrap).
//!
//! A [`WrappedError`] bundles the operation that failed, a human-readable
//! message, a copy of the handler's context at wrap time and, optionally, the
//! error it wraps. It renders as:
//!
//! ```text
//! <operation>: <message> [k1=v1, k2=v2] -> <cause>
//! ```
//!
//! The bracketed list is omitted for an empty context and the arrow segment is
//! omitted when there is no cause. Keys render in lexicographic order.
//!
//! # Examples
//!
//! ```
//! use error_annotate::{ContextMap, WrappedError};
//!
//! let context: ContextMap = [("retries", 3)].into_iter().collect();
//! let err = WrappedError::new("db.query", "failed", context, Some("timeout".into()));
//!
//! assert_eq!(err.to_string(), "db.query: failed [retries=3] -> timeout");
//! assert_eq!(err.operation(), "db.query");
//! assert_eq!(err.cause().map(|c| c.to_string()), Some("timeout".to_string()));
//! ```
use core::fmt::{self, Display};
use std::error::Error;

use crate::chain;
use crate::types::{BoxError, ContextMap};

/// An error annotated with an operation label, a message and key/value context.
#[must_use]
#[derive(Debug)]
pub struct WrappedError {
    operation: String,
    message: String,
    context: ContextMap,
    cause: Option<BoxError>,
}

impl WrappedError {
    /// Builds a wrapped error from its parts. No validation is performed.
    pub fn new<O, M>(operation: O, message: M, context: ContextMap, cause: Option<BoxError>) -> Self
    where
        O: Into<String>,
        M: Into<String>,
    {
        Self { operation: operation.into(), message: message.into(), context, cause }
    }

    /// Label of the logical action that failed, e.g. `"db.query"`.
    #[inline]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Context captured when the error was wrapped.
    #[inline]
    pub fn context(&self) -> &ContextMap {
        &self.context
    }

    /// The directly wrapped error, one level down the chain.
    #[inline]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Consumes the error, returning the wrapped cause.
    #[inline]
    pub fn into_cause(self) -> Option<BoxError> {
        self.cause
    }

    /// Iterates this error and every cause below it, outermost first.
    #[inline]
    pub fn chain(&self) -> chain::Chain<'_> {
        chain::iter(self)
    }

    /// The innermost error of the chain (`self` when there is no cause).
    #[inline]
    pub fn root_cause(&self) -> &(dyn Error + 'static) {
        chain::root_cause(self)
    }

    /// Returns true if this error or any of its causes equals `target`.
    #[inline]
    pub fn matches_kind<T>(&self, target: &T) -> bool
    where
        T: Error + PartialEq + 'static,
    {
        chain::matches_kind(self, target)
    }

    /// Returns the first error in the chain (including `self`) of type `T`.
    #[inline]
    pub fn extract_as<T: Error + 'static>(&self) -> Option<&T> {
        chain::extract_as(self)
    }
}

impl Display for WrappedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.operation, self.message)?;
        if !self.context.is_empty() {
            f.write_str(" [")?;
            self.context.write_entries(f)?;
            f.write_str("]")?;
        }
        if let Some(cause) = &self.cause {
            write!(f, " -> {}", cause)?;
        }
        Ok(())
    }
}

impl Error for WrappedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for WrappedError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("WrappedError", 4)?;
        state.serialize_field("operation", &self.operation)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("context", &self.context)?;
        state.serialize_field("cause", &self.cause.as_ref().map(|c| c.to_string()))?;
        state.end()
    }
}
