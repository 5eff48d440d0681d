//! Error data types.
//!
//! This module provides the values that flow through the crate: the dynamic
//! [`ContextValue`], the ordered [`ContextMap`] and the [`WrappedError`] that
//! combines them with an operation label and a cause.
//!
//! # Examples
//!
//! ```
//! use error_annotate::{ContextMap, WrappedError};
//!
//! let mut context = ContextMap::new();
//! context.insert("endpoint", "/users");
//!
//! let err = WrappedError::new("api.request", "request failed", context, None);
//! assert_eq!(err.to_string(), "api.request: request failed [endpoint=/users]");
//! ```
use smallvec::SmallVec;

pub mod context_map;
pub mod context_value;
pub mod wrapped_error;

pub use context_map::*;
pub use context_value::*;
pub use wrapped_error::*;

/// Type-erased error stored as the cause of a [`WrappedError`].
///
/// `&str` and `String` convert into it through the standard `From` impls, so
/// ad-hoc failures can be wrapped without defining an error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// SmallVec-backed storage for context entries.
///
/// Uses inline storage for up to 4 entries to avoid heap allocations in the
/// common case where a call site attaches only a few keys.
pub type ContextVec = SmallVec<[(String, ContextValue); 4]>;

/// Result alias for operations that annotate their failures.
///
/// # Type Parameters
///
/// * `T` - The success value type
pub type WrapResult<T> = Result<T, WrappedError>;
