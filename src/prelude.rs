//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use error_annotate::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`handler!`], [`context_map!`]
//! - **Types**: [`Handler`], [`WrappedError`], [`ContextMap`], [`ContextValue`], [`WrapResult`]
//! - **Functions**: [`try_op`], [`must_do`], [`context_of`], [`operation_of`]
//! - **Traits**: [`ResultExt`]
//!
//! # Examples
//!
//! ```
//! use error_annotate::prelude::*;
//!
//! fn read_settings(path: &str) -> WrapResult<String> {
//!     let handler = handler!("settings.read", path = path);
//!     std::fs::read_to_string(path).wrap_op(&handler, "reading settings")
//! }
//!
//! let err = read_settings("missing.toml").unwrap_err();
//! assert_eq!(operation_of(&err), "settings.read");
//! ```

// Macros
pub use crate::{context_map, handler};

// Core types
pub use crate::handler::{must_do, try_op, Handler};
pub use crate::types::{ContextMap, ContextValue, WrapResult, WrappedError};

// Chain helpers
pub use crate::chain::{context_of, operation_of};

// Traits
pub use crate::traits::ResultExt;

#[cfg(feature = "async")]
pub use crate::async_ext::{try_op_async, FutureWrapExt};
