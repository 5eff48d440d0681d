//! Attach an operation label and key/value context to errors.
//!
//! A [`Handler`] is created per unit of work, collects context, and then
//! either logs a failure ([`Handler::check`]), wraps it into a
//! [`WrappedError`] ([`Handler::wrap`]) or escalates it to a fatal panic
//! ([`Handler::must`]). The helpers in [`chain`] recover the annotations from
//! anywhere in a cause chain.
//!
//! # Examples
//!
//! ## Wrapping
//!
//! ```
//! use error_annotate::{try_op, Handler};
//!
//! let handler = Handler::new("db.query").with("retries", 3);
//! let err = handler.wrap(Err::<(), _>("timeout"), "failed").unwrap_err();
//! assert_eq!(err.to_string(), "db.query: failed [retries=3] -> timeout");
//!
//! let err = try_op("db.connect", || Err::<(), _>("refused")).unwrap_err();
//! assert_eq!(err.to_string(), "db.connect: operation failed -> refused");
//! ```
//!
//! ## Inspecting a chain
//!
//! ```
//! use error_annotate::{context_of, operation_of, Handler};
//! use std::io;
//!
//! let base = io::Error::new(io::ErrorKind::NotFound, "no such table");
//! let err = Handler::new("db.query").with("table", "users").wrap_err(base, "query failed");
//!
//! assert_eq!(operation_of(&err), "db.query");
//! assert_eq!(context_of(&err).and_then(|c| c.get("table")).map(|v| v.to_string()),
//!            Some("users".to_string()));
//! assert!(err.extract_as::<io::Error>().is_some());
//! ```
//!
//! ## Fatal escalation
//!
//! ```
//! use error_annotate::{fatal, must_do};
//!
//! let value = must_do("payment.process", || Ok::<_, &str>(10));
//! assert_eq!(value, 10);
//!
//! let escalation = fatal::recover(|| must_do("payment.process", || Err::<(), _>("declined")));
//! assert!(escalation.is_err());
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Cause-chain traversal and annotation lookup
pub mod chain;
/// Fatal escalation payload and recovery boundary
pub mod fatal;
/// Per-call-site handler and the `try_op` / `must_do` helpers
pub mod handler;
/// Macros for building handlers and context maps
pub mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Log sinks and records
pub mod sink;
/// Extension traits
pub mod traits;
/// Context values, context maps and the wrapped error
pub mod types;

/// Async extensions (requires `async` feature)
#[cfg(feature = "async")]
pub mod async_ext;

pub use chain::{annotation_of, context_of, extract_as, matches_kind, operation_of};
pub use fatal::FatalEscalation;
pub use handler::{must_do, try_op, Handler};
pub use sink::{CallSite, DefaultSink, LogRecord, LogSink, Severity};
pub use traits::*;
pub use types::{BoxError, ContextMap, ContextValue, WrapResult, WrappedError};
