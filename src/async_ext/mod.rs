//! Async extensions.
//!
//! This module provides the async counterparts of [`Handler::wrap`](crate::Handler::wrap)
//! and [`try_op`](crate::try_op). `check` and `must` have no async form; call
//! them on the awaited result.
//!
//! # Feature Flag
//!
//! Requires the `async` feature to be enabled:
//!
//! ```toml
//! [dependencies]
//! error-annotate = { version = "0.1", features = ["async"] }
//! ```
//!
//! # Examples
//!
//! ```ignore
//! use error_annotate::async_ext::FutureWrapExt;
//!
//! async fn fetch_user(id: u64) -> Result<User, WrappedError> {
//!     let handler = Handler::new("user.fetch").with("user_id", id);
//!     fetch_from_db(id).wrap_op(&handler, "fetching user from database").await
//! }
//! ```

mod context_future;
mod future_ext;

pub use context_future::WrapFuture;
pub use future_ext::{try_op_async, FutureWrapExt};
