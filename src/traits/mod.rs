//! Extension traits.
//!
//! - [`ResultExt`]: apply a [`Handler`](crate::Handler) to a `Result` in method position
//! - [`Annotated`]: operation and context accessors shared by annotated errors
//!
//! # Examples
//!
//! ```
//! use error_annotate::traits::ResultExt;
//! use error_annotate::Handler;
//!
//! let handler = Handler::new("queue.push").with("queue", "jobs");
//! let result: Result<u32, &str> = Ok(7);
//! assert_eq!(result.wrap_op(&handler, "push failed").unwrap(), 7);
//! ```

pub mod annotated;
pub mod result_ext;

pub use annotated::Annotated;
pub use result_ext::ResultExt;
