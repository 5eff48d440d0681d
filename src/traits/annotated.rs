//! Capability shared by errors that carry an operation label and context.
//!
//! [`WrappedError`] implements [`Annotated`]. Error types defined elsewhere can
//! implement it too and be found with
//! [`chain::annotation_of`](crate::chain::annotation_of).
//!
//! # Examples
//!
//! ```
//! use error_annotate::traits::Annotated;
//! use error_annotate::{chain, ContextMap};
//! use std::fmt;
//!
//! #[derive(Debug)]
//! struct QueryError {
//!     context: ContextMap,
//! }
//!
//! impl fmt::Display for QueryError {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str("query error")
//!     }
//! }
//!
//! impl std::error::Error for QueryError {}
//!
//! impl Annotated for QueryError {
//!     fn operation(&self) -> &str {
//!         "db.query"
//!     }
//!
//!     fn context(&self) -> &ContextMap {
//!         &self.context
//!     }
//! }
//!
//! let err = QueryError { context: ContextMap::new() };
//! let found = chain::annotation_of::<QueryError>(&err).unwrap();
//! assert_eq!(found.operation(), "db.query");
//! ```

use crate::types::{ContextMap, WrappedError};

/// Read access to an error's operation label and context.
pub trait Annotated {
    fn operation(&self) -> &str;

    fn context(&self) -> &ContextMap;
}

impl Annotated for WrappedError {
    #[inline]
    fn operation(&self) -> &str {
        WrappedError::operation(self)
    }

    #[inline]
    fn context(&self) -> &ContextMap {
        WrappedError::context(self)
    }
}
