//! Cause-chain traversal.
//!
//! Every error in this crate exposes its cause through
//! [`std::error::Error::source`], so the whole chain can be walked without
//! knowing the concrete types involved. The helpers here look for a target by
//! equality ([`matches_kind`]), by type ([`extract_as`]) or for the annotation
//! carried by the first [`WrappedError`] ([`context_of`], [`operation_of`]).
//!
//! # Examples
//!
//! ```
//! use error_annotate::{chain, Handler};
//! use std::io;
//!
//! let base = io::Error::new(io::ErrorKind::TimedOut, "timeout");
//! let inner = Handler::new("db.query").with("retries", 3).wrap_err(base, "query failed");
//! let outer = Handler::new("api.request").wrap_err(inner, "request failed");
//!
//! assert_eq!(chain::iter(&outer).count(), 3);
//! assert_eq!(chain::operation_of(&outer), "api.request");
//! assert_eq!(
//!     chain::extract_as::<io::Error>(&outer).map(|e| e.kind()),
//!     Some(io::ErrorKind::TimedOut)
//! );
//! ```
use core::iter::FusedIterator;
use std::error::Error;

use crate::traits::Annotated;
use crate::types::{ContextMap, WrappedError};

/// Iterator over an error and its causes, outermost first.
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

/// Starts a chain walk at `err`.
#[inline]
pub fn iter<'a>(err: &'a (dyn Error + 'static)) -> Chain<'a> {
    Chain { next: Some(err) }
}

/// Unwraps one level, returning the direct cause of `err`.
#[inline]
pub fn unwrap<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a (dyn Error + 'static)> {
    err.source()
}

/// Returns the innermost error of the chain.
pub fn root_cause<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    iter(err).last().unwrap_or(err)
}

/// Returns the first non-`None` result of `f` along the chain.
pub fn find_map<'a, T, F>(err: &'a (dyn Error + 'static), f: F) -> Option<T>
where
    F: FnMut(&'a (dyn Error + 'static)) -> Option<T>,
{
    iter(err).find_map(f)
}

/// Returns true if any error in the chain, `err` included, equals `target`.
pub fn matches_kind<T>(err: &(dyn Error + 'static), target: &T) -> bool
where
    T: Error + PartialEq + 'static,
{
    iter(err).any(|link| link.downcast_ref::<T>() == Some(target))
}

/// Returns true if any error in the chain satisfies `predicate`.
///
/// Use this for matching rules other than equality, e.g. comparing an
/// [`io::ErrorKind`](std::io::ErrorKind).
pub fn matches_by<F>(err: &(dyn Error + 'static), predicate: F) -> bool
where
    F: FnMut(&(dyn Error + 'static)) -> bool,
{
    iter(err).any(predicate)
}

/// Returns the first error in the chain whose concrete type is `T`.
pub fn extract_as<'a, T: Error + 'static>(err: &'a (dyn Error + 'static)) -> Option<&'a T> {
    find_map(err, |link| link.downcast_ref::<T>())
}

/// Context of the outermost [`WrappedError`] in the chain.
///
/// Returns `None` for chains that contain no wrapped error.
pub fn context_of<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a ContextMap> {
    extract_as::<WrappedError>(err).map(WrappedError::context)
}

/// Operation of the outermost [`WrappedError`] in the chain, or `""`.
pub fn operation_of<'a>(err: &'a (dyn Error + 'static)) -> &'a str {
    extract_as::<WrappedError>(err).map_or("", WrappedError::operation)
}

/// First annotated error in the chain: either a [`WrappedError`] or a `T`.
///
/// Lets error types defined outside this crate take part in annotation
/// lookups by implementing [`Annotated`].
pub fn annotation_of<'a, T>(err: &'a (dyn Error + 'static)) -> Option<&'a dyn Annotated>
where
    T: Annotated + Error + 'static,
{
    find_map(err, |link| {
        link.downcast_ref::<T>()
            .map(|own| own as &dyn Annotated)
            .or_else(|| link.downcast_ref::<WrappedError>().map(|w| w as &dyn Annotated))
    })
}
