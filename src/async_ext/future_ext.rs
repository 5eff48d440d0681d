//! Extension trait for `Future<Output = Result<T, E>>`.
//!
//! Provides `.wrap_op()` for futures, mirroring the sync
//! [`ResultExt`](crate::traits::ResultExt) trait, plus the async form of
//! [`try_op`](crate::try_op).

use core::future::Future;

use crate::handler::{Handler, FAILED_MESSAGE};
use crate::types::{BoxError, WrapResult};

use super::context_future::WrapFuture;

/// Extension trait for annotating the error of async `Result`-returning futures.
///
/// # Examples
///
/// ```rust,no_run
/// use error_annotate::async_ext::FutureWrapExt;
/// use error_annotate::{Handler, WrappedError};
///
/// #[derive(Debug)]
/// struct User;
///
/// async fn fetch_from_db(_id: u64) -> Result<User, std::io::Error> {
///     Err(std::io::Error::other("connection reset"))
/// }
///
/// async fn fetch_user(id: u64) -> Result<User, WrappedError> {
///     let handler = Handler::new("user.fetch").with("user_id", id);
///     fetch_from_db(id).wrap_op(&handler, "fetching user").await
/// }
/// ```
pub trait FutureWrapExt<T, E>: Future<Output = Result<T, E>> + Sized {
    /// Wraps the future's error with `handler`'s operation and context.
    fn wrap_op<M: Into<String>>(self, handler: &Handler, message: M) -> WrapFuture<Self>;
}

impl<Fut, T, E> FutureWrapExt<T, E> for Fut
where
    Fut: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    #[inline]
    fn wrap_op<M: Into<String>>(self, handler: &Handler, message: M) -> WrapFuture<Self> {
        WrapFuture::new(self, handler, message)
    }
}

/// Awaits `future` and wraps its failure under `operation`.
///
/// # Examples
///
/// ```rust
/// use error_annotate::async_ext::try_op_async;
///
/// async fn example() {
///     let err = try_op_async("db.query", async { Err::<(), _>("timeout") })
///         .await
///         .unwrap_err();
///     assert_eq!(err.message(), "operation failed");
/// }
/// ```
pub async fn try_op_async<T, E, O, Fut>(operation: O, future: Fut) -> WrapResult<T>
where
    E: Into<BoxError>,
    O: Into<String>,
    Fut: Future<Output = Result<T, E>>,
{
    let handler = Handler::new(operation);
    future.wrap_op(&handler, FAILED_MESSAGE).await
}
