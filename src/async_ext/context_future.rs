//! Future wrapper that annotates the error of a `Result`-returning future.
//!
//! This module provides `WrapFuture`, which wraps a `Future<Output = Result<T, E>>`
//! and turns an `Err` into a [`WrappedError`] carrying a snapshot of a
//! [`Handler`].

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::future::FusedFuture;

use pin_project_lite::pin_project;

use crate::handler::Handler;
use crate::types::{BoxError, WrappedError};

pin_project! {
    /// A Future wrapper that wraps the inner future's error.
    ///
    /// The handler is cloned when the wrapper is created, so context attached
    /// to the original handler afterwards is not seen, matching
    /// [`Handler::wrap`].
    ///
    /// # Cancel Safety
    ///
    /// `WrapFuture` is cancel-safe if the inner future is cancel-safe.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use error_annotate::async_ext::WrapFuture;
    /// use error_annotate::Handler;
    ///
    /// async fn example() {
    ///     let handler = Handler::new("db.query");
    ///     let err = WrapFuture::new(async { Err::<(), _>("timeout") }, &handler, "failed")
    ///         .await
    ///         .unwrap_err();
    ///     assert_eq!(err.to_string(), "db.query: failed -> timeout");
    /// }
    /// ```
    #[must_use = "futures do nothing unless polled"]
    pub struct WrapFuture<Fut> {
        #[pin]
        future: Fut,
        annotation: Option<(Handler, String)>,
    }
}

impl<Fut> WrapFuture<Fut> {
    /// Wraps `future`, snapshotting `handler` and `message` for the error path.
    #[inline]
    pub fn new<M: Into<String>>(future: Fut, handler: &Handler, message: M) -> Self {
        Self { future, annotation: Some((handler.clone(), message.into())) }
    }
}

impl<Fut, T, E> Future for WrapFuture<Fut>
where
    Fut: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    type Output = Result<T, WrappedError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        match this.future.poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(result) => {
                let (handler, message) = this
                    .annotation
                    .take()
                    .expect("WrapFuture polled after completion; this is a bug");
                Poll::Ready(handler.wrap(result, message))
            },
        }
    }
}

impl<Fut, T, E> FusedFuture for WrapFuture<Fut>
where
    Fut: FusedFuture<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    fn is_terminated(&self) -> bool {
        self.annotation.is_none() || self.future.is_terminated()
    }
}
