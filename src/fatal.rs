//! Fatal escalation.
//!
//! [`Handler::must`](crate::Handler::must) and [`must_do`](crate::must_do)
//! turn a failure into a panic whose payload is a [`FatalEscalation`]. This is
//! not an ordinary returned error: it unwinds the current thread until a
//! recovery boundary catches it. Without one, the thread dies, and on the main
//! thread (or with `panic = "abort"`) the whole process goes with it.
//!
//! [`recover`] is that boundary. It catches fatal escalations only and
//! re-raises every other panic unchanged.
//!
//! # Examples
//!
//! ```
//! use error_annotate::{fatal, must_do};
//!
//! let escalation = fatal::recover(|| {
//!     must_do("process.payment", || Err::<(), _>("invalid credit card"))
//! })
//! .unwrap_err();
//!
//! assert_eq!(escalation.error().operation(), "process.payment");
//! assert!(escalation
//!     .to_string()
//!     .ends_with("process.payment: critical error -> invalid credit card"));
//! ```
use core::fmt::{self, Display};
use std::error::Error;
use std::panic::{self, AssertUnwindSafe};

use crate::sink::CallSite;
use crate::types::WrappedError;

/// Panic payload raised by a fatal escalation.
#[derive(Debug)]
pub struct FatalEscalation {
    site: CallSite,
    error: WrappedError,
}

impl FatalEscalation {
    /// Where `must` / `must_do` was called.
    #[inline]
    pub fn site(&self) -> CallSite {
        self.site
    }

    #[inline]
    pub fn error(&self) -> &WrappedError {
        &self.error
    }

    #[inline]
    pub fn into_error(self) -> WrappedError {
        self.error
    }
}

impl Display for FatalEscalation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.site, self.error)
    }
}

impl Error for FatalEscalation {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

/// Unwinds with a [`FatalEscalation`] payload.
///
/// The panic is attributed to the caller of the outermost `#[track_caller]`
/// frame, i.e. the code that called `must` / `must_do`.
#[track_caller]
pub(crate) fn escalate(site: CallSite, error: WrappedError) -> ! {
    panic::panic_any(FatalEscalation { site, error })
}

/// Runs `f`, converting a fatal escalation raised inside it into `Err`.
///
/// Panics that do not carry a [`FatalEscalation`] are resumed. `f` is treated
/// as unwind safe: state it mutates before escalating is left as-is.
pub fn recover<F, T>(f: F) -> Result<T, FatalEscalation>
where
    F: FnOnce() -> T,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<FatalEscalation>() {
            Ok(escalation) => Err(*escalation),
            Err(other) => panic::resume_unwind(other),
        },
    }
}
