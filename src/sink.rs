//! Log sinks for [`Handler::check`](crate::Handler::check) and
//! [`Handler::must`](crate::Handler::must).
//!
//! Each of those calls writes exactly one [`LogRecord`] to the active sink. The
//! active sink is resolved in this order:
//!
//! 1. the thread-scoped sink installed by [`with_sink`],
//! 2. the process-wide sink installed by [`set_global_sink`],
//! 3. [`DefaultSink`]: [`TracingSink`] once a `tracing` dispatcher is set,
//!    [`StderrSink`] otherwise.
//!
//! Records render as one line:
//!
//! ```text
//! src/repo.rs:42 - op=db.query, error=timeout, context={retries=3}   (normal)
//! src/repo.rs:57 - db.query: critical error [retries=3] -> timeout   (fatal)
//! ```
//!
//! # Examples
//!
//! ```
//! use error_annotate::sink::{with_sink, LogRecord, LogSink};
//! use error_annotate::Handler;
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Default)]
//! struct Capture(Mutex<Vec<String>>);
//!
//! impl LogSink for Capture {
//!     fn write(&self, record: &LogRecord<'_>) {
//!         self.0.lock().unwrap().push(record.to_string());
//!     }
//! }
//!
//! let capture = Arc::new(Capture::default());
//! with_sink(capture.clone(), || {
//!     Handler::new("db.query").check(&Err::<(), _>("timeout"));
//! });
//!
//! let lines = capture.0.lock().unwrap();
//! assert_eq!(lines.len(), 1);
//! assert!(lines[0].ends_with(" - op=db.query, error=timeout, context={}"));
//! ```
use core::fmt::{self, Display};
use std::cell::RefCell;
use std::panic::Location;
use std::sync::{Arc, PoisonError, RwLock};

use crate::types::ContextMap;

/// Source position of the code that called into this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    file: &'static str,
    line: u32,
}

impl CallSite {
    #[inline]
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the caller of the enclosing `#[track_caller]` function.
    #[inline]
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    #[inline]
    pub fn file(&self) -> &'static str {
        self.file
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl From<&'static Location<'static>> for CallSite {
    #[inline]
    fn from(location: &'static Location<'static>) -> Self {
        Self { file: location.file(), line: location.line() }
    }
}

impl Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Whether a record comes from `check` or from a fatal escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Normal,
    Fatal,
}

/// One log line emitted by a handler.
#[derive(Debug)]
pub struct LogRecord<'a> {
    severity: Severity,
    site: CallSite,
    operation: &'a str,
    error: String,
    context: &'a ContextMap,
}

impl<'a> LogRecord<'a> {
    pub(crate) fn new(
        severity: Severity,
        site: CallSite,
        operation: &'a str,
        error: String,
        context: &'a ContextMap,
    ) -> Self {
        Self { severity, site, operation, error, context }
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[inline]
    pub fn site(&self) -> CallSite {
        self.site
    }

    #[inline]
    pub fn operation(&self) -> &str {
        self.operation
    }

    /// Rendered error text. For fatal records this is the wrapped error.
    #[inline]
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Handler context at the time of the call.
    #[inline]
    pub fn context(&self) -> &ContextMap {
        self.context
    }
}

impl Display for LogRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Normal => write!(
                f,
                "{} - op={}, error={}, context={}",
                self.site, self.operation, self.error, self.context
            ),
            Severity::Fatal => write!(f, "{} - {}", self.site, self.error),
        }
    }
}

/// Destination for handler log records.
///
/// Implementations must be cheap and must not panic; `write` runs on the
/// thread that called `check`/`must`.
pub trait LogSink: Send + Sync {
    fn write(&self, record: &LogRecord<'_>);
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    #[inline]
    fn write(&self, record: &LogRecord<'_>) {
        (**self).write(record)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    #[inline]
    fn write(&self, record: &LogRecord<'_>) {
        (**self).write(record)
    }
}

/// Writes each record as a line on standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write(&self, record: &LogRecord<'_>) {
        eprintln!("{}", record);
    }
}

/// Forwards records to the `tracing` dispatcher as `ERROR` events.
///
/// Events carry `file`, `line`, `operation`, `context` and `fatal` fields and
/// use the rendered line as their message.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[cfg(feature = "tracing")]
impl LogSink for TracingSink {
    fn write(&self, record: &LogRecord<'_>) {
        let site = record.site();
        tracing::error!(
            target: "error_annotate",
            file = site.file(),
            line = site.line(),
            operation = record.operation(),
            context = %record.context(),
            fatal = record.severity() == Severity::Fatal,
            "{}",
            record
        );
    }
}

type SharedSink = Arc<dyn LogSink>;

static GLOBAL_SINK: RwLock<Option<SharedSink>> = RwLock::new(None);

thread_local! {
    static SCOPED_SINK: RefCell<Option<SharedSink>> = const { RefCell::new(None) };
}

/// Installs `sink` as the process-wide sink, replacing any previous one.
pub fn set_global_sink<S: LogSink + 'static>(sink: S) {
    let mut slot = GLOBAL_SINK.write().unwrap_or_else(PoisonError::into_inner);
    *slot = Some(Arc::new(sink));
}

/// Removes the process-wide sink, falling back to the default one.
pub fn reset_global_sink() {
    let mut slot = GLOBAL_SINK.write().unwrap_or_else(PoisonError::into_inner);
    *slot = None;
}

/// Runs `f` with `sink` as the active sink for the current thread.
///
/// The previous scoped sink is restored when `f` returns or unwinds, so a
/// fatal escalation inside `f` is still logged to `sink`.
pub fn with_sink<S, F, R>(sink: S, f: F) -> R
where
    S: LogSink + 'static,
    F: FnOnce() -> R,
{
    struct Restore(Option<SharedSink>);

    impl Drop for Restore {
        fn drop(&mut self) {
            let previous = self.0.take();
            SCOPED_SINK.with(|slot| *slot.borrow_mut() = previous);
        }
    }

    let previous = SCOPED_SINK.with(|slot| slot.borrow_mut().replace(Arc::new(sink)));
    let _restore = Restore(previous);
    f()
}

/// Writes `record` to the active sink.
pub(crate) fn emit(record: &LogRecord<'_>) {
    // Clone the handle out so a sink that logs through this crate does not
    // re-enter a held borrow or lock.
    let scoped = SCOPED_SINK.with(|slot| slot.borrow().clone());
    let active = scoped.or_else(|| {
        GLOBAL_SINK.read().unwrap_or_else(PoisonError::into_inner).clone()
    });

    match active {
        Some(sink) => sink.write(record),
        None => DefaultSink.write(record),
    }
}

/// Sink used when neither a scoped nor a global sink is installed.
///
/// With the `tracing` feature it forwards to [`TracingSink`] once a
/// dispatcher has been set, and writes to stderr before that, so records
/// are never silently dropped by the no-op dispatcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSink;

impl DefaultSink {
    /// Whether records currently go to `tracing` rather than stderr.
    #[inline]
    pub fn forwards_to_tracing(&self) -> bool {
        #[cfg(feature = "tracing")]
        {
            tracing::dispatcher::has_been_set()
        }
        #[cfg(not(feature = "tracing"))]
        {
            false
        }
    }
}

impl LogSink for DefaultSink {
    fn write(&self, record: &LogRecord<'_>) {
        #[cfg(feature = "tracing")]
        {
            if self.forwards_to_tracing() {
                TracingSink.write(record);
                return;
            }
        }
        StderrSink.write(record)
    }
}
