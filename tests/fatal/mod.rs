use crate::common::CaptureSink;
use error_annotate::sink::with_sink;
use error_annotate::{fatal, Handler};
use std::error::Error;
use std::panic;

#[test]
fn recover_passes_through_normal_completion() {
    assert_eq!(fatal::recover(|| 3 + 4).unwrap(), 7);
}

#[test]
fn recover_catches_escalation_payload() {
    let escalation = with_sink(CaptureSink::new(), || {
        fatal::recover(|| Handler::new("job.run").with("job", 9).must(Err::<(), _>("crashed")))
    })
    .unwrap_err();

    assert_eq!(escalation.error().context().get("job").and_then(|v| v.as_u64()), Some(9));
    assert_eq!(
        escalation.source().map(|e| e.to_string()).as_deref(),
        Some("job.run: critical error [job=9] -> crashed")
    );
    assert_eq!(escalation.into_error().operation(), "job.run");
}

#[test]
fn recover_resumes_unrelated_panics() {
    let outer = panic::catch_unwind(|| fatal::recover(|| panic!("unrelated")));
    let payload = outer.unwrap_err();

    assert_eq!(payload.downcast_ref::<&str>(), Some(&"unrelated"));
}

#[test]
fn escalation_is_a_panic_payload() {
    let payload = panic::catch_unwind(|| {
        with_sink(CaptureSink::new(), || Handler::new("test").must(Err::<(), _>("error")))
    })
    .unwrap_err();

    let escalation = payload.downcast_ref::<error_annotate::FatalEscalation>().unwrap();
    assert_eq!(escalation.error().message(), "critical error");
}

#[test]
fn escalation_is_thread_local() {
    let handle = std::thread::spawn(|| {
        with_sink(CaptureSink::new(), || Handler::new("worker").must(Err::<(), _>("boom")))
    });

    assert!(handle.join().is_err());
    // The spawning thread keeps running.
    assert_eq!(fatal::recover(|| "alive").unwrap(), "alive");
}
