use crate::common::CaptureSink;
use error_annotate::sink::{with_sink, CallSite, Severity};
use error_annotate::{fatal, must_do, try_op, ContextMap, ContextValue, Handler};
use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq)]
struct Refused(u16);

impl fmt::Display for Refused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "refused on port {}", self.0)
    }
}

impl Error for Refused {}

#[test]
fn with_and_with_map_accumulate_context() {
    let h = Handler::new("test")
        .with("key1", "value1")
        .with_map([("key2", "value2")]);

    assert_eq!(h.context().get("key1"), Some(&ContextValue::from("value1")));
    assert_eq!(h.context().get("key2"), Some(&ContextValue::from("value2")));
}

#[test]
fn attach_overwrites_existing_key() {
    let h = Handler::new("test").with("a", 1).with("b", 2);
    let expected: ContextMap = [("a", 1), ("b", 2)].into_iter().collect();
    assert_eq!(h.context(), &expected);

    let h = h.with("a", 3);
    let expected: ContextMap = [("a", 3), ("b", 2)].into_iter().collect();
    assert_eq!(h.context(), &expected);
}

#[test]
fn in_place_insert_matches_fluent_form() {
    let mut in_place = Handler::new("test");
    in_place.insert("a", 1).insert_all([("b", 2), ("c", 3)]);

    let fluent = Handler::new("test").with("a", 1).with_map([("b", 2), ("c", 3)]);
    assert_eq!(in_place, fluent);
}

#[test]
fn handlers_with_same_operation_are_independent() {
    let first = Handler::new("db.query").with("table", "users");
    let second = Handler::new("db.query");

    assert_eq!(first.operation(), second.operation());
    assert!(second.context().is_empty());
}

#[test]
fn wrap_preserves_cause_and_operation() {
    let h = Handler::new("db.connect").with("host", "db1");
    let err = h.wrap(Err::<(), _>(Refused(5432)), "connect failed").unwrap_err();

    assert_eq!(err.operation(), "db.connect");
    assert_eq!(err.message(), "connect failed");
    assert_eq!(err.cause().and_then(|c| c.downcast_ref::<Refused>()), Some(&Refused(5432)));
    assert_eq!(err.to_string(), "db.connect: connect failed [host=db1] -> refused on port 5432");
}

#[test]
fn wrap_passes_ok_through() {
    let h = Handler::new("test");
    let value = h.wrap(Ok::<_, Refused>(42), "unused").unwrap();
    assert_eq!(value, 42);
}

#[test]
fn wrap_copies_context_at_wrap_time() {
    let h = Handler::new("test").with("key", "before");
    let err = h.wrap_err("boom", "wrapped");

    let h = h.with("key", "after").with("late", true);
    assert_eq!(err.context().get("key"), Some(&ContextValue::from("before")));
    assert!(!err.context().contains_key("late"));
    assert_eq!(h.context().len(), 2);
}

#[test]
fn wrap_does_not_log() {
    let capture = CaptureSink::new();
    with_sink(capture.clone(), || {
        let _ = Handler::new("test").wrap(Err::<(), _>("boom"), "wrapped");
    });
    assert_eq!(capture.len(), 0);
}

#[test]
fn check_on_ok_returns_false_without_logging() {
    let capture = CaptureSink::new();
    let checked = with_sink(capture.clone(), || Handler::new("test").check(&Ok::<(), &str>(())));

    assert!(!checked);
    assert_eq!(capture.len(), 0);
}

#[test]
fn check_on_err_logs_once_with_caller_location() {
    let capture = CaptureSink::new();
    let h = Handler::new("api.request").with("endpoint", "/users");
    let result: Result<(), &str> = Err("status 500");

    let expected_line = line!() + 1;
    let checked = with_sink(capture.clone(), || h.check(&result));

    assert!(checked);
    assert_eq!(capture.severities(), [Severity::Normal]);
    assert_eq!(
        capture.lines(),
        [format!(
            "{}:{} - op=api.request, error=status 500, context={{endpoint=/users}}",
            file!(),
            expected_line
        )]
    );
    // The error is still owned by the caller.
    assert_eq!(result, Err("status 500"));
}

#[test]
fn check_at_uses_injected_site() {
    let capture = CaptureSink::new();
    let site = CallSite::new("src/orders.rs", 17);

    with_sink(capture.clone(), || {
        Handler::new("orders.load").check_at(site, &Err::<(), _>(Refused(80)))
    });

    assert_eq!(
        capture.lines(),
        ["src/orders.rs:17 - op=orders.load, error=refused on port 80, context={}"]
    );
}

#[test]
fn must_on_ok_returns_value_without_logging() {
    let capture = CaptureSink::new();
    let value = with_sink(capture.clone(), || Handler::new("test").must(Ok::<_, &str>(5)));

    assert_eq!(value, 5);
    assert_eq!(capture.len(), 0);
}

#[test]
fn must_on_err_logs_fatal_and_escalates() {
    let capture = CaptureSink::new();
    let h = Handler::new("payment.process").with("amount", 10);

    let expected_line = line!() + 2;
    let escalation = with_sink(capture.clone(), || {
        fatal::recover(|| h.must(Err::<(), _>(Refused(443))))
    })
    .unwrap_err();

    let expected = format!(
        "{}:{} - payment.process: critical error [amount=10] -> refused on port 443",
        file!(),
        expected_line
    );
    assert_eq!(capture.severities(), [Severity::Fatal]);
    assert_eq!(capture.lines(), [expected.clone()]);
    assert_eq!(escalation.to_string(), expected);
    assert_eq!(escalation.site(), CallSite::new(file!(), expected_line));

    let wrapped = escalation.error();
    assert_eq!(wrapped.operation(), "payment.process");
    assert_eq!(wrapped.message(), "critical error");
    assert_eq!(wrapped.extract_as::<Refused>(), Some(&Refused(443)));
}

#[test]
fn must_never_returns_normally_on_err() {
    let escalated = std::panic::catch_unwind(|| {
        with_sink(CaptureSink::new(), || Handler::new("test").must(Err::<(), _>("error")))
    });
    assert!(escalated.is_err());
}

#[test]
fn try_op_wraps_failure_with_default_message() {
    let err = try_op("x", || Err::<(), _>(Refused(1))).unwrap_err();

    assert_eq!(err.operation(), "x");
    assert_eq!(err.message(), "operation failed");
    assert!(err.context().is_empty());
    assert_eq!(err.cause().and_then(|c| c.downcast_ref::<Refused>()), Some(&Refused(1)));
}

#[test]
fn try_op_returns_success_value() {
    assert_eq!(try_op("x", || Ok::<_, Refused>("done")).unwrap(), "done");
}

#[test]
fn must_do_escalates_failure() {
    let capture = CaptureSink::new();
    let escalation = with_sink(capture.clone(), || {
        fatal::recover(|| must_do("x", || Err::<(), _>("invalid credit card")))
    })
    .unwrap_err();

    assert_eq!(escalation.error().to_string(), "x: critical error -> invalid credit card");
    assert_eq!(escalation.site().file(), file!());
    assert_eq!(capture.len(), 1);
}

#[test]
fn must_do_success_has_no_side_effect() {
    let capture = CaptureSink::new();
    let value = with_sink(capture.clone(), || must_do("x", || Ok::<_, &str>("paid")));

    assert_eq!(value, "paid");
    assert_eq!(capture.len(), 0);
}
