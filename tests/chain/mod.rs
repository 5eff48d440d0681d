use error_annotate::{
    annotation_of, chain, context_of, extract_as, matches_kind, operation_of, Annotated,
    ContextMap, Handler, WrappedError,
};
use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug, PartialEq)]
enum StoreError {
    NotFound,
    Locked,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("not found"),
            Self::Locked => f.write_str("locked"),
        }
    }
}

impl Error for StoreError {}

fn three_deep() -> WrappedError {
    let inner = Handler::new("store.get")
        .with("key", "user:1")
        .wrap_err(StoreError::NotFound, "lookup failed");
    Handler::new("api.request")
        .with("endpoint", "/users/1")
        .wrap_err(inner, "request failed")
}

#[test]
fn iter_walks_outermost_first() {
    let err = three_deep();
    let rendered: Vec<String> = chain::iter(&err).map(|e| e.to_string()).collect();

    assert_eq!(
        rendered,
        [
            "api.request: request failed [endpoint=/users/1] -> store.get: lookup failed [key=user:1] -> not found",
            "store.get: lookup failed [key=user:1] -> not found",
            "not found",
        ]
    );
}

#[test]
fn matches_kind_finds_target_at_any_depth() {
    let err = three_deep();

    assert!(matches_kind(&err, &StoreError::NotFound));
    assert!(!matches_kind(&err, &StoreError::Locked));
    assert!(err.matches_kind(&StoreError::NotFound));
}

#[test]
fn matches_kind_includes_the_error_itself() {
    assert!(matches_kind(&StoreError::Locked, &StoreError::Locked));
}

#[test]
fn matches_by_supports_custom_rules() {
    let base = io::Error::new(io::ErrorKind::TimedOut, "timeout");
    let err = Handler::new("net.read").wrap_err(base, "read failed");

    assert!(chain::matches_by(&err, |e| {
        e.downcast_ref::<io::Error>().map(io::Error::kind) == Some(io::ErrorKind::TimedOut)
    }));
}

#[test]
fn extract_as_finds_innermost_type() {
    let err = three_deep();

    assert_eq!(extract_as::<StoreError>(&err), Some(&StoreError::NotFound));
    assert!(extract_as::<io::Error>(&err).is_none());
}

#[test]
fn extract_as_returns_outermost_match_first() {
    let err = three_deep();
    let found = err.extract_as::<WrappedError>().unwrap();
    assert_eq!(found.operation(), "api.request");
}

#[test]
fn context_and_operation_come_from_outermost_wrapper() {
    let err = three_deep();

    assert_eq!(operation_of(&err), "api.request");
    let ctx = context_of(&err).unwrap();
    assert!(ctx.contains_key("endpoint"));
    assert!(!ctx.contains_key("key"));
}

#[test]
fn lookups_see_through_foreign_wrappers() {
    #[derive(Debug)]
    struct Outer(WrappedError);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("outer")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    let err = Outer(Handler::new("db.query").with("retries", 3).wrap_err("timeout", "failed"));
    let retries = context_of(&err).and_then(|c| c.get("retries")).and_then(|v| v.as_i64());

    assert_eq!(operation_of(&err), "db.query");
    assert_eq!(retries, Some(3));
}

#[test]
fn plain_errors_have_no_annotations() {
    let err = io::Error::new(io::ErrorKind::Other, "plain");

    assert!(context_of(&err).is_none());
    assert_eq!(operation_of(&err), "");
}

#[test]
fn unwrap_and_root_cause() {
    let err = three_deep();

    let next = chain::unwrap(&err).unwrap();
    assert_eq!(operation_of(next), "store.get");
    assert!(chain::unwrap(chain::root_cause(&err)).is_none());
    assert_eq!(chain::root_cause(&err).to_string(), "not found");
}

#[derive(Debug)]
struct QueryError {
    table: &'static str,
    context: ContextMap,
}

impl QueryError {
    fn new(table: &'static str) -> Self {
        let mut context = ContextMap::new();
        context.insert("table", table);
        Self { table, context }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "query on {} failed", self.table)
    }
}

impl Error for QueryError {}

impl Annotated for QueryError {
    fn operation(&self) -> &str {
        "db.query"
    }

    fn context(&self) -> &ContextMap {
        &self.context
    }
}

#[test]
fn annotation_of_finds_custom_annotated_errors() {
    let err = QueryError::new("users");

    let found = annotation_of::<QueryError>(&err).unwrap();
    assert_eq!(found.operation(), "db.query");
    assert_eq!(found.context().get("table").and_then(|v| v.as_str()), Some("users"));
}

#[test]
fn annotation_of_takes_the_outermost_annotation() {
    let err = Handler::new("api.request")
        .with("endpoint", "/users")
        .wrap_err(QueryError::new("users"), "request failed");

    let found = annotation_of::<QueryError>(&err).unwrap();
    assert_eq!(found.operation(), "api.request");
    assert!(found.context().contains_key("endpoint"));

    let inner = chain::unwrap(&err).unwrap();
    assert_eq!(annotation_of::<QueryError>(inner).unwrap().operation(), "db.query");
}

#[test]
fn annotation_of_ignores_plain_errors() {
    let err = io::Error::new(io::ErrorKind::Other, "plain");
    assert!(annotation_of::<QueryError>(&err).is_none());
}
