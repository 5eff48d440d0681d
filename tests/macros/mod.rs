use error_annotate::{context_map, handler, ContextMap, ContextValue};

#[test]
fn handler_macro_with_identifier_keys() {
    let h = handler!("db.query", table = "users", retries = 3,);

    assert_eq!(h.operation(), "db.query");
    assert_eq!(h.context().get("retries"), Some(&ContextValue::Int(3)));
    assert_eq!(h.context().get("table"), Some(&ContextValue::from("users")));
}

#[test]
fn handler_macro_with_literal_keys() {
    let h = handler!("db.query", "db.host" => "primary", "db.port" => 5432u16);
    assert_eq!(h.context().to_string(), "{db.host=primary, db.port=5432}");
}

#[test]
fn handler_macro_without_context() {
    let h = handler!(String::from("noop"));
    assert_eq!(h.operation(), "noop");
    assert!(h.context().is_empty());
}

#[test]
fn context_map_macro_overwrites_duplicates() {
    let ctx = context_map! { "a" => 1, "b" => "two", "a" => 3 };
    assert_eq!(ctx.len(), 2);
    assert_eq!(ctx.get("a"), Some(&ContextValue::Int(3)));

    let empty: ContextMap = context_map!();
    assert!(empty.is_empty());
}
