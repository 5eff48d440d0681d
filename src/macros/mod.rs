//! Shorthand macros for building handlers and context maps.
//!
//! - [`macro@crate::handler`] - Creates a [`Handler`](crate::Handler) and attaches
//!   context in one expression.
//! - [`macro@crate::context_map`] - Builds a [`ContextMap`](crate::ContextMap) from
//!   `key => value` pairs.
//!
//! # Examples
//!
//! ```
//! use error_annotate::{context_map, handler};
//!
//! let h = handler!("db.query", table = "users", retries = 3);
//! let extra = context_map! { "db.host" => "primary", "db.port" => 5432 };
//! let h = h.with_map(extra);
//!
//! assert_eq!(h.context().len(), 4);
//! ```

/// Creates a [`Handler`](crate::Handler) with context attached.
///
/// Keys are written either as identifiers (`key = value`) or, for keys that
/// are not valid identifiers, as string literals (`"db.host" => value`).
///
/// # Examples
///
/// ```
/// use error_annotate::handler;
///
/// let h = handler!("api.request", endpoint = "/users", method = "GET");
/// assert_eq!(h.operation(), "api.request");
/// assert_eq!(h.context().to_string(), "{endpoint=/users, method=GET}");
///
/// let h = handler!("db.query", "db.host" => "primary");
/// assert!(h.context().contains_key("db.host"));
/// ```
#[macro_export]
macro_rules! handler {
    ($op:expr $(,)?) => {
        $crate::Handler::new($op)
    };

    ($op:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $crate::Handler::new($op)$(.with(stringify!($key), $value))+
    };

    ($op:expr, $($key:literal => $value:expr),+ $(,)?) => {
        $crate::Handler::new($op)$(.with($key, $value))+
    };
}

/// Builds a [`ContextMap`](crate::ContextMap) from `key => value` pairs.
///
/// Later pairs overwrite earlier ones with the same key.
///
/// # Examples
///
/// ```
/// use error_annotate::context_map;
///
/// let ctx = context_map! { "user_id" => 42, "admin" => false, "user_id" => 43 };
/// assert_eq!(ctx.to_string(), "{admin=false, user_id=43}");
/// ```
#[macro_export]
macro_rules! context_map {
    () => {
        $crate::ContextMap::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::ContextMap::new();
        $(
            map.insert($key, $value);
        )+
        map
    }};
}
