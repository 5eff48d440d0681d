//! Key/value context attached to handlers and wrapped errors.
//!
//! [`ContextMap`] keeps its entries sorted by key inside a
//! [`SmallVec`](smallvec::SmallVec), so the handful of entries a call site
//! usually attaches live inline and rendering is always in lexicographic key
//! order.
//!
//! # Examples
//!
//! ```
//! use error_annotate::ContextMap;
//!
//! let mut ctx = ContextMap::new();
//! ctx.insert("table", "users");
//! ctx.insert("retries", 3);
//! ctx.insert("retries", 4);
//!
//! assert_eq!(ctx.len(), 2);
//! assert_eq!(ctx.to_string(), "{retries=4, table=users}");
//! ```
use core::fmt::{self, Display};

use crate::types::{ContextValue, ContextVec};

/// Ordered string → [`ContextValue`] mapping with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextMap {
    entries: ContextVec,
}

impl ContextMap {
    #[inline]
    pub fn new() -> Self {
        Self { entries: ContextVec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sets `key` to `value`, returning the value it replaced.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<ContextValue>
    where
        K: Into<String>,
        V: Into<ContextValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Ok(idx) => Some(core::mem::replace(&mut self.entries[idx].1, value)),
            Err(idx) => {
                self.entries.insert(idx, (key, value));
                None
            },
        }
    }

    /// Merges every entry of `other`, overwriting on key collision.
    pub fn merge<I, K, V>(&mut self, other: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ContextValue>,
    {
        for (key, value) in other {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.position(key).ok().map(|idx| &self.entries[idx].1)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_ok()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &ContextValue)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Writes `k1=v1, k2=v2` without surrounding delimiters.
    pub(crate) fn write_entries(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }

    #[inline]
    fn position(&self, key: &str) -> Result<usize, usize> {
        self.entries.binary_search_by(|(k, _)| k.as_str().cmp(key))
    }
}

impl Display for ContextMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        self.write_entries(f)?;
        f.write_str("}")
    }
}

impl<K, V> FromIterator<(K, V)> for ContextMap
where
    K: Into<String>,
    V: Into<ContextValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.merge(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for ContextMap
where
    K: Into<String>,
    V: Into<ContextValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.merge(iter);
    }
}

impl IntoIterator for ContextMap {
    type Item = (String, ContextValue);
    type IntoIter = smallvec::IntoIter<[(String, ContextValue); 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ContextMap {
    type Item = (&'a str, &'a ContextValue);
    type IntoIter = core::iter::Map<
        core::slice::Iter<'a, (String, ContextValue)>,
        fn(&'a (String, ContextValue)) -> (&'a str, &'a ContextValue),
    >;

    fn into_iter(self) -> Self::IntoIter {
        let as_ref: fn(&'a (String, ContextValue)) -> (&'a str, &'a ContextValue) =
            |(k, v)| (k.as_str(), v);
        self.entries.iter().map(as_ref)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::ContextMap;
    use crate::types::ContextValue;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for ContextMap {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.iter() {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }

    struct ContextMapVisitor;

    impl<'de> Visitor<'de> for ContextMapVisitor {
        type Value = ContextMap;

        fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("a map of context values")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ContextMap, A::Error> {
            let mut map = ContextMap::new();
            while let Some((key, value)) = access.next_entry::<String, ContextValue>()? {
                map.insert(key, value);
            }
            Ok(map)
        }
    }

    impl<'de> Deserialize<'de> for ContextMap {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(ContextMapVisitor)
        }
    }
}
