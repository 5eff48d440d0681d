//! Dynamically-typed values stored in an error context.
//!
//! Context entries accept "any" value from the caller, but storing trait objects
//! would make rendering and comparison non-deterministic. [`ContextValue`] is a
//! closed set of variants that covers the common primitives, with a
//! [`Debug`](core::fmt::Debug)-string fallback for everything else.
//!
//! # Examples
//!
//! ```
//! use error_annotate::ContextValue;
//!
//! assert_eq!(ContextValue::from(3).to_string(), "3");
//! assert_eq!(ContextValue::from("users").to_string(), "users");
//! assert_eq!(ContextValue::debug(&Some(1)).to_string(), "Some(1)");
//! ```
use core::fmt::{self, Debug, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single context value.
///
/// With the `serde` feature values serialize untagged, as bare JSON scalars.
/// Deserializing picks the first variant that fits, so a `UInt` that fits in
/// `i64` comes back as `Int` and a `Debug` string comes back as `Str`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    /// Pre-rendered `Debug` output of a value outside the other variants.
    Debug(String),
}

impl ContextValue {
    /// Captures any `Debug` value as its debug rendering.
    #[inline]
    pub fn debug<T: Debug + ?Sized>(value: &T) -> Self {
        Self::Debug(format!("{:?}", value))
    }

    /// Returns the string payload for `Str` and `Debug` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) | Self::Debug(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v),
            Self::UInt(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::UInt(v) => Some(v),
            Self::Int(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => Display::fmt(v, f),
            Self::Int(v) => Display::fmt(v, f),
            Self::UInt(v) => Display::fmt(v, f),
            Self::Float(v) => Display::fmt(v, f),
            Self::Str(s) | Self::Debug(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ContextValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Int(value as i64)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ContextValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::UInt(value as u64)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for ContextValue {
    #[inline]
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for ContextValue {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ContextValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for ContextValue {
    #[inline]
    fn from(value: char) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<&str> for ContextValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for ContextValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for ContextValue {
    #[inline]
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<std::borrow::Cow<'_, str>> for ContextValue {
    #[inline]
    fn from(value: std::borrow::Cow<'_, str>) -> Self {
        Self::Str(value.into_owned())
    }
}
