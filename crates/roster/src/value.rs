//! Field values as seen by the list engine.
//!
//! A [`Value`] is what a [`Listable`](crate::Listable) record hands back for a
//! field name. Strings are borrowed from the record, so reading a field for
//! a comparison never allocates.

use std::cmp::Ordering;
use std::fmt;

/// One field of one record.
///
/// ```
/// use roster::{Number, Value};
///
/// struct Channel {
///     id: u32,
///     name: String,
///     description: Option<String>,
/// }
///
/// fn field<'a>(channel: &'a Channel, field: &str) -> Value<'a> {
///     match field {
///         "id" => Value::Number(Number::from(channel.id)),
///         "name" => Value::String(&channel.name),
///         "description" => channel.description.as_deref().into(),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Text, borrowed from the record.
    String(&'a str),
    /// Integer or float.
    Number(Number),
    /// Point in time.
    Timestamp(Timestamp),
    /// Discriminant from [`ListEnum`](crate::ListEnum).
    Enum(u32),
    /// Flag.
    Bool(bool),
    /// Null, absent, or a field the record does not expose.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` for [`Value::None`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::None)
    }

    /// The borrowed string, for `String` values.
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Zero value of the same kind: `""`, `0`, the epoch, discriminant `0`
    /// or `false`. A missing value stays missing.
    ///
    /// Sorting substitutes this for a missing field so that nulls line up
    /// with the empty end of the column.
    pub fn default_of_kind(&self) -> Value<'static> {
        match self {
            Value::String(_) => Value::String(""),
            Value::Number(_) => Value::Number(Number::I64(0)),
            Value::Timestamp(_) => Value::Timestamp(Timestamp::default()),
            Value::Enum(_) => Value::Enum(0),
            Value::Bool(_) => Value::Bool(false),
            Value::None => Value::None,
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(s)
    }
}

impl<'a> From<Option<&'a str>> for Value<'a> {
    fn from(s: Option<&'a str>) -> Self {
        s.map_or(Value::None, Value::String)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value<'_> {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Timestamp> for Value<'_> {
    fn from(t: Timestamp) -> Self {
        Value::Timestamp(t)
    }
}

/// A numeric field. Integers keep their exact value; mixed comparisons
/// fall back to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed integer.
    I64(i64),
    /// Unsigned integer.
    U64(u64),
    /// Float, possibly NaN.
    F64(f64),
}

impl Number {
    /// Returns `true` for a NaN float.
    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    fn as_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::I64(a), Number::U64(b)) => Some(i128::from(a).cmp(&i128::from(b))),
            (Number::U64(a), Number::I64(b)) => Some(i128::from(a).cmp(&i128::from(b))),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

// Integral floats print without a fraction so `12.0` is searchable as "12".
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", n as i64)
            }
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! impl_number_from {
    ($($source:ty => $variant:ident($target:ty)),* $(,)?) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

impl_number_from! {
    i8 => I64(i64), i16 => I64(i64), i32 => I64(i64), i64 => I64(i64), isize => I64(i64),
    u8 => U64(u64), u16 => U64(u64), u32 => U64(u64), u64 => U64(u64), usize => U64(u64),
    f32 => F64(f64), f64 => F64(f64),
}

/// Milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a timestamp from milliseconds since the epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Milliseconds since the epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}
