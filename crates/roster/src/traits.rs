//! Traits that connect host record types to the engine.

use std::fmt::Debug;

use crate::value::{Timestamp, Value};

/// Field access for records shown in a list.
///
/// Usually derived with `#[derive(Listable)]`, but straightforward to write
/// by hand:
///
/// ```
/// use roster::{Listable, Number, Value};
///
/// struct Company {
///     id: u64,
///     name: String,
///     active: bool,
/// }
///
/// impl Listable for Company {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "id" => Value::Number(Number::U64(self.id)),
///             "name" => Value::String(&self.name),
///             "active" => Value::Bool(self.active),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Listable {
    /// Returns the value of `field`, or [`Value::None`] if the field is
    /// unknown or null on this record.
    fn field_value(&self, field: &str) -> Value<'_>;
}

impl<L: Listable + ?Sized> Listable for &L {
    fn field_value(&self, field: &str) -> Value<'_> {
        (**self).field_value(field)
    }
}

/// The set of columns a list can be sorted by.
///
/// Implement this on a fieldless enum so that an unsupported sort column
/// cannot be expressed at all.
///
/// ```
/// use roster::SortKey;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum ChannelSort {
///     Name,
///     CreatedAt,
/// }
///
/// impl SortKey for ChannelSort {
///     fn field(&self) -> &'static str {
///         match self {
///             ChannelSort::Name => "name",
///             ChannelSort::CreatedAt => "created_at",
///         }
///     }
/// }
/// ```
pub trait SortKey: Copy + Eq + Debug {
    /// Record field this key sorts by.
    fn field(&self) -> &'static str;
}

/// Maps an enum-typed field to a stable discriminant.
///
/// Used by `#[list(Enum)]` fields. Pick explicit values rather than relying
/// on declaration order so filters survive reordering.
pub trait ListEnum {
    /// Discriminant of this variant.
    fn list_discriminant(&self) -> u32;
}

/// Converts a datetime-like field into a [`Timestamp`].
///
/// Used by `#[list(Timestamp)]` fields.
pub trait ListTimestamp {
    /// Converts this value to a [`Timestamp`].
    fn list_timestamp(&self) -> Timestamp;
}

impl ListTimestamp for i64 {
    fn list_timestamp(&self) -> Timestamp {
        Timestamp::from_millis(*self)
    }
}

impl ListTimestamp for Timestamp {
    fn list_timestamp(&self) -> Timestamp {
        *self
    }
}
