//! Sort direction and per-field comparison.

use std::cmp::Ordering;

use serde::Serialize;

use crate::traits::Listable;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// The opposite direction. Clicking the active column header does this.
    pub fn toggle(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Applies this direction to an ordering.
    ///
    /// `Equal` stays `Equal` in both directions, which keeps ties in input
    /// order under a stable sort.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compares two field values for sorting. Never panics, never fails.
///
/// - strings compare lower-cased
/// - numbers compare numerically; NaN sorts after every other number
/// - `false < true`
/// - a missing value takes the zero value of the other side's kind, so a
///   null name sorts like `""` and a null count like `0`
/// - mismatched kinds order by kind: string, number, timestamp, enum, bool
///
/// Over values of one kind, optionally mixed with missing values, this is a
/// total order. [`sort_records`] fills missing values up front, which keeps
/// the order total for any column.
pub fn compare_sort_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => cmp_ignore_case(a, b),
        (Value::Number(a), Value::Number(b)) => a
            .compare(*b)
            .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan())),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::Enum(a), Value::Enum(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::None, Value::None) => Ordering::Equal,
        (Value::None, other) => compare_sort_values(&other.default_of_kind(), other),
        (other, Value::None) => compare_sort_values(other, &other.default_of_kind()),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::String(_) => 0,
        Value::Number(_) => 1,
        Value::Timestamp(_) => 2,
        Value::Enum(_) => 3,
        Value::Bool(_) => 4,
        Value::None => 5,
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Stable in-place sort of records by one field.
///
/// Missing values become the zero value of the column's first present
/// kind, so every null in a column sorts at the same point.
pub fn sort_records<T: Listable>(records: &mut [&T], field: &str, dir: Dir) {
    let fill = records
        .iter()
        .map(|r| r.field_value(field))
        .find(|v| !v.is_missing())
        .map(|v| v.default_of_kind());

    records.sort_by(|a, b| {
        dir.apply(compare_sort_values(
            &filled_value(*a, field, fill.as_ref()),
            &filled_value(*b, field, fill.as_ref()),
        ))
    });
}

fn filled_value<'a, T: Listable>(
    record: &'a T,
    field: &str,
    fill: Option<&Value<'static>>,
) -> Value<'a> {
    match (record.field_value(field), fill) {
        (Value::None, Some(fill)) => fill.clone(),
        (value, _) => value,
    }
}
