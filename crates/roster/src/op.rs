//! Comparison operators for clause filters.

use std::cmp::Ordering;

/// How a clause filter compares a record field against the active filter value.
///
/// - **Any type**: `Eq`, `Ne`
/// - **String**: `StartsWith`, `EndsWith`, `Contains`, `Regex`
/// - **Number/Timestamp**: `Gt`, `Gte`, `Lt`, `Lte`, plus `Before`/`After`
/// - **Enum**: `In`
/// - **Bool**: `Is`
///
/// String operators compare case-insensitively, matching the behaviour of
/// the free-text search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// String starts with prefix.
    StartsWith,
    /// String ends with suffix.
    EndsWith,
    /// String contains substring.
    Contains,
    /// String matches regular expression.
    Regex,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Alias for `Lt`, reads better on timestamps.
    Before,
    /// Alias for `Gt`, reads better on timestamps.
    After,
    /// Value is one of the given set.
    In,
    /// Alias for `Eq`, reads better on flags.
    Is,
}

impl Op {
    /// Folds aliases into their canonical operator.
    pub fn normalize(self) -> Op {
        match self {
            Op::Before => Op::Lt,
            Op::After => Op::Gt,
            Op::Is => Op::Eq,
            other => other,
        }
    }

    /// Evaluates an ordering-based operator.
    ///
    /// Non-ordering operators (string matching, `In`, `Regex`) return `false`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self.normalize() {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Short name used in filter summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::StartsWith => "starts with",
            Op::EndsWith => "ends with",
            Op::Contains => "contains",
            Op::Regex => "matches",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Before => "before",
            Op::After => "after",
            Op::In => "in",
            Op::Is => "is",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
