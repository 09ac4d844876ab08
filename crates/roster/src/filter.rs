//! Named field filters.
//!
//! A list view usually offers a handful of dropdowns or inputs next to its
//! search box: "status", "company", "id". Each one is a [`FieldFilter`]
//! registered under a name. The host flips it on by setting a
//! [`FilterValue`] and off by setting `None`; every active filter must pass
//! for a record to be shown.

use std::fmt;

use regex::Regex;

use crate::error::Result;
use crate::op::Op;
use crate::traits::Listable;
use crate::value::{Number, Timestamp, Value};

type CustomPredicate<T> = Box<dyn Fn(&T, &FilterValue) -> bool + Send + Sync>;

/// Owned operand of an active filter.
///
/// Unlike [`Value`], which borrows from a record, a `FilterValue` lives in
/// the engine between renders.
#[derive(Debug, Clone)]
pub enum FilterValue {
    /// String operand.
    String(String),
    /// Numeric operand.
    Number(Number),
    /// Timestamp operand.
    Timestamp(Timestamp),
    /// Single enum discriminant.
    Enum(u32),
    /// Set of enum discriminants, for `Op::In`.
    EnumSet(Vec<u32>),
    /// Boolean operand.
    Bool(bool),
    /// Compiled regular expression, for `Op::Regex`.
    Regex(Regex),
}

impl FilterValue {
    /// Compiles a regex operand.
    pub fn regex(pattern: &str) -> Result<Self> {
        Ok(FilterValue::Regex(Regex::new(pattern)?))
    }

    /// Extracts the string operand, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FilterValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for FilterValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FilterValue::String(a), FilterValue::String(b)) => a == b,
            (FilterValue::Number(a), FilterValue::Number(b)) => a == b,
            (FilterValue::Timestamp(a), FilterValue::Timestamp(b)) => a == b,
            (FilterValue::Enum(a), FilterValue::Enum(b)) => a == b,
            (FilterValue::EnumSet(a), FilterValue::EnumSet(b)) => a == b,
            (FilterValue::Bool(a), FilterValue::Bool(b)) => a == b,
            (FilterValue::Regex(a), FilterValue::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::String(s) => write!(f, "'{s}'"),
            FilterValue::Number(n) => write!(f, "{n}"),
            FilterValue::Timestamp(t) => write!(f, "{}", t.as_millis()),
            FilterValue::Enum(d) => write!(f, "#{d}"),
            FilterValue::EnumSet(set) => {
                let parts: Vec<String> = set.iter().map(|d| format!("#{d}")).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            FilterValue::Bool(b) => write!(f, "{b}"),
            FilterValue::Regex(r) => write!(f, "/{}/", r.as_str()),
        }
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::String(s)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::String(s.to_string())
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl From<Number> for FilterValue {
    fn from(n: Number) -> Self {
        FilterValue::Number(n)
    }
}

impl From<Timestamp> for FilterValue {
    fn from(t: Timestamp) -> Self {
        FilterValue::Timestamp(t)
    }
}

impl From<Regex> for FilterValue {
    fn from(r: Regex) -> Self {
        FilterValue::Regex(r)
    }
}

impl From<Vec<u32>> for FilterValue {
    fn from(v: Vec<u32>) -> Self {
        FilterValue::EnumSet(v)
    }
}

macro_rules! filter_value_from_number {
    ($($source:ty),*) => {
        $(
            impl From<$source> for FilterValue {
                fn from(n: $source) -> Self {
                    FilterValue::Number(Number::from(n))
                }
            }
        )*
    };
}

filter_value_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Compares one record field against an operand with an operator.
///
/// Missing fields (`Value::None`) and kind mismatches never match.
pub fn clause_matches(op: Op, field: &Value<'_>, operand: &FilterValue) -> bool {
    match (operand, field) {
        (FilterValue::String(pattern), Value::String(s)) => match_string(op, s, pattern),
        (FilterValue::Regex(regex), Value::String(s)) => op == Op::Regex && regex.is_match(s),
        (FilterValue::Number(want), Value::Number(got)) => got
            .compare(*want)
            .is_some_and(|ordering| op.eval_ordering(ordering)),
        (FilterValue::Timestamp(want), Value::Timestamp(got)) => {
            op.eval_ordering(got.cmp(want))
        }
        (FilterValue::Enum(want), Value::Enum(got)) => match op.normalize() {
            Op::Eq => got == want,
            Op::Ne => got != want,
            _ => false,
        },
        (FilterValue::EnumSet(set), Value::Enum(got)) => op == Op::In && set.contains(got),
        (FilterValue::Bool(want), Value::Bool(got)) => match op.normalize() {
            Op::Eq => got == want,
            Op::Ne => got != want,
            _ => false,
        },
        _ => false,
    }
}

fn match_string(op: Op, field: &str, pattern: &str) -> bool {
    let field = field.to_lowercase();
    let pattern = pattern.to_lowercase();
    match op.normalize() {
        Op::Eq => field == pattern,
        Op::Ne => field != pattern,
        Op::StartsWith => field.starts_with(&pattern),
        Op::EndsWith => field.ends_with(&pattern),
        Op::Contains => field.contains(&pattern),
        _ => false,
    }
}

enum Predicate<T> {
    Clause { field: String, op: Op },
    Custom(CustomPredicate<T>),
}

/// A named, switchable filter over records of type `T`.
///
/// # Example
///
/// ```
/// use roster::{FieldFilter, FilterValue, Op};
///
/// struct Lead {
///     is_won: bool,
///     is_lost: bool,
/// }
///
/// // Declarative: compare one field with an operator.
/// let company = FieldFilter::<Lead>::clause("company", "company_id", Op::Eq);
///
/// // Custom: the status dropdown spans two flags.
/// let status = FieldFilter::custom("status", |lead: &Lead, value: &FilterValue| {
///     match value.as_str() {
///         Some("won") => lead.is_won,
///         Some("lost") => lead.is_lost,
///         Some("neutral") => !lead.is_won && !lead.is_lost,
///         _ => true,
///     }
/// });
/// # let _ = (company, status);
/// ```
pub struct FieldFilter<T> {
    name: String,
    predicate: Predicate<T>,
}

impl<T> FieldFilter<T> {
    /// Filter that compares `field` against the active value with `op`.
    pub fn clause(name: impl Into<String>, field: impl Into<String>, op: Op) -> Self {
        FieldFilter {
            name: name.into(),
            predicate: Predicate::Clause {
                field: field.into(),
                op,
            },
        }
    }

    /// Filter with caller-supplied logic.
    pub fn custom<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T, &FilterValue) -> bool + Send + Sync + 'static,
    {
        FieldFilter {
            name: name.into(),
            predicate: Predicate::Custom(Box::new(predicate)),
        }
    }

    /// Name the host uses to address this filter.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description of this filter with `value` applied.
    pub fn describe(&self, value: &FilterValue) -> String {
        match &self.predicate {
            Predicate::Clause { op, .. } => format!("{} {op} {value}", self.name),
            Predicate::Custom(_) => format!("{}={value}", self.name),
        }
    }
}

impl<T: Listable> FieldFilter<T> {
    /// Tests one record against this filter with `value` as operand.
    pub fn matches(&self, record: &T, value: &FilterValue) -> bool {
        match &self.predicate {
            Predicate::Clause { field, op } => {
                clause_matches(*op, &record.field_value(field), value)
            }
            Predicate::Custom(predicate) => predicate(record, value),
        }
    }
}

impl<T> fmt::Debug for FieldFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.predicate {
            Predicate::Clause { field, op } => format!("clause({field} {op})"),
            Predicate::Custom(_) => "custom".to_string(),
        };
        f.debug_struct("FieldFilter")
            .field("name", &self.name)
            .field("predicate", &kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: String,
        id: i64,
        active: bool,
        stage: u32,
        note: Option<String>,
    }

    impl Listable for Row {
        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "name" => Value::String(&self.name),
                "id" => Value::Number(Number::I64(self.id)),
                "active" => Value::Bool(self.active),
                "stage" => Value::Enum(self.stage),
                "note" => self.note.as_deref().into(),
                _ => Value::None,
            }
        }
    }

    fn row() -> Row {
        Row {
            name: "Acme Support".to_string(),
            id: 12,
            active: true,
            stage: 2,
            note: None,
        }
    }

    #[test]
    fn string_ops_ignore_case() {
        let name = Value::String("Acme Support");
        assert!(clause_matches(Op::Eq, &name, &"acme support".into()));
        assert!(clause_matches(Op::StartsWith, &name, &"ACME".into()));
        assert!(clause_matches(Op::EndsWith, &name, &"port".into()));
        assert!(clause_matches(Op::Contains, &name, &"me su".into()));
        assert!(!clause_matches(Op::Ne, &name, &"ACME SUPPORT".into()));
    }

    #[test]
    fn numeric_ops() {
        let id = Value::Number(Number::I64(12));
        assert!(clause_matches(Op::Eq, &id, &12u32.into()));
        assert!(clause_matches(Op::Gte, &id, &12.0f64.into()));
        assert!(!clause_matches(Op::Lt, &id, &5i64.into()));
    }

    #[test]
    fn missing_field_never_matches() {
        assert!(!clause_matches(Op::Eq, &Value::None, &"x".into()));
        assert!(!clause_matches(Op::Ne, &Value::None, &"x".into()));
    }

    #[test]
    fn kind_mismatch_never_matches() {
        let id = Value::Number(Number::I64(12));
        assert!(!clause_matches(Op::Eq, &id, &"12".into()));
    }

    #[test]
    fn regex_requires_regex_op() {
        let value = FilterValue::regex(r"^acme\b").unwrap();
        let name = Value::String("acme support");
        assert!(clause_matches(Op::Regex, &name, &value));
        assert!(!clause_matches(Op::Eq, &name, &value));
    }

    #[test]
    fn invalid_regex_is_an_error() {
        assert!(FilterValue::regex("(unclosed").is_err());
    }

    #[test]
    fn enum_set_membership() {
        let stage = Value::Enum(2);
        assert!(clause_matches(Op::In, &stage, &vec![1u32, 2].into()));
        assert!(!clause_matches(Op::In, &stage, &vec![3u32].into()));
        assert!(clause_matches(Op::Ne, &stage, &FilterValue::Enum(1)));
    }

    #[test]
    fn clause_filter_reads_fields() {
        let filter = FieldFilter::<Row>::clause("only-active", "active", Op::Is);
        assert!(filter.matches(&row(), &true.into()));
        assert!(!filter.matches(&row(), &false.into()));

        let note = FieldFilter::<Row>::clause("note", "note", Op::Contains);
        assert!(!note.matches(&row(), &"x".into()));

        let stage = FieldFilter::<Row>::clause("stage", "stage", Op::In);
        assert!(stage.matches(&row(), &vec![2u32].into()));
    }

    #[test]
    fn custom_filter_gets_operand() {
        let filter = FieldFilter::custom("id-parity", |row: &Row, value: &FilterValue| {
            value.as_str() == Some(if row.id % 2 == 0 { "even" } else { "odd" })
        });
        assert!(filter.matches(&row(), &"even".into()));
        assert!(!filter.matches(&row(), &"odd".into()));
    }

    #[test]
    fn describe_filters() {
        let clause = FieldFilter::<Row>::clause("min-id", "id", Op::Gte);
        assert_eq!(clause.describe(&10i64.into()), "min-id >= 10");

        let company = FieldFilter::<Row>::clause("company", "company_id", Op::Eq);
        assert_eq!(company.describe(&3u32.into()), "company = 3");

        let custom = FieldFilter::custom("status", |_: &Row, _: &FilterValue| true);
        assert_eq!(custom.describe(&"won".into()), "status='won'");
    }

    #[test]
    fn filter_value_equality() {
        assert_eq!(FilterValue::from("a"), FilterValue::from("a"));
        assert_ne!(FilterValue::from("1"), FilterValue::from(1i64));
        assert_eq!(
            FilterValue::regex("a+").unwrap(),
            FilterValue::regex("a+").unwrap()
        );
    }
}
