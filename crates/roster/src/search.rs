//! Free-text search across a configured set of fields.

use crate::traits::Listable;
use crate::value::Value;

/// How a search field is matched against the search box text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Case-insensitive substring of a string field.
    Text,
    /// Substring of the stringified number, only when the term itself
    /// parses as a number.
    Numeric,
}

/// One field the search box looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchField {
    /// Record field name.
    pub field: String,
    /// Matching mode.
    pub mode: SearchMode,
}

impl SearchField {
    /// A string field matched by case-insensitive substring.
    pub fn text(field: impl Into<String>) -> Self {
        SearchField {
            field: field.into(),
            mode: SearchMode::Text,
        }
    }

    /// A numeric field (typically an id) matched by digit substring.
    pub fn numeric(field: impl Into<String>) -> Self {
        SearchField {
            field: field.into(),
            mode: SearchMode::Numeric,
        }
    }
}

/// A prepared search term.
///
/// Trimming, lower-casing, and the "is this a number" check happen once
/// when the term is set, not once per record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchTerm {
    raw: String,
    lowered: String,
    numeric: bool,
}

impl SearchTerm {
    /// Prepares `input` for matching. Surrounding whitespace is dropped.
    pub fn new(input: &str) -> Self {
        let raw = input.trim().to_string();
        let lowered = raw.to_lowercase();
        let numeric = !raw.is_empty() && raw.parse::<f64>().is_ok();
        SearchTerm {
            raw,
            lowered,
            numeric,
        }
    }

    /// The trimmed term as typed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// An empty term matches everything.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether the term parses as a number.
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    /// Tests a single field value.
    pub fn matches_value(&self, mode: SearchMode, value: &Value<'_>) -> bool {
        match (mode, value) {
            (SearchMode::Text, Value::String(s)) => s.to_lowercase().contains(&self.lowered),
            (SearchMode::Numeric, Value::Number(n)) if self.numeric => {
                n.to_string().contains(&self.raw)
            }
            _ => false,
        }
    }

    /// Tests a record: empty term, or at least one field matches.
    pub fn matches<T: Listable>(&self, record: &T, fields: &[SearchField]) -> bool {
        self.is_empty()
            || fields
                .iter()
                .any(|f| self.matches_value(f.mode, &record.field_value(&f.field)))
    }
}
