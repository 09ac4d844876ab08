//! Serializable snapshot of a list view.
//!
//! [`ListView`] bundles the visible rows with the signals a host needs to
//! draw around them: counts for "showing X of Y", whether a load-more
//! spinner or trigger should be shown, the active sort, and a summary of
//! applied filters.

use serde::Serialize;

use crate::ordering::Dir;

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState {
    /// Record field being sorted on.
    pub field: &'static str,
    /// Sort direction.
    pub dir: Dir,
}

/// The rendered state of a list at one moment.
#[derive(Debug, Clone, Serialize)]
pub struct ListView<R> {
    /// Visible rows, filtered, sorted and windowed.
    pub items: Vec<R>,

    /// Size of the visible window (may exceed `items.len()` near the end).
    pub visible_count: usize,

    /// Rows passing the search term and all active filters.
    pub filtered_count: usize,

    /// Rows supplied by the host before filtering.
    pub total_count: usize,

    /// More filtered rows exist beyond the window.
    pub has_more: bool,

    /// A load-more batch is in flight.
    pub loading_more: bool,

    /// Active sort.
    pub sort: SortState,

    /// Applied filters, e.g. `status='won', search contains 'acme'`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_summary: Option<String>,
}

impl<R> ListView<R> {
    /// Returns true if no rows are visible.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Converts each row, keeping the surrounding signals.
    pub fn map<U>(self, f: impl FnMut(R) -> U) -> ListView<U> {
        ListView {
            items: self.items.into_iter().map(f).collect(),
            visible_count: self.visible_count,
            filtered_count: self.filtered_count,
            total_count: self.total_count,
            has_more: self.has_more,
            loading_more: self.loading_more,
            sort: self.sort,
            filter_summary: self.filter_summary,
        }
    }
}
