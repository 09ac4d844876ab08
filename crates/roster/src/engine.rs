//! The list query engine.
//!
//! One [`ListQueryEngine`] backs one list view. The host owns it, calls a
//! setter when the user types, picks a filter or clicks a column header,
//! and calls [`compute_view`](ListQueryEngine::compute_view) with its
//! current records whenever it renders. Scrolling to the bottom calls
//! [`load_more`](ListQueryEngine::load_more), or the two-phase
//! [`begin_load_more`](ListQueryEngine::begin_load_more) /
//! [`complete_load_more`](ListQueryEngine::complete_load_more) pair when
//! the host wants a delay before the next batch appears.
//!
//! # Window rules
//!
//! - The window starts at `page_size` rows.
//! - Any setter puts it back to `page_size` and cancels a pending load.
//! - Load-more grows it by `min(page_size, remaining)`.
//! - The rendered length is `min(visible_count, filtered_len)`.

use tracing::{debug, trace};

use crate::config::ListConfig;
use crate::error::{Result, RosterError};
use crate::filter::FilterValue;
use crate::ordering::{sort_records, Dir};
use crate::search::SearchTerm;
use crate::traits::{Listable, SortKey};
use crate::view::{ListView, SortState};

/// Whether a load-more batch is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing pending.
    #[default]
    Idle,
    /// A batch was started and has not completed yet.
    LoadingMore,
}

/// Proof that a load-more batch was started.
///
/// Hand it back to [`ListQueryEngine::complete_load_more`] once the host's
/// delay has elapsed. A ticket is single-use, and any setter called in
/// between makes it stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a started load-more only appends rows once completed"]
pub struct LoadTicket {
    id: u64,
}

/// Filter, sort and incremental-pagination state for one list view.
///
/// # Example
///
/// ```
/// use roster::{ListConfig, ListQueryEngine, Listable, SortKey, Value};
///
/// struct Funnel { name: String }
///
/// impl Listable for Funnel {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             _ => Value::None,
///         }
///     }
/// }
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct ByName;
///
/// impl SortKey for ByName {
///     fn field(&self) -> &'static str { "name" }
/// }
///
/// let funnels: Vec<Funnel> = ["Onboarding", "Renewals", "Outbound"]
///     .into_iter()
///     .map(|name| Funnel { name: name.to_string() })
///     .collect();
///
/// let config = ListConfig::builder(ByName).search_text("name").page_size(2).build().unwrap();
/// let mut list = ListQueryEngine::new(config);
///
/// let names: Vec<&str> = list.compute_view(&funnels).iter().map(|f| f.name.as_str()).collect();
/// assert_eq!(names, ["Onboarding", "Outbound"]);
///
/// list.set_search_term("  renew ");
/// assert_eq!(list.compute_view(&funnels).len(), 1);
/// ```
pub struct ListQueryEngine<T, K> {
    config: ListConfig<T, K>,
    search: SearchTerm,
    filter_values: Vec<Option<FilterValue>>,
    sort_key: K,
    sort_dir: Dir,
    visible_count: usize,
    pending: Option<u64>,
    next_ticket: u64,
}

impl<T, K: SortKey> ListQueryEngine<T, K> {
    /// Creates an engine in its initial state: no search, all filters
    /// inactive, default sort ascending, one page visible.
    pub fn new(config: ListConfig<T, K>) -> Self {
        let filter_values = vec![None; config.filters.len()];
        ListQueryEngine {
            search: SearchTerm::default(),
            filter_values,
            sort_key: config.default_sort,
            sort_dir: Dir::Asc,
            visible_count: config.page_size.get(),
            pending: None,
            next_ticket: 0,
            config,
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Sets the free-text search term. Whitespace is trimmed and an empty
    /// term turns text search off.
    pub fn set_search_term(&mut self, term: &str) {
        self.search = SearchTerm::new(term);
        self.reset_window("search");
    }

    /// Activates the named filter with `value`, or deactivates it with `None`.
    ///
    /// Unknown names are rejected and leave the engine untouched.
    pub fn set_field_filter<V>(&mut self, name: &str, value: Option<V>) -> Result<()>
    where
        V: Into<FilterValue>,
    {
        let index = self
            .config
            .filter_index(name)
            .ok_or_else(|| RosterError::UnknownFilter(name.to_string()))?;
        self.filter_values[index] = value.map(Into::into);
        self.reset_window("filter");
        Ok(())
    }

    /// Deactivates the named filter.
    pub fn clear_field_filter(&mut self, name: &str) -> Result<()> {
        self.set_field_filter::<FilterValue>(name, None)
    }

    /// Deactivates every filter and clears the search term.
    pub fn clear_filters(&mut self) {
        self.search = SearchTerm::default();
        self.filter_values.iter_mut().for_each(|v| *v = None);
        self.reset_window("clear");
    }

    /// Column-header click: the active key flips direction, a new key
    /// starts ascending.
    pub fn set_sort(&mut self, key: K) {
        if key == self.sort_key {
            self.sort_dir = self.sort_dir.toggle();
        } else {
            self.sort_key = key;
            self.sort_dir = Dir::Asc;
        }
        self.reset_window("sort");
    }

    /// Sets key and direction explicitly, e.g. when restoring a view.
    pub fn sort_by(&mut self, key: K, dir: Dir) {
        self.sort_key = key;
        self.sort_dir = dir;
        self.reset_window("sort");
    }

    fn reset_window(&mut self, cause: &'static str) {
        if self.pending.take().is_some() {
            debug!(cause, "pending load-more superseded");
        }
        self.visible_count = self.config.page_size.get();
        trace!(cause, visible = self.visible_count, "window reset");
    }

    // ========================================================================
    // State
    // ========================================================================

    /// The trimmed search term.
    pub fn search_term(&self) -> &str {
        self.search.as_str()
    }

    /// Active value of the named filter, `None` when inactive or unknown.
    pub fn filter_value(&self, name: &str) -> Option<&FilterValue> {
        self.config
            .filter_index(name)
            .and_then(|i| self.filter_values[i].as_ref())
    }

    /// Active sort key.
    pub fn sort_key(&self) -> K {
        self.sort_key
    }

    /// Active sort direction.
    pub fn sort_dir(&self) -> Dir {
        self.sort_dir
    }

    /// Size of the visible window.
    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Rows per load-more batch.
    pub fn page_size(&self) -> usize {
        self.config.page_size.get()
    }

    /// Current load state.
    pub fn load_state(&self) -> LoadState {
        if self.pending.is_some() {
            LoadState::LoadingMore
        } else {
            LoadState::Idle
        }
    }

    /// Spinner signal: a batch is in flight.
    pub fn is_loading_more(&self) -> bool {
        self.pending.is_some()
    }

    /// The configuration this engine was built from.
    pub fn config(&self) -> &ListConfig<T, K> {
        &self.config
    }

    /// Describes the active search and filters, or `None` when nothing
    /// narrows the list.
    pub fn filter_summary(&self) -> Option<String> {
        let mut parts: Vec<String> = self
            .config
            .filters
            .iter()
            .zip(&self.filter_values)
            .filter_map(|(filter, value)| value.as_ref().map(|v| filter.describe(v)))
            .collect();
        if !self.search.is_empty() {
            parts.push(format!("search contains '{}'", self.search.as_str()));
        }
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

impl<T: Listable, K: SortKey> ListQueryEngine<T, K> {
    // ========================================================================
    // Views
    // ========================================================================

    /// Tests one record against the search term and every active filter.
    pub fn matches(&self, record: &T) -> bool {
        self.config
            .filters
            .iter()
            .zip(&self.filter_values)
            .all(|(filter, value)| value.as_ref().map_or(true, |v| filter.matches(record, v)))
            && self.search.matches(record, &self.config.search_fields)
    }

    /// Number of records passing the search term and every active filter.
    pub fn filtered_len(&self, records: &[T]) -> usize {
        records.iter().filter(|r| self.matches(r)).count()
    }

    /// Filtered and sorted records, without windowing.
    pub fn filtered_sorted<'r>(&self, records: &'r [T]) -> Vec<&'r T> {
        let mut rows: Vec<&T> = records.iter().filter(|r| self.matches(r)).collect();
        sort_records(&mut rows, self.sort_key.field(), self.sort_dir);
        rows
    }

    /// The rows to render: filtered, stably sorted, and cut to the window.
    ///
    /// Takes `&self`; the same records and state always give the same rows.
    pub fn compute_view<'r>(&self, records: &'r [T]) -> Vec<&'r T> {
        let mut rows = self.filtered_sorted(records);
        rows.truncate(self.visible_count);
        rows
    }

    /// More filtered rows exist beyond the window.
    pub fn has_more(&self, records: &[T]) -> bool {
        self.visible_count < self.filtered_len(records)
    }

    /// The visible rows together with counts and signals.
    pub fn snapshot<'r>(&self, records: &'r [T]) -> ListView<&'r T> {
        let mut items = self.filtered_sorted(records);
        let filtered_count = items.len();
        items.truncate(self.visible_count);
        ListView {
            items,
            visible_count: self.visible_count,
            filtered_count,
            total_count: records.len(),
            has_more: self.visible_count < filtered_count,
            loading_more: self.is_loading_more(),
            sort: SortState {
                field: self.sort_key.field(),
                dir: self.sort_dir,
            },
            filter_summary: self.filter_summary(),
        }
    }

    // ========================================================================
    // Incremental loading
    // ========================================================================

    /// Grows the window by one batch. Returns the number of rows added.
    ///
    /// Does nothing while another batch is in flight or when the window
    /// already covers every filtered row.
    pub fn load_more(&mut self, records: &[T]) -> usize {
        match self.begin_load_more(records) {
            Some(ticket) => self.complete_load_more(ticket, records),
            None => 0,
        }
    }

    /// Starts a batch, entering [`LoadState::LoadingMore`].
    ///
    /// Returns `None` if a batch is already in flight or nothing remains.
    pub fn begin_load_more(&mut self, records: &[T]) -> Option<LoadTicket> {
        if self.pending.is_some() {
            trace!("load-more ignored: already loading");
            return None;
        }
        let filtered = self.filtered_len(records);
        if self.visible_count >= filtered {
            trace!(visible = self.visible_count, filtered, "load-more ignored: nothing remains");
            return None;
        }
        let id = self.next_ticket;
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.pending = Some(id);
        debug!(ticket = id, visible = self.visible_count, filtered, "load-more started");
        Some(LoadTicket { id })
    }

    /// Finishes a batch started by [`begin_load_more`](Self::begin_load_more).
    ///
    /// The batch size is worked out against `records` as they are now, so a
    /// collection that changed during the delay is handled correctly.
    /// Stale tickets (superseded by a setter, or already completed) add
    /// nothing. Returns the number of rows added.
    pub fn complete_load_more(&mut self, ticket: LoadTicket, records: &[T]) -> usize {
        if self.pending != Some(ticket.id) {
            debug!(ticket = ticket.id, "stale load-more discarded");
            return 0;
        }
        self.pending = None;

        let filtered = self.filtered_len(records);
        let batch = self
            .config
            .page_size
            .get()
            .min(filtered.saturating_sub(self.visible_count));
        self.visible_count += batch;
        debug!(
            ticket = ticket.id,
            batch,
            visible = self.visible_count,
            filtered,
            "load-more completed"
        );
        batch
    }
}

impl<T, K: std::fmt::Debug> std::fmt::Debug for ListQueryEngine<T, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListQueryEngine")
            .field("search", &self.search)
            .field("filter_values", &self.filter_values)
            .field("sort_key", &self.sort_key)
            .field("sort_dir", &self.sort_dir)
            .field("visible_count", &self.visible_count)
            .field("pending", &self.pending)
            .finish()
    }
}
