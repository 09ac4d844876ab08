//! List configuration.
//!
//! [`ListConfig`] describes one list view: which fields the search box
//! looks at, which named filters exist, the default sort column, and the
//! page size. [`PagingSettings`] is the host-tunable part that can come
//! from a settings file.

use std::num::NonZeroUsize;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, RosterError};
use crate::filter::FieldFilter;
use crate::search::SearchField;
use crate::traits::SortKey;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Configuration for one list view.
pub struct ListConfig<T, K> {
    pub(crate) search_fields: Vec<SearchField>,
    pub(crate) filters: Vec<FieldFilter<T>>,
    pub(crate) default_sort: K,
    pub(crate) page_size: NonZeroUsize,
}

impl<T, K: SortKey> ListConfig<T, K> {
    /// Starts a configuration sorted by `default_sort`, ascending.
    pub fn builder(default_sort: K) -> ListConfigBuilder<T, K> {
        ListConfigBuilder {
            search_fields: Vec::new(),
            filters: Vec::new(),
            default_sort,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Fields the search box matches against.
    pub fn search_fields(&self) -> &[SearchField] {
        &self.search_fields
    }

    /// Registered filters, in registration order.
    pub fn filters(&self) -> &[FieldFilter<T>] {
        &self.filters
    }

    /// Sort key applied at construction.
    pub fn default_sort(&self) -> K {
        self.default_sort
    }

    /// Rows added per load-more batch.
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub(crate) fn filter_index(&self, name: &str) -> Option<usize> {
        self.filters.iter().position(|f| f.name() == name)
    }
}

impl<T, K: std::fmt::Debug> std::fmt::Debug for ListConfig<T, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListConfig")
            .field("search_fields", &self.search_fields)
            .field("filters", &self.filters)
            .field("default_sort", &self.default_sort)
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// Fluent builder for [`ListConfig`].
///
/// ```
/// use roster::{FieldFilter, ListConfig, Listable, Op, SortKey, Value};
///
/// # struct Stage { name: String }
/// # impl Listable for Stage {
/// #     fn field_value(&self, field: &str) -> Value<'_> {
/// #         match field { "name" => Value::String(&self.name), _ => Value::None }
/// #     }
/// # }
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum StageSort { Name, Id }
///
/// impl SortKey for StageSort {
///     fn field(&self) -> &'static str {
///         match self { StageSort::Name => "name", StageSort::Id => "id" }
///     }
/// }
///
/// let config = ListConfig::<Stage, _>::builder(StageSort::Name)
///     .search_text("name")
///     .search_numeric("id")
///     .filter(FieldFilter::clause("funnel", "funnel_id", Op::Eq))
///     .page_size(25)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.page_size().get(), 25);
/// ```
pub struct ListConfigBuilder<T, K> {
    search_fields: Vec<SearchField>,
    filters: Vec<FieldFilter<T>>,
    default_sort: K,
    page_size: usize,
}

impl<T, K: SortKey> ListConfigBuilder<T, K> {
    /// Adds a search field.
    pub fn search(mut self, field: SearchField) -> Self {
        self.search_fields.push(field);
        self
    }

    /// Adds a string field matched by case-insensitive substring.
    pub fn search_text(self, field: &str) -> Self {
        self.search(SearchField::text(field))
    }

    /// Adds a numeric field matched only by numeric search terms.
    pub fn search_numeric(self, field: &str) -> Self {
        self.search(SearchField::numeric(field))
    }

    /// Registers a named filter. It starts inactive.
    pub fn filter(mut self, filter: FieldFilter<T>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Sets the load-more batch size.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Applies host paging settings.
    pub fn paging(self, settings: &PagingSettings) -> Self {
        self.page_size(settings.page_size)
    }

    /// Validates and finishes the configuration.
    pub fn build(self) -> Result<ListConfig<T, K>> {
        let page_size = NonZeroUsize::new(self.page_size).ok_or(RosterError::InvalidPageSize)?;

        for (i, filter) in self.filters.iter().enumerate() {
            if self.filters[..i].iter().any(|f| f.name() == filter.name()) {
                return Err(RosterError::DuplicateFilter(filter.name().to_string()));
            }
        }

        Ok(ListConfig {
            search_fields: self.search_fields,
            filters: self.filters,
            default_sort: self.default_sort,
            page_size,
        })
    }
}

/// Host-level paging knobs.
///
/// ```
/// use roster::PagingSettings;
///
/// let settings = PagingSettings::from_json(r#"{ "page_size": 20, "load_delay_ms": 150 }"#).unwrap();
/// assert_eq!(settings.page_size, 20);
/// assert_eq!(settings.load_delay().as_millis(), 150);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PagingSettings {
    /// Rows per load-more batch.
    pub page_size: usize,
    /// Delay the host waits between starting and completing a load-more.
    pub load_delay_ms: u64,
}

impl Default for PagingSettings {
    fn default() -> Self {
        PagingSettings {
            page_size: DEFAULT_PAGE_SIZE,
            load_delay_ms: 0,
        }
    }
}

impl PagingSettings {
    /// Parses settings from JSON. Missing keys take their defaults.
    pub fn from_json(input: &str) -> Result<Self> {
        let settings: PagingSettings = serde_json::from_str(input)?;
        if settings.page_size == 0 {
            return Err(RosterError::InvalidPageSize);
        }
        Ok(settings)
    }

    /// [`load_delay_ms`](Self::load_delay_ms) as a `Duration`.
    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }
}
