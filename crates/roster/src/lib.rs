//! Roster - client-side filter, sort and incremental pagination for list views.
//!
//! Every list screen in an admin console does the same thing with the
//! records it fetched: narrow them with a search box and a few dropdown
//! filters, sort them by a clicked column, and show them a page at a time
//! as the user scrolls. Roster puts that logic in one engine per list.
//!
//! - Free-text search over chosen fields, case-insensitive, with numeric
//!   fields matched only by numeric terms
//! - Named filters, declarative ([`Op`] on a field) or custom closures,
//!   ANDed together and with the search
//! - Stable single-column sorting with header-click toggling
//! - A growing window with a guarded, optionally delayed, load-more
//!
//! # Quick Start
//!
//! ```rust
//! use roster::{FieldFilter, FilterValue, ListConfig, ListQueryEngine, Listable, SortKey, Value, Number};
//!
//! struct Lead {
//!     id: u32,
//!     name: String,
//!     is_won: bool,
//!     is_lost: bool,
//! }
//!
//! impl Listable for Lead {
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "id" => Value::Number(Number::from(self.id)),
//!             "name" => Value::String(&self.name),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum LeadSort { Id, Name }
//!
//! impl SortKey for LeadSort {
//!     fn field(&self) -> &'static str {
//!         match self { LeadSort::Id => "id", LeadSort::Name => "name" }
//!     }
//! }
//!
//! let status = FieldFilter::custom("status", |lead: &Lead, value: &FilterValue| {
//!     match value.as_str() {
//!         Some("won") => lead.is_won,
//!         Some("lost") => lead.is_lost,
//!         Some("neutral") => !lead.is_won && !lead.is_lost,
//!         _ => true,
//!     }
//! });
//!
//! let config = ListConfig::builder(LeadSort::Id)
//!     .search_text("name")
//!     .search_numeric("id")
//!     .filter(status)
//!     .page_size(10)
//!     .build()
//!     .unwrap();
//!
//! let leads = vec![
//!     Lead { id: 1, name: "Acme".into(), is_won: true, is_lost: false },
//!     Lead { id: 2, name: "Globex".into(), is_won: false, is_lost: true },
//!     Lead { id: 12, name: "Acme East".into(), is_won: true, is_lost: false },
//! ];
//!
//! let mut list = ListQueryEngine::new(config);
//! list.set_field_filter("status", Some("won")).unwrap();
//! list.set_search_term("acme");
//! list.set_sort(LeadSort::Id); // second click on the active column: descending
//!
//! let ids: Vec<u32> = list.compute_view(&leads).iter().map(|l| l.id).collect();
//! assert_eq!(ids, [12, 1]);
//! ```
//!
//! # Deriving field access
//!
//! `#[derive(Listable)]` generates [`Listable`] from field annotations,
//! plus a `pub const` per field name:
//!
//! ```rust
//! use roster::{Listable, Value};
//!
//! #[derive(Listable)]
//! struct Company {
//!     #[list(Number)]
//!     id: u64,
//!     #[list(String)]
//!     name: String,
//!     #[list(String)]
//!     website: Option<String>,
//! }
//!
//! let company = Company { id: 3, name: "Initech".into(), website: None };
//! assert_eq!(company.field_value(Company::NAME), Value::String("Initech"));
//! assert_eq!(company.field_value(Company::WEBSITE), Value::None);
//! ```

mod config;
mod engine;
mod error;
mod filter;
mod op;
mod ordering;
mod search;
mod traits;
mod value;
mod view;

pub use config::{ListConfig, ListConfigBuilder, PagingSettings, DEFAULT_PAGE_SIZE};
pub use engine::{ListQueryEngine, LoadState, LoadTicket};
pub use error::{Result, RosterError};
pub use filter::{clause_matches, FieldFilter, FilterValue};
pub use op::Op;
pub use ordering::{compare_sort_values, sort_records, Dir};
pub use search::{SearchField, SearchMode, SearchTerm};
pub use traits::{ListEnum, ListTimestamp, Listable, SortKey};
pub use value::{Number, Timestamp, Value};
pub use view::{ListView, SortState};

pub use roster_macros::Listable;
