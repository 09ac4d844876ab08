//! Error types for the roster crate.

use thiserror::Error;

/// Errors raised while configuring a list engine or addressing its filters.
///
/// Computing a view never fails; these only surface at construction time
/// or when a host names a filter that was never registered.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Page size must be at least one.
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// Two filters were registered under the same name.
    #[error("filter '{0}' is registered more than once")]
    DuplicateFilter(String),

    /// A setter referenced a filter name that is not configured.
    #[error("unknown filter '{0}'")]
    UnknownFilter(String),

    /// Paging settings could not be parsed.
    #[error("invalid paging settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}

/// Result type for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;
