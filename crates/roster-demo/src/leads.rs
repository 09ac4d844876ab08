//! Lead records and the list configuration the demo drives.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use roster::{FieldFilter, FilterValue, ListConfig, Listable, PagingSettings, SortKey};
use serde::{Deserialize, Serialize};

/// Name of the won/lost/neutral filter.
pub const STATUS_FILTER: &str = "status";

/// A sales lead as exported by the CRM.
#[derive(Debug, Clone, Serialize, Deserialize, Listable)]
pub struct Lead {
    #[list(Number)]
    pub id: u32,
    #[list(String)]
    pub name: String,
    #[list(String)]
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub is_won: bool,
    #[serde(default)]
    pub is_lost: bool,
    #[list(Timestamp)]
    #[serde(default)]
    pub created_at: i64,
}

impl Lead {
    pub fn status(&self) -> Status {
        if self.is_won {
            Status::Won
        } else if self.is_lost {
            Status::Lost
        } else {
            Status::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Status {
    Won,
    Lost,
    Neutral,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Won => "won",
            Status::Lost => "lost",
            Status::Neutral => "neutral",
        }
    }
}

/// Sortable columns of the lead list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LeadSort {
    Id,
    Name,
    Created,
}

impl SortKey for LeadSort {
    fn field(&self) -> &'static str {
        match self {
            LeadSort::Id => Lead::ID,
            LeadSort::Name => Lead::NAME,
            LeadSort::Created => Lead::CREATED_AT,
        }
    }
}

fn status_filter() -> FieldFilter<Lead> {
    FieldFilter::custom(STATUS_FILTER, |lead: &Lead, value: &FilterValue| {
        match value.as_str() {
            Some(wanted) => lead.status().as_str() == wanted,
            None => true,
        }
    })
}

/// Builds the lead list configuration: name and company searched as text,
/// id searched as a number, one status filter.
pub fn lead_config(
    default_sort: LeadSort,
    paging: &PagingSettings,
) -> roster::Result<ListConfig<Lead, LeadSort>> {
    ListConfig::builder(default_sort)
        .search_text(Lead::NAME)
        .search_text(Lead::COMPANY)
        .search_numeric(Lead::ID)
        .filter(status_filter())
        .paging(paging)
        .build()
}

/// Reads a JSON array of leads.
pub fn load_leads(path: &Path) -> Result<Vec<Lead>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let leads: Vec<Lead> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of leads", path.display()))?;
    tracing::debug!(count = leads.len(), path = %path.display(), "leads loaded");
    Ok(leads)
}

/// Reads paging settings from a JSON file.
pub fn load_paging(path: &Path) -> Result<PagingSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    PagingSettings::from_json(&raw).with_context(|| format!("invalid settings in {}", path.display()))
}
