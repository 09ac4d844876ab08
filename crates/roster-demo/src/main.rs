//! roster-demo: drive a lead list from the command line.
//!
//! Loads a JSON array of leads, applies the search, status filter and sort
//! given on the command line, then pages through the result the way a
//! scrolling list would.
//!
//! ```text
//! roster-demo --file crates/roster-demo/data/leads.json --search acme --pages 2
//! roster-demo --file leads.json --status won --sort created --desc --json
//! ```

mod leads;
mod tracing_setup;

use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use roster::{Dir, ListQueryEngine, PagingSettings};
use tracing::debug;

use crate::leads::{lead_config, load_leads, load_paging, Lead, LeadSort, Status, STATUS_FILTER};

#[derive(Parser, Debug)]
#[command(name = "roster-demo", version, about = "Search, filter, sort and page a lead list")]
struct Cli {
    /// JSON array of leads
    #[arg(short, long)]
    file: PathBuf,

    /// Free-text search over name and company (digits also match ids)
    #[arg(short, long)]
    search: Option<String>,

    /// Only show leads with this status
    #[arg(long, value_enum)]
    status: Option<Status>,

    /// Sort column
    #[arg(long, value_enum, default_value_t = LeadSort::Id)]
    sort: LeadSort,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Paging settings file (`page_size`, `load_delay_ms`)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Rows per page, overriding the settings file
    #[arg(long)]
    page_size: Option<usize>,

    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pages: usize,

    /// Print the final view as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_setup::init_tracing(cli.debug)?;
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let leads = load_leads(&cli.file)?;

    let mut paging = match &cli.settings {
        Some(path) => load_paging(path)?,
        None => PagingSettings::default(),
    };
    if let Some(page_size) = cli.page_size {
        paging.page_size = page_size;
    }

    let config = lead_config(cli.sort, &paging).context("invalid list configuration")?;
    let mut list = ListQueryEngine::new(config);

    if let Some(term) = &cli.search {
        list.set_search_term(term);
    }
    if let Some(status) = cli.status {
        list.set_field_filter(STATUS_FILTER, Some(status.as_str()))?;
    }
    let dir = if cli.desc { Dir::Desc } else { Dir::Asc };
    list.sort_by(cli.sort, dir);

    let mut shown = 0;
    for page in 1..=cli.pages.max(1) {
        if page > 1 {
            let Some(ticket) = list.begin_load_more(&leads) else {
                debug!(page, "no more rows to load");
                break;
            };
            if paging.load_delay_ms > 0 {
                thread::sleep(paging.load_delay());
            }
            list.complete_load_more(ticket, &leads);
        }

        if !cli.json {
            let view = list.compute_view(&leads);
            for lead in &view[shown..] {
                print_row(lead);
            }
            shown = view.len();
        }
    }

    if cli.json {
        let snapshot = list.snapshot(&leads);
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let filtered = list.filtered_len(&leads);
    let mut footer = format!("{shown} of {filtered} leads");
    if list.has_more(&leads) {
        footer.push_str(", more available");
    }
    if let Some(summary) = list.filter_summary() {
        footer.push_str(&format!(" ({summary})"));
    }
    println!("{footer}");
    debug!(shown, filtered, total = leads.len(), "done");
    Ok(())
}

fn print_row(lead: &Lead) {
    println!(
        "{:>5}  {:<8} {:<12} {}",
        lead.id,
        lead.status().as_str(),
        lead.company.as_deref().unwrap_or("-"),
        lead.name
    );
}
