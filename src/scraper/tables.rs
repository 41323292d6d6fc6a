use std::collections::HashSet;

use ::scraper::{Html, Selector};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::extraction::Extraction;
use crate::model::TableDescriptor;
use crate::scraper::dom;

/// Per-position "similar players" and scouting tables on player pages.
/// They duplicate one another and are not useful as standalone tables.
const EXCLUDED_TABLES: [&str; 12] = [
    "similar_GK",
    "similar_DF",
    "similar_FB",
    "similar_MF",
    "similar_AM",
    "similar_FW",
    "scout_summary_GK",
    "scout_summary_DF",
    "scout_summary_FB",
    "scout_summary_MF",
    "scout_summary_AM",
    "scout_summary_FW",
];

/// List the captioned tables on a page, once per distinct caption.
#[instrument(skip(document))]
pub fn scan_tables(document: &Html) -> Extraction<Vec<TableDescriptor>> {
    Extraction::from_result(parse_tables(document), "available tables")
}

fn parse_tables(document: &Html) -> Result<Vec<TableDescriptor>> {
    let table_selector = Selector::parse("table")?;
    let caption_selector = Selector::parse("caption")?;

    let mut seen = HashSet::new();
    let mut tables = Vec::new();
    for table in document.select(&table_selector) {
        let Some(caption) = table.select(&caption_selector).next() else {
            continue;
        };
        let Some(id) = table.value().attr("id") else {
            continue;
        };
        if EXCLUDED_TABLES.contains(&id) {
            continue;
        }
        let caption = dom::element_text(&caption).trim().to_string();
        if seen.insert(caption.clone()) {
            tables.push(TableDescriptor {
                id: id.to_string(),
                caption,
            });
        }
    }

    debug!(count = tables.len(), "found tables");
    Ok(tables)
}
