use ::scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use crate::error::{FbrefError, Result};
use crate::extraction::Extraction;
use crate::model::{ExtractedTable, UNKNOWN};
use crate::scraper::dom;

/// Header labels that never make it into an extracted table.
const EXCLUDED_HEADERS: [&str; 5] = ["Rank", "Notes", "Day", "Attendance", "Matches"];

/// `data-stat` values of the cells matching [`EXCLUDED_HEADERS`].
const EXCLUDED_STATS: [&str; 5] = ["rank", "notes", "dayofweek", "attendance", "matches"];

/// Columns whose value is the id carried by the cell's link, not its text.
const LINK_ID_STATS: [&str; 2] = ["match_report", "nationality"];

/// Find the table with id `table_id` in `document`.
pub fn locate_table<'a>(document: &'a Html, table_id: &str) -> Result<ElementRef<'a>> {
    dom::find_by_id(document.root_element(), "table", table_id)?.ok_or_else(|| {
        FbrefError::TableNotFound {
            table_id: table_id.to_string(),
        }
    })
}

/// Convert a statistics table into headers and rows of cell text.
///
/// Tables without both a `thead` and a `tbody` come back as
/// [`Extraction::NotFound`].
#[instrument(skip(table), fields(table_id = table.value().attr("id").unwrap_or_default()))]
pub fn table_to_rows(table: ElementRef) -> Extraction<ExtractedTable> {
    Extraction::from_result(parse_table(table), "table")
}

fn parse_table(table: ElementRef) -> Result<ExtractedTable> {
    let head_selector = Selector::parse("thead")?;
    let body_selector = Selector::parse("tbody")?;
    let (Some(head), Some(body)) = (
        table.select(&head_selector).next(),
        table.select(&body_selector).next(),
    ) else {
        return Err(FbrefError::ElementNotFound {
            context: "table head or body",
        });
    };

    let headers = parse_headers(head)?;

    let row_selector = Selector::parse("tr:not(.spacer):not(.blank_table):not(.thead)")?;
    let cell_selector = Selector::parse("td, th")?;
    let mut rows = Vec::new();
    for tr in body.select(&row_selector) {
        let cells = tr
            .select(&cell_selector)
            .filter(|cell| {
                !cell
                    .value()
                    .attr("data-stat")
                    .is_some_and(|stat| EXCLUDED_STATS.contains(&stat))
            })
            .map(|cell| parse_cell(&cell))
            .collect::<Result<Vec<_>>>()?;

        if cells.is_empty() {
            continue;
        }
        if cells.len() != headers.len() {
            debug!(
                expected = headers.len(),
                found = cells.len(),
                "dropping row with mismatched cell count"
            );
            continue;
        }
        rows.push(cells);
    }

    let mut extracted = ExtractedTable { headers, rows };
    extracted.rename_column("Match Report", "Match ID");

    debug!(
        columns = extracted.headers.len(),
        rows = extracted.len(),
        "parsed table"
    );
    Ok(extracted)
}

fn parse_headers(head: ElementRef) -> Result<Vec<String>> {
    let header_selector = Selector::parse("th:not(.over_header)")?;
    Ok(head
        .select(&header_selector)
        .filter(|th| !dom::element_text(th).trim().is_empty())
        .map(|th| {
            th.value()
                .attr("aria-label")
                .map(str::to_string)
                .unwrap_or_else(|| dom::element_text(&th).trim().to_string())
        })
        .filter(|label| !EXCLUDED_HEADERS.contains(&label.as_str()))
        .collect())
}

fn parse_cell(cell: &ElementRef) -> Result<String> {
    let stat = cell.value().attr("data-stat").unwrap_or_default();
    if LINK_ID_STATS.contains(&stat) {
        return Ok(dom::link_segment(cell, 3)?.unwrap_or_else(|| UNKNOWN.to_string()));
    }
    Ok(dom::element_text(cell).trim().to_string())
}
