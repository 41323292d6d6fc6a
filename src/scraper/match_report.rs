use ::scraper::{ElementRef, Html, Selector};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::error::{FbrefError, Result};
use crate::extraction::Extraction;
use crate::model::MatchRecord;
use crate::scraper::{dom, select_text};

/// Labels of the counters in the extra stats block, in page order.
const EXTRA_HEADERS: [&str; 12] = [
    "Fouls",
    "Corners",
    "Crosses",
    "Touches",
    "Tackles",
    "Interceptions",
    "Aerials Won",
    "Clearances",
    "Offsides",
    "Goal Kicks",
    "Throw Ins",
    "Long Balls",
];

/// Both teams' stats from a match report page, one row per team.
///
/// Pages whose heading does not mention `team` are reported as
/// [`Extraction::NotFound`].
#[instrument(skip(document))]
pub fn extract_match(document: &Html, team: &str) -> Extraction<MatchRecord> {
    Extraction::from_result(parse_match(document, team), "match report")
}

fn parse_match(document: &Html, team: &str) -> Result<MatchRecord> {
    let root = document.root_element();
    let content = dom::find_by_id(root, "div", "content")?.ok_or(FbrefError::ElementNotFound {
        context: "match content",
    })?;

    let heading = select_text(&content, &Selector::parse("h1")?);
    if !heading.contains(team) {
        debug!(%heading, "team not involved in this match");
        return Err(FbrefError::ElementNotFound {
            context: "requested team in match heading",
        });
    }

    let team_stats = dom::find_by_id(content, "div", "team_stats")?.ok_or(
        FbrefError::ElementNotFound {
            context: "team stats block",
        },
    )?;
    let team_stats_extra = dom::find_by_id(content, "div", "team_stats_extra")?.ok_or(
        FbrefError::ElementNotFound {
            context: "extra team stats block",
        },
    )?;

    let extra_columns = parse_extra_stats(team_stats_extra)?;
    let (teams, primary_headers, primary_columns) = parse_team_stats(team_stats)?;

    let headers = std::iter::once("Team".to_string())
        .chain(primary_headers)
        .chain(EXTRA_HEADERS.iter().map(|h| h.to_string()))
        .collect_vec();

    let columns = std::iter::once(teams)
        .chain(primary_columns)
        .chain(extra_columns)
        .collect_vec();

    if columns.len() != headers.len() {
        return Err(FbrefError::Malformed(format!(
            "match report has {} stat columns for {} headers",
            columns.len(),
            headers.len()
        )));
    }
    if let Some(column) = columns.iter().find(|column| column.len() != 2) {
        return Err(FbrefError::Malformed(format!(
            "expected a value per team, found {column:?}"
        )));
    }

    let rows = (0..2)
        .map(|side| columns.iter().map(|column| column[side].clone()).collect_vec())
        .collect_vec();

    debug!(columns = headers.len(), "parsed match report");
    Ok(MatchRecord { headers, rows })
}

/// Team names, stat labels and per-stat value pairs from the team stats block.
fn parse_team_stats(
    team_stats: ElementRef,
) -> Result<(Vec<String>, Vec<String>, Vec<Vec<String>>)> {
    let row_selector = Selector::parse("tr")?;
    let cell_selector = Selector::parse("td")?;
    let strong_selector = Selector::parse("strong")?;

    let rows = team_stats
        .select(&row_selector)
        .map(|tr| dom::element_text(&tr))
        .filter(|text| text.trim() != "Cards")
        .collect_vec();

    let first = rows.first().ok_or(FbrefError::ElementNotFound {
        context: "team stats rows",
    })?;
    let teams = first
        .split('\t')
        .map(|name| name.split_whitespace().join(" "))
        .filter(|name| !name.is_empty())
        .collect_vec();

    let headers = rows
        .get(1..rows.len().saturating_sub(1))
        .unwrap_or_default()
        .iter()
        .step_by(2)
        .map(|text| text.trim().to_string())
        .collect_vec();

    let columns = team_stats
        .select(&row_selector)
        .map(|tr| {
            tr.select(&cell_selector)
                .filter_map(|td| td.select(&strong_selector).next())
                .map(|strong| dom::element_text(&strong).trim().to_string())
                .collect_vec()
        })
        .filter(|values| !values.is_empty())
        .collect_vec();

    Ok((teams, headers, columns))
}

/// Integer counters from the extra stats block, paired per stat.
fn parse_extra_stats(team_stats_extra: ElementRef) -> Result<Vec<Vec<String>>> {
    let div_selector = Selector::parse("div")?;
    let numbers = team_stats_extra
        .select(&div_selector)
        .map(|div| dom::element_text(&div))
        .filter(|text| !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()))
        .map(|text| text.parse::<u32>().map(|n| n.to_string()))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| FbrefError::Malformed(format!("extra stat out of range: {e}")))?;

    if numbers.len() % 2 != 0 {
        return Err(FbrefError::Malformed(format!(
            "odd number of extra stat values: {}",
            numbers.len()
        )));
    }

    Ok(numbers
        .into_iter()
        .tuples()
        .map(|(home, away)| vec![home, away])
        .collect())
}
