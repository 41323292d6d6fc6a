use ::scraper::{ElementRef, Selector};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::extraction::Extraction;
use crate::index::IdMap;
use crate::scraper::dom;

const PLAYER_PATH: &str = "/en/players/";

/// Text of the per-player match log link that sits next to the player link.
const MATCH_LOG_LINK: &str = "matches";

/// Map player names to site ids from the player links of a squad table.
///
/// When a name appears twice, the later link wins.
#[instrument(skip(squad_table))]
pub fn extract_player_index(squad_table: ElementRef) -> Extraction<IdMap> {
    Extraction::from_result(parse_player_links(squad_table), "player index")
}

fn parse_player_links(squad_table: ElementRef) -> Result<IdMap> {
    let link_selector = Selector::parse("a[href]")?;
    let mut players = IdMap::new();
    for a in squad_table.select(&link_selector) {
        let href = a.value().attr("href").unwrap_or_default();
        if !href.contains(PLAYER_PATH) {
            continue;
        }
        let name = dom::element_text(&a);
        if name == MATCH_LOG_LINK {
            continue;
        }
        if let Some(id) = dom::href_segment(href, 3) {
            players.insert(name.trim().to_string(), id.to_string());
        }
    }
    debug!(count = players.len(), "extracted player ids");
    Ok(players)
}

/// Map team names to site ids from the squad links of a league table.
///
/// Only the link in each row's first data cell is considered.
#[instrument(skip(league_table))]
pub fn extract_team_index(league_table: ElementRef) -> Extraction<IdMap> {
    Extraction::from_result(parse_team_links(league_table), "team index")
}

fn parse_team_links(league_table: ElementRef) -> Result<IdMap> {
    let row_selector = Selector::parse("tbody tr")?;
    let cell_selector = Selector::parse("td")?;
    let link_selector = Selector::parse("a[href]")?;

    let mut teams = IdMap::new();
    for tr in league_table.select(&row_selector) {
        let Some(link) = tr
            .select(&cell_selector)
            .next()
            .and_then(|td| td.select(&link_selector).next())
        else {
            continue;
        };
        let href = link.value().attr("href").unwrap_or_default();
        if let Some(id) = dom::href_segment(href, 3) {
            teams.insert(dom::element_text(&link).trim().to_string(), id.to_string());
        }
    }
    debug!(count = teams.len(), "extracted team ids");
    Ok(teams)
}
