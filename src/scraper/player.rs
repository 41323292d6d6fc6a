use ::scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use crate::error::{FbrefError, Result};
use crate::extraction::Extraction;
use crate::model::{PlayerBio, UNKNOWN};
use crate::scraper::dom;

/// Labels that may precede the player's nation link, in order of preference.
const NATION_LABELS: [&str; 3] = ["National Team:", "Citizenship:", "Youth National Team:"];

/// Separator between the position and the role detail, e.g. `FW ▪ CF`.
const POSITION_DELIMITER: char = '▪';

/// Read the biography block of a player overview page.
#[instrument(skip(document))]
pub fn extract_bio(document: &Html) -> Extraction<PlayerBio> {
    Extraction::from_result(parse_bio(document), "player bio")
}

fn parse_bio(document: &Html) -> Result<PlayerBio> {
    let meta = dom::find_by_id(document.root_element(), "div", "meta")?.ok_or(
        FbrefError::ElementNotFound {
            context: "player meta block",
        },
    )?;

    let span_selector = Selector::parse("span")?;
    let spans: Vec<String> = meta
        .select(&span_selector)
        .map(|span| dom::element_text(&span).trim().to_string())
        .collect();

    let name = spans
        .first()
        .filter(|name| name.chars().count() > 1)
        .cloned()
        .unwrap_or_else(unknown);

    let position = labelled_text(meta, "Position:")?
        .and_then(|text| text.split(POSITION_DELIMITER).next().map(str::to_string))
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(unknown);

    let foot = labelled_text(meta, "Footed:")?
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(unknown);

    let height_cm = with_unit(&spans, "cm");
    let weight_kg = with_unit(&spans, "kg");

    let birth_date = dom::find_by_id(meta, "span", "necro-birth")?
        .map(|span| dom::element_text(&span).trim().to_string())
        .unwrap_or_else(unknown);

    let club = labelled_link(meta, "Club:")?.unwrap_or_else(unknown);

    let mut nation = None;
    for label in NATION_LABELS {
        nation = labelled_link(meta, label)?;
        if nation.is_some() {
            break;
        }
    }
    let nation = nation.unwrap_or_else(unknown);

    debug!(%name, %club, "parsed player bio");

    Ok(PlayerBio {
        name,
        position,
        foot,
        height_cm,
        weight_kg,
        birth_date,
        nation,
        club,
    })
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// Text node following the `<strong>` label with text `label`.
fn labelled_text(meta: ElementRef, label: &str) -> Result<Option<String>> {
    Ok(dom::find_labelled(meta, "strong", label)?.and_then(dom::following_text))
}

/// Text of the link following the `<strong>` label with text `label`.
fn labelled_link(meta: ElementRef, label: &str) -> Result<Option<String>> {
    Ok(dom::find_labelled(meta, "strong", label)?
        .and_then(|strong| dom::following_element(strong, "a"))
        .map(|a| dom::element_text(&a).trim().to_string()))
}

/// First span value ending in `unit`, with the unit stripped.
fn with_unit(spans: &[String], unit: &str) -> String {
    spans
        .iter()
        .find_map(|span| span.strip_suffix(unit))
        .map(|value| value.trim().to_string())
        .unwrap_or_else(unknown)
}
