use serde::Serialize;

/// Marker used for biography fields the page does not provide.
pub const UNKNOWN: &str = "Unknown";

/// Biographical details from a player's overview page.
///
/// The [`Default`] value has every field empty, which is what a failed
/// extraction produces. Fields missing from an otherwise readable page are
/// set to [`UNKNOWN`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerBio {
    pub name: String,
    pub position: String,
    pub foot: String,
    pub height_cm: String,
    pub weight_kg: String,
    pub birth_date: String,
    pub nation: String,
    pub club: String,
}
