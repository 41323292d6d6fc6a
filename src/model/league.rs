use std::str::FromStr;

use serde::Serialize;

use crate::error::{FbrefError, Result};

/// Domestic leagues with statistics coverage on fbref.
///
/// Parses from either the display name (`"Premier League"`) or the URL
/// slug (`"Premier-League"`); displays as the slug.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum League {
    #[strum(to_string = "Austrian-Bundesliga", serialize = "Austrian Bundesliga")]
    AustrianBundesliga,
    #[strum(to_string = "Belgian-Pro-League", serialize = "Belgian Pro League")]
    BelgianProLeague,
    #[strum(to_string = "Hrvatska-NL", serialize = "Hrvatska NL")]
    HrvatskaNl,
    #[strum(to_string = "Czech-First-League", serialize = "Czech First League")]
    CzechFirstLeague,
    #[strum(to_string = "Superliga")]
    Superliga,
    #[strum(to_string = "Premier-League", serialize = "Premier League")]
    PremierLeague,
    #[strum(to_string = "Ligue-1", serialize = "Ligue 1")]
    Ligue1,
    #[strum(to_string = "Bundesliga")]
    Bundesliga,
    #[strum(to_string = "Super-League-Greece", serialize = "Super League Greece")]
    SuperLeagueGreece,
    #[strum(to_string = "NB-I", serialize = "NB I")]
    NbI,
    #[strum(to_string = "Serie-A", serialize = "Serie A")]
    SerieA,
    #[strum(to_string = "Eredivisie")]
    Eredivisie,
    #[strum(to_string = "Ekstraklasa")]
    Ekstraklasa,
    #[strum(to_string = "Primeira-Liga", serialize = "Primeira Liga")]
    PrimeiraLiga,
    #[strum(to_string = "Russian-Premier-League", serialize = "Russian Premier League")]
    RussianPremierLeague,
    #[strum(to_string = "La-Liga", serialize = "La Liga")]
    LaLiga,
    #[strum(to_string = "Swiss-Super-League", serialize = "Swiss Super League")]
    SwissSuperLeague,
    #[strum(to_string = "Super-Lig", serialize = "Super Lig")]
    SuperLig,
}

impl League {
    /// Resolve a league by display name or slug.
    pub fn from_name(name: &str) -> Result<Self> {
        League::from_str(name.trim()).map_err(|_| FbrefError::UnknownLeague(name.to_string()))
    }

    /// The site's numeric competition id.
    pub fn id(self) -> u16 {
        match self {
            League::AustrianBundesliga => 56,
            League::BelgianProLeague => 37,
            League::HrvatskaNl => 63,
            League::CzechFirstLeague => 66,
            League::Superliga => 50,
            League::PremierLeague => 9,
            League::Ligue1 => 13,
            League::Bundesliga => 20,
            League::SuperLeagueGreece => 27,
            League::NbI => 46,
            League::SerieA => 11,
            League::Eredivisie => 23,
            League::Ekstraklasa => 36,
            League::PrimeiraLiga => 32,
            League::RussianPremierLeague => 30,
            League::LaLiga => 12,
            League::SwissSuperLeague => 57,
            League::SuperLig => 26,
        }
    }

    /// Country whose top flight this is.
    pub fn country(self) -> &'static str {
        match self {
            League::AustrianBundesliga => "Austria",
            League::BelgianProLeague => "Belgium",
            League::HrvatskaNl => "Croatia",
            League::CzechFirstLeague => "Czech Republic",
            League::Superliga => "Denmark",
            League::PremierLeague => "England",
            League::Ligue1 => "France",
            League::Bundesliga => "Germany",
            League::SuperLeagueGreece => "Greece",
            League::NbI => "Hungary",
            League::SerieA => "Italy",
            League::Eredivisie => "Netherlands",
            League::Ekstraklasa => "Poland",
            League::PrimeiraLiga => "Portugal",
            League::RussianPremierLeague => "Russia",
            League::LaLiga => "Spain",
            League::SwissSuperLeague => "Switzerland",
            League::SuperLig => "Turkey",
        }
    }

    /// Human-readable name, e.g. `"Primeira Liga"`.
    pub fn display_name(self) -> String {
        self.to_string().replace('-', " ")
    }
}
