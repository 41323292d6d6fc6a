use std::path::PathBuf;
use std::time::Duration;

use crate::model::Season;

pub const DEFAULT_BASE_URL: &str = "https://fbref.com/en";
pub const DEFAULT_TEAM_INDEX: &str = "teams_ids.json";
pub const DEFAULT_PLAYER_INDEX: &str = "players_ids.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for an [`FbrefClient`](crate::FbrefClient).
#[derive(Debug, Clone)]
pub struct FbrefConfig {
    /// Site root that every page path is appended to, without trailing slash.
    pub base_url: String,
    /// Season used when a caller does not name one.
    pub current_season: Season,
    /// Connect and read timeout for each page fetch.
    pub timeout: Duration,
    pub team_index_path: PathBuf,
    pub player_index_path: PathBuf,
}

impl Default for FbrefConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            current_season: Season::current(),
            timeout: DEFAULT_TIMEOUT,
            team_index_path: DEFAULT_TEAM_INDEX.into(),
            player_index_path: DEFAULT_PLAYER_INDEX.into(),
        }
    }
}

impl FbrefConfig {
    /// Use another site root, e.g. a mirror or a test server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the season treated as current.
    #[must_use]
    pub fn with_current_season(mut self, season: Season) -> Self {
        self.current_season = season;
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Keep the team and player indexes in other files.
    #[must_use]
    pub fn with_index_paths(
        mut self,
        team_index_path: impl Into<PathBuf>,
        player_index_path: impl Into<PathBuf>,
    ) -> Self {
        self.team_index_path = team_index_path.into();
        self.player_index_path = player_index_path.into();
        self
    }
}
