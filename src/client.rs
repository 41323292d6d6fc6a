use tracing::{debug, instrument, warn};

use crate::config::FbrefConfig;
use crate::error::{FbrefError, Result};
use crate::index::{IdStore, JsonFileStore, PlayerIdIndex, TeamIdIndex};
use crate::model::*;
use crate::scraper::{self, match_report, player, squad, table, tables};

/// Default table on a league season page: squad standard stats.
pub const DEFAULT_LEAGUE_TABLE: &str = "stats_squads_standard_for";

/// Default table on a player page: standard stats in domestic leagues.
pub const DEFAULT_PLAYER_TABLE: &str = "stats_standard_dom_lg";

/// Table of a team's fixtures and results on its match log page.
pub const MATCH_LOG_TABLE: &str = "matchlogs_for";

/// The main entry point for interacting with fbref.com.
///
/// `FbrefClient` wraps a [`reqwest::Client`] together with the team and
/// player id indexes, and exposes one method per page type. Team and player
/// pages are addressed by name: names are resolved to site ids through the
/// indexes, which are filled by [`update_team_ids`](Self::update_team_ids)
/// and [`update_player_ids`](Self::update_player_ids).
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> fbref_scraper::Result<()> {
/// use fbref_scraper::FbrefClient;
///
/// let client = FbrefClient::new()?;
/// let season = client.current_season();
/// client.update_team_ids("Primeira Liga", season).await?;
/// let stats = client.team_stats("Benfica", "stats_shooting_32", season).await?;
/// println!("{:?}", stats.headers);
/// # Ok(())
/// # }
/// ```
pub struct FbrefClient {
    http: reqwest::Client,
    config: FbrefConfig,
    teams: TeamIdIndex,
    players: PlayerIdIndex,
}

impl FbrefClient {
    /// Create a new client with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(FbrefConfig::default())
    }

    /// Create a new client whose indexes live in the files named by `config`.
    pub fn with_config(config: FbrefConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FbrefError::ClientBuild)?;
        let teams = JsonFileStore::new(&config.team_index_path);
        let players = JsonFileStore::new(&config.player_index_path);
        Ok(Self::with_parts(http, config, teams, players))
    }

    /// Create a client from an existing [`reqwest::Client`] and index stores.
    ///
    /// The timeout in `config` is not applied to `http`.
    pub fn with_parts(
        http: reqwest::Client,
        config: FbrefConfig,
        team_store: impl IdStore + Send + Sync + 'static,
        player_store: impl IdStore + Send + Sync + 'static,
    ) -> Self {
        Self {
            http,
            config,
            teams: TeamIdIndex::new(team_store),
            players: PlayerIdIndex::new(player_store),
        }
    }

    /// Season used by [`FbrefConfig`] as the current one.
    pub fn current_season(&self) -> Season {
        self.config.current_season
    }

    /// Supported leagues with their country.
    pub fn available_leagues() -> Vec<(&'static str, League)> {
        use strum::IntoEnumIterator;
        League::iter().map(|league| (league.country(), league)).collect()
    }

    /// Tables available on a league's overview page.
    #[instrument(skip(self))]
    pub async fn league_tables(&self, league: &str) -> Result<Vec<TableDescriptor>> {
        let league = League::from_name(league)?;
        let url = format!(
            "{}/comps/{}/{league}-Stats",
            self.config.base_url,
            league.id()
        );
        self.scan(&url).await
    }

    /// A table from a league's season page.
    #[instrument(skip(self))]
    pub async fn league_stats(
        &self,
        league: &str,
        season: Season,
        table_id: &str,
    ) -> Result<ExtractedTable> {
        let league = League::from_name(league)?;
        let url = self.league_season_url(league, season);
        self.table(&url, table_id).await
    }

    /// Tables available on a team's overview page.
    #[instrument(skip(self))]
    pub async fn team_tables(&self, team: &str) -> Result<Vec<TableDescriptor>> {
        let team_id = self.team_id(team)?;
        let url = format!(
            "{}/squads/{team_id}/{}-Stats",
            self.config.base_url,
            slug(team)
        );
        self.scan(&url).await
    }

    /// A table from a team's season page.
    #[instrument(skip(self))]
    pub async fn team_stats(
        &self,
        team: &str,
        table_id: &str,
        season: Season,
    ) -> Result<ExtractedTable> {
        let url = self.team_season_url(team, season)?;
        self.table(&url, table_id).await
    }

    /// A team's fixtures and results for a season.
    #[instrument(skip(self))]
    pub async fn team_matches(&self, team: &str, season: Season) -> Result<ExtractedTable> {
        let team_id = self.team_id(team)?;
        let url = format!(
            "{}/squads/{team_id}/{season}/matchlogs/",
            self.config.base_url
        );
        self.table(&url, MATCH_LOG_TABLE).await
    }

    /// Both teams' stats for one match, seen from `team`.
    ///
    /// Returns `None` when `team` did not play in the match or the report
    /// could not be read.
    #[instrument(skip(self))]
    pub async fn match_stats(&self, team: &str, match_id: &str) -> Result<Option<MatchRecord>> {
        let url = format!("{}/matches/{match_id}", self.config.base_url);
        let document = scraper::get_document(&self.http, &url).await?;
        Ok(match_report::extract_match(&document, team).found())
    }

    /// Tables available on a player's page.
    #[instrument(skip(self))]
    pub async fn player_tables(&self, player: &str) -> Result<Vec<TableDescriptor>> {
        let url = self.player_url(player)?;
        self.scan(&url).await
    }

    /// The rows of a player table that belong to `season`.
    #[instrument(skip(self))]
    pub async fn player_stats(
        &self,
        player: &str,
        season: Season,
        table_id: &str,
    ) -> Result<ExtractedTable> {
        let url = self.player_url(player)?;
        let stats = self.table(&url, table_id).await?;
        Ok(stats.filter_rows("Season", &season.to_string()))
    }

    /// Biography block of a player's page.
    #[instrument(skip(self))]
    pub async fn player_bio(&self, player: &str) -> Result<PlayerBio> {
        let url = self.player_url(player)?;
        let document = scraper::get_document(&self.http, &url).await?;
        Ok(player::extract_bio(&document).into_lenient())
    }

    /// Scrape the team ids of a league season into the team index.
    ///
    /// Returns the number of teams found.
    #[instrument(skip(self))]
    pub async fn update_team_ids(&self, league: &str, season: Season) -> Result<usize> {
        let league = League::from_name(league)?;
        let url = self.league_season_url(league, season);
        let document = scraper::get_document(&self.http, &url).await?;

        let table_id = format!("results{season}{}1_overall", league.id());
        let standings = table::locate_table(&document, &table_id)?;
        let teams = squad::extract_team_index(standings).into_lenient();
        let count = teams.len();

        self.teams.merge(&league.to_string(), teams)?;
        debug!(%league, count, "updated team ids");
        Ok(count)
    }

    /// Scrape the player ids of a team's season squad into the player index.
    ///
    /// The team must already be in the team index. Returns the number of
    /// players found.
    #[instrument(skip(self))]
    pub async fn update_player_ids(&self, team: &str, season: Season) -> Result<usize> {
        let url = self.team_season_url(team, season)?;
        let league = self
            .teams
            .league_of(team)
            .ok_or_else(|| FbrefError::IdNotFound {
                kind: "league",
                name: team.to_string(),
            })?;
        let league = League::from_name(&league)?;

        let document = scraper::get_document(&self.http, &url).await?;
        let squad_table = table::locate_table(&document, &format!("stats_standard_{}", league.id()))?;
        let players = squad::extract_player_index(squad_table).into_lenient();
        let count = players.len();

        self.players.merge(team, players)?;
        debug!(team, count, "updated player ids");
        Ok(count)
    }

    async fn scan(&self, url: &str) -> Result<Vec<TableDescriptor>> {
        let document = scraper::get_document(&self.http, url).await?;
        Ok(tables::scan_tables(&document).into_lenient())
    }

    async fn table(&self, url: &str, table_id: &str) -> Result<ExtractedTable> {
        let document = scraper::get_document(&self.http, url).await?;
        let element = table::locate_table(&document, table_id)?;
        Ok(table::table_to_rows(element).into_lenient())
    }

    fn team_id(&self, team: &str) -> Result<String> {
        self.teams.team_id(team).ok_or_else(|| {
            warn!(team, "team not in index");
            FbrefError::IdNotFound {
                kind: "team",
                name: team.to_string(),
            }
        })
    }

    fn league_season_url(&self, league: League, season: Season) -> String {
        format!(
            "{}/comps/{}/{season}/{season}-{league}-Stats",
            self.config.base_url,
            league.id()
        )
    }

    fn team_season_url(&self, team: &str, season: Season) -> Result<String> {
        let team_id = self.team_id(team)?;
        Ok(format!(
            "{}/squads/{team_id}/{season}/{}-Stats",
            self.config.base_url,
            slug(team)
        ))
    }

    fn player_url(&self, player: &str) -> Result<String> {
        let player_id = self.players.player_id(player).ok_or_else(|| {
            warn!(player, "player not in index");
            FbrefError::IdNotFound {
                kind: "player",
                name: player.to_string(),
            }
        })?;
        Ok(format!(
            "{}/players/{player_id}/{}",
            self.config.base_url,
            slug(player)
        ))
    }
}

/// Page slug for a team or player name.
fn slug(name: &str) -> String {
    name.trim().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::index::{IdMap, MemoryStore, NestedIdMap};

    const SEASON: Season = Season { start_year: 2023 };

    const LEAGUE_PAGE: &str = r#"<html><body>
        <table id="results2023-2024321_overall">
            <caption>Regular season Table</caption>
            <thead><tr>
                <th aria-label="Rank" data-stat="rank">Rk</th>
                <th aria-label="Squad" data-stat="team">Squad</th>
                <th aria-label="Points" data-stat="points">Pts</th>
            </tr></thead>
            <tbody>
                <tr><th data-stat="rank">1</th>
                    <td data-stat="team"><a href="/en/squads/13dc44fd/Sporting-CP-Stats">Sporting CP</a></td>
                    <td data-stat="points">90</td></tr>
                <tr><th data-stat="rank">2</th>
                    <td data-stat="team"><a href="/en/squads/a77c513e/Benfica-Stats">Benfica</a></td>
                    <td data-stat="points">80</td></tr>
            </tbody>
        </table>
        <table id="stats_squads_standard_for"><caption>Squad Standard Stats</caption>
            <thead><tr><th aria-label="Squad" data-stat="team">Squad</th></tr></thead>
            <tbody><tr><th data-stat="team">Sporting CP</th></tr></tbody>
        </table>
        </body></html>"#;

    const SQUAD_PAGE: &str = r#"<html><body>
        <table id="stats_standard_32"><caption>Standard Stats</caption>
            <thead><tr><th aria-label="Player" data-stat="player">Player</th></tr></thead>
            <tbody>
                <tr><th data-stat="player"><a href="/en/players/1f44ac21/Viktor-Gyokeres">Viktor Gyökeres</a></th></tr>
            </tbody>
        </table>
        </body></html>"#;

    const PLAYER_PAGE: &str = r#"<html><body>
        <div id="meta"><h1><span>Viktor Gyökeres</span></h1>
            <p><strong>Position:</strong> FW&nbsp;▪&nbsp;</p>
        </div>
        <table id="stats_standard_dom_lg"><caption>Standard Stats: Domestic Leagues</caption>
            <thead><tr>
                <th aria-label="Season" data-stat="year_id">Season</th>
                <th aria-label="Goals" data-stat="goals">Gls</th>
            </tr></thead>
            <tbody>
                <tr><th data-stat="year_id">2022-2023</th><td data-stat="goals">21</td></tr>
                <tr><th data-stat="year_id">2023-2024</th><td data-stat="goals">29</td></tr>
            </tbody>
        </table>
        </body></html>"#;

    fn client(server: &MockServer, teams: NestedIdMap, players: NestedIdMap) -> FbrefClient {
        let config = FbrefConfig::default()
            .with_base_url(server.uri())
            .with_current_season(SEASON);
        FbrefClient::with_parts(
            reqwest::Client::new(),
            config,
            MemoryStore::new(teams),
            MemoryStore::new(players),
        )
    }

    async fn serve(server: &MockServer, page_path: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_league_stats_and_tables() {
        let server = MockServer::start().await;
        serve(&server, "/comps/32/2023-2024/2023-2024-Primeira-Liga-Stats", LEAGUE_PAGE).await;
        serve(&server, "/comps/32/Primeira-Liga-Stats", LEAGUE_PAGE).await;
        let client = client(&server, NestedIdMap::new(), NestedIdMap::new());

        let stats = client
            .league_stats("Primeira Liga", SEASON, "results2023-2024321_overall")
            .await
            .unwrap();
        assert_eq!(stats.headers, vec!["Squad", "Points"]);
        assert_eq!(stats.len(), 2);

        let tables = client.league_tables("Primeira-Liga").await.unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].id, DEFAULT_LEAGUE_TABLE);

        let missing = client
            .league_stats("Primeira Liga", SEASON, "stats_keeper_for")
            .await;
        assert!(matches!(missing, Err(FbrefError::TableNotFound { .. })));
    }

    #[tokio::test]
    async fn test_unknown_league_is_an_error() {
        let server = MockServer::start().await;
        let client = client(&server, NestedIdMap::new(), NestedIdMap::new());
        let result = client.league_tables("Sunday League").await;
        assert!(matches!(result, Err(FbrefError::UnknownLeague(_))));
    }

    #[tokio::test]
    async fn test_update_ids_then_read_player() {
        let server = MockServer::start().await;
        serve(&server, "/comps/32/2023-2024/2023-2024-Primeira-Liga-Stats", LEAGUE_PAGE).await;
        serve(&server, "/squads/13dc44fd/2023-2024/Sporting-CP-Stats", SQUAD_PAGE).await;
        serve(&server, "/players/1f44ac21/Viktor-Gy%C3%B6keres", PLAYER_PAGE).await;
        let client = client(&server, NestedIdMap::new(), NestedIdMap::new());

        assert_eq!(client.update_team_ids("Primeira Liga", SEASON).await.unwrap(), 2);
        assert_eq!(client.update_player_ids("Sporting CP", SEASON).await.unwrap(), 1);

        let stats = client
            .player_stats("Viktor Gyökeres", SEASON, DEFAULT_PLAYER_TABLE)
            .await
            .unwrap();
        assert_eq!(stats.rows, vec![vec!["2023-2024", "29"]]);

        let bio = client.player_bio("Viktor Gyökeres").await.unwrap();
        assert_eq!(bio.name, "Viktor Gyökeres");
        assert_eq!(bio.position, "FW");
        assert_eq!(bio.club, UNKNOWN);
    }

    #[tokio::test]
    async fn test_unindexed_team_is_an_error() {
        let server = MockServer::start().await;
        let client = client(&server, NestedIdMap::new(), NestedIdMap::new());
        let result = client.team_stats("Porto", DEFAULT_LEAGUE_TABLE, SEASON).await;
        assert!(matches!(
            result,
            Err(FbrefError::IdNotFound { kind: "team", .. })
        ));
    }

    #[tokio::test]
    async fn test_match_stats_for_absent_team() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/matches/d45aec45",
            r#"<div id="content"><h1>Ajax vs. PSV Eindhoven Match Report</h1></div>"#,
        )
        .await;
        let teams = NestedIdMap::from([(
            "Eredivisie".to_string(),
            IdMap::from([("Ajax".to_string(), "19c3f8c4".to_string())]),
        )]);
        let client = client(&server, teams, NestedIdMap::new());

        assert_eq!(client.match_stats("Feyenoord", "d45aec45").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;
        let client = client(&server, NestedIdMap::new(), NestedIdMap::new());

        let result = client.league_tables("Eredivisie").await;
        assert!(matches!(
            result,
            Err(FbrefError::UnexpectedStatus { status, .. }) if status.as_u16() == 429
        ));
    }

    #[test]
    fn test_available_leagues() {
        let leagues = FbrefClient::available_leagues();
        assert_eq!(leagues.len(), 18);
        assert!(leagues.contains(&("Portugal", League::PrimeiraLiga)));
    }
}
