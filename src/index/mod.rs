//! Local name-to-id indexes.
//!
//! fbref addresses teams and players by short alphanumeric ids. These are
//! scraped once and kept in two nested maps: league → team → team id, and
//! team → player → player id.

mod store;

use std::path::Path;

use indexmap::IndexMap;
use tracing::warn;

pub use store::{JsonFileStore, MemoryStore};

use crate::error::Result;

/// Names to site ids within one league or team, in file order.
pub type IdMap = IndexMap<String, String>;

/// Group name (league or team) to its [`IdMap`], in file order.
pub type NestedIdMap = IndexMap<String, IdMap>;

/// Storage for a nested id index.
pub trait IdStore {
    /// The full index. A store that has never been written is empty.
    fn load(&self) -> Result<NestedIdMap>;

    /// Merge `entries` into the group `key`, overwriting same-named entries
    /// and keeping every other entry.
    fn merge_put(&self, key: &str, entries: IdMap) -> Result<()>;

    /// The group `key`, if present.
    fn get(&self, key: &str) -> Result<Option<IdMap>> {
        Ok(self.load()?.shift_remove(key))
    }
}

/// Id of `name` in the first group of `index` that lists it.
fn lookup_in_groups<'a>(name: &str, index: &'a NestedIdMap) -> Option<&'a str> {
    index
        .values()
        .find_map(|group| group.get(name))
        .map(String::as_str)
}

/// Id of `team_name` in the first league of `index` that lists it.
pub fn lookup_team_id<'a>(team_name: &str, index: &'a NestedIdMap) -> Option<&'a str> {
    lookup_in_groups(team_name, index)
}

/// First league of `index` that lists `team_name`.
pub fn lookup_league<'a>(team_name: &str, index: &'a NestedIdMap) -> Option<&'a str> {
    index
        .iter()
        .find(|(_, teams)| teams.contains_key(team_name))
        .map(|(league, _)| league.as_str())
}

/// Id of `player_name` in the first team of `index` that lists it.
pub fn lookup_player_id<'a>(player_name: &str, index: &'a NestedIdMap) -> Option<&'a str> {
    lookup_in_groups(player_name, index)
}

/// Merge `entries` under `key` in the JSON index file at `path`.
pub fn merge_and_persist(path: impl AsRef<Path>, key: &str, entries: IdMap) -> Result<()> {
    JsonFileStore::new(path.as_ref()).merge_put(key, entries)
}

fn load_or_warn(store: &dyn IdStore) -> Option<NestedIdMap> {
    match store.load() {
        Ok(index) => Some(index),
        Err(e) => {
            warn!(error = %e, "could not read id index");
            None
        }
    }
}

/// League → team → team id.
pub struct TeamIdIndex {
    store: Box<dyn IdStore + Send + Sync>,
}

impl TeamIdIndex {
    /// Index backed by `store`.
    pub fn new(store: impl IdStore + Send + Sync + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Site id of `team_name`, or `None` when it is unindexed or the store
    /// cannot be read.
    pub fn team_id(&self, team_name: &str) -> Option<String> {
        let index = load_or_warn(self.store.as_ref())?;
        lookup_team_id(team_name, &index).map(str::to_string)
    }

    /// League that lists `team_name`.
    pub fn league_of(&self, team_name: &str) -> Option<String> {
        let index = load_or_warn(self.store.as_ref())?;
        lookup_league(team_name, &index).map(str::to_string)
    }

    /// Merge `teams` into the entries of `league`.
    pub fn merge(&self, league: &str, teams: IdMap) -> Result<()> {
        self.store.merge_put(league, teams)
    }
}

/// Team → player → player id.
pub struct PlayerIdIndex {
    store: Box<dyn IdStore + Send + Sync>,
}

impl PlayerIdIndex {
    /// Index backed by `store`.
    pub fn new(store: impl IdStore + Send + Sync + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Site id of `player_name`, or `None` when it is unindexed or the store
    /// cannot be read.
    pub fn player_id(&self, player_name: &str) -> Option<String> {
        let index = load_or_warn(self.store.as_ref())?;
        lookup_player_id(player_name, &index).map(str::to_string)
    }

    /// Merge `players` into the entries of `team`.
    pub fn merge(&self, team: &str, players: IdMap) -> Result<()> {
        self.store.merge_put(team, players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> NestedIdMap {
        let mut index = NestedIdMap::new();
        index
            .entry("Eredivisie".into())
            .or_default()
            .insert("Ajax".into(), "19c3f8c4".into());
        index
            .entry("Primeira-Liga".into())
            .or_default()
            .insert("Benfica".into(), "a77c513e".into());
        index
    }

    #[test]
    fn test_lookups() {
        let index = index();
        assert_eq!(lookup_team_id("Benfica", &index), Some("a77c513e"));
        assert_eq!(lookup_league("Ajax", &index), Some("Eredivisie"));
        assert_eq!(lookup_team_id("Porto", &index), None);
        assert_eq!(lookup_league("Porto", &index), None);
        assert_eq!(lookup_player_id("Ajax", &index), Some("19c3f8c4"));
    }

    #[test]
    fn test_team_index_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teams_ids.json");
        let teams = TeamIdIndex::new(JsonFileStore::new(&path));
        assert_eq!(teams.team_id("TeamX"), None);

        merge_and_persist(&path, "LeagueA", IdMap::from([("TeamX".into(), "abc123".into())]))
            .unwrap();
        assert_eq!(teams.team_id("TeamX").as_deref(), Some("abc123"));
        assert_eq!(teams.league_of("TeamX").as_deref(), Some("LeagueA"));

        teams
            .merge("LeagueA", IdMap::from([("TeamX".into(), "def456".into())]))
            .unwrap();
        assert_eq!(teams.team_id("TeamX").as_deref(), Some("def456"));
    }

    #[test]
    fn test_lookup_follows_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teams_ids.json");
        std::fs::write(
            &path,
            r#"{"Scottish-Premiership": {"Rangers": "86b64e2d"}, "Eredivisie": {"Rangers": "0000aaaa"}}"#,
        )
        .unwrap();

        let teams = TeamIdIndex::new(JsonFileStore::new(&path));
        assert_eq!(teams.team_id("Rangers").as_deref(), Some("86b64e2d"));
        assert_eq!(
            teams.league_of("Rangers").as_deref(),
            Some("Scottish-Premiership")
        );

        let players = PlayerIdIndex::new(JsonFileStore::new(&path));
        assert_eq!(players.player_id("Rangers").as_deref(), Some("86b64e2d"));
    }

    #[test]
    fn test_merge_keeps_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teams_ids.json");
        std::fs::write(&path, r#"{"Serie-A": {"Roma": "cf74a709"}, "Bundesliga": {}}"#).unwrap();

        merge_and_persist(&path, "Bundesliga", IdMap::from([("Mainz".into(), "a224b06a".into())]))
            .unwrap();
        merge_and_persist(&path, "Serie-A", IdMap::from([("Inter".into(), "d609edc0".into())]))
            .unwrap();

        let index = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(
            index.keys().collect::<Vec<_>>(),
            vec!["Serie-A", "Bundesliga"]
        );
        assert_eq!(
            index["Serie-A"].keys().collect::<Vec<_>>(),
            vec!["Roma", "Inter"]
        );
    }

    #[test]
    fn test_unreadable_index_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players_ids.json");
        std::fs::write(&path, "not json").unwrap();

        let players = PlayerIdIndex::new(JsonFileStore::new(&path));
        assert_eq!(players.player_id("Luuk de Jong"), None);
    }

    #[test]
    fn test_store_get() {
        let store = MemoryStore::new(index());
        assert!(store.get("Eredivisie").unwrap().is_some());
        assert!(store.get("Serie-A").unwrap().is_none());

        let players = PlayerIdIndex::new(MemoryStore::default());
        players
            .merge("Ajax", IdMap::from([("Brian Brobbey".into(), "d4".into())]))
            .unwrap();
        assert_eq!(players.player_id("Brian Brobbey").as_deref(), Some("d4"));
    }
}
