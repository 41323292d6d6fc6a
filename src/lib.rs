//! Scrape football statistics from fbref.com.
//!
//! The extractors in [`scraper`] turn fbref markup into plain tables and
//! records and work on any parsed [`Html`](::scraper::Html) document.
//! [`FbrefClient`] fetches the pages and resolves team and player names to
//! site ids through the local [`index`] files.

pub use client::{FbrefClient, DEFAULT_LEAGUE_TABLE, DEFAULT_PLAYER_TABLE, MATCH_LOG_TABLE};
pub use config::FbrefConfig;
pub use error::{FbrefError, Result};
pub use extraction::Extraction;
pub use model::*;

mod client;
pub mod config;
mod error;
mod extraction;
pub mod index;
mod model;
pub mod scraper;
