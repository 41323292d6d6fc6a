use ::scraper::error::SelectorErrorKind;
use std::path::PathBuf;

/// All errors that can occur during fbref scraping operations.
#[derive(thiserror::Error, Debug)]
pub enum FbrefError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The underlying HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// The league name is not one of the supported competitions.
    #[error("league not found: {0}")]
    UnknownLeague(String),

    /// A season string is not of the form `YYYY-YYYY`.
    #[error("invalid season: {0}")]
    InvalidSeason(String),

    /// A name could not be resolved to a site id through the local indexes.
    #[error("no {kind} id known for {name}")]
    IdNotFound { kind: &'static str, name: String },

    /// No table with the requested id exists on the page.
    #[error("table with id '{table_id}' not found")]
    TableNotFound { table_id: String },

    /// An expected HTML element was not found on the page.
    #[error("expected element not found: {context}")]
    ElementNotFound { context: &'static str },

    /// The page had the expected landmarks but their contents did not line up.
    #[error("malformed markup: {0}")]
    Malformed(String),

    /// Reading or writing an index file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An index file did not contain the expected JSON structure.
    #[error("invalid json in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl<'a> From<SelectorErrorKind<'a>> for FbrefError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        FbrefError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FbrefError>;
