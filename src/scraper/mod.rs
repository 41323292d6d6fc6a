pub mod dom;
pub mod match_report;
pub mod player;
pub mod squad;
pub mod table;
pub mod tables;

pub use ::scraper::{ElementRef, Html};
use ::scraper::Selector;
use tracing::debug;

use crate::error::{FbrefError, Result};

/// Fetch a URL and parse the response body as an HTML document.
pub(crate) async fn get_document(client: &reqwest::Client, url: &str) -> Result<Html> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| FbrefError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FbrefError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| FbrefError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok(Html::parse_document(&body))
}

/// Extract trimmed text content from the first element matching `selector`
/// inside `element`. Returns an empty string if nothing matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|e| e.text().collect::<String>())
        .unwrap_or_default()
        .trim()
        .to_string()
}
