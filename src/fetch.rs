// src/fetch.rs

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

/// GET `url` once and return the body as text.
///
/// No retries and no timeout. A non-success status is only logged: the body
/// (usually an error page) is handed back to be parsed like any other page.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let url = Url::parse(url).with_context(|| format!("parsing URL {}", url))?;

    let resp = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?;

    let status = resp.status();
    if status.is_success() {
        debug!(%url, %status, "fetched");
    } else {
        warn!(%url, %status, "non-success status, parsing body anyway");
    }

    resp.text()
        .await
        .with_context(|| format!("reading body from {}", url))
}
