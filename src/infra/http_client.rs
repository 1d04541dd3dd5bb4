use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Instant;
use tracing::debug;

use crate::config::HttpConfig;
use crate::error::{Result, ScraperError};

/// Builds the shared client: browser-like User-Agent and a fixed per-call timeout.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("fr-FR,fr;q=0.9"));

    Ok(Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(config.timeout())
        .build()?)
}

/// GET `url` and return the body, treating non-2xx statuses as errors.
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    let started = Instant::now();
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ScraperError::Source {
            message: format!("{} responded with status {}", url, status.as_u16()),
        });
    }
    let bytes = resp.bytes().await?.to_vec();
    debug!(
        url,
        bytes = bytes.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Fetched payload"
    );
    metrics::counter!("fonds_http_requests_success").increment(1);
    Ok(bytes)
}
