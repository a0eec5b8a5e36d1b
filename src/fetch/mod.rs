//! Acquisition of the raw case table: HTTP download plus the local cache copy.

mod basic;
mod cache;
mod client;

pub use basic::BasicClient;
pub use cache::{read_cached, store_raw};
pub use client::HttpClient;

use anyhow::{Context, Result};
use bytes::Bytes;
use tracing::{debug, info};

use crate::config::PipelineConfig;

/// Downloads `url` and returns the body. Non-success statuses are errors.
pub fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Bytes> {
    let req = reqwest::blocking::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req)?.error_for_status()?;
    Ok(resp.bytes()?)
}

/// Produces the raw table bytes for a run.
///
/// In offline mode an existing cache file is used as-is. Otherwise the source
/// is fetched and written verbatim to the cache path before being returned.
#[tracing::instrument(skip(client, config), fields(source = %config.source_url, cache = %config.cache_path.display()))]
pub fn acquire<C: HttpClient>(client: &C, config: &PipelineConfig) -> Result<Bytes> {
    if config.offline && config.cache_path.exists() {
        let bytes = read_cached(&config.cache_path)?;
        info!(bytes = bytes.len(), "Using cached source table");
        return Ok(bytes);
    }

    let bytes = fetch_bytes(client, &config.source_url)
        .with_context(|| format!("Failed to fetch {}", config.source_url))?;
    debug!(bytes = bytes.len(), "Source table downloaded");

    store_raw(&config.cache_path, &bytes)?;
    info!(bytes = bytes.len(), "Source table cached");

    Ok(bytes)
}
