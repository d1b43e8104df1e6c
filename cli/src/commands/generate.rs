use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use manuf_common::config::Config;
use manuf_core::{aggregate, codec};
use manuf_core::source::HttpSource;
use tracing::info;

use crate::terminal::spinner::RefreshSpinner;

/// Fetches all IEEE listings and writes them, grouped by registry, to `output`.
pub async fn generate(output: &Path, cfg: &Config, quiet: bool) -> anyhow::Result<()> {
    let source = Arc::new(HttpSource::new().context("failed to build HTTP client")?);

    let mut records = {
        let _spinner = RefreshSpinner::start("Fetching IEEE listings", quiet);
        aggregate::fetch_all(source, &cfg.listing_urls, cfg.deadline).await?
    };
    records.sort_by_registry();

    let path = output.to_path_buf();
    let written = records.len();
    tokio::task::spawn_blocking(move || codec::write_file(&records, &path))
        .await
        .context("writer task failed")??;

    info!(path = ?output, records = written, "generated vendor listing");
    Ok(())
}
