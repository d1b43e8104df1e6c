use std::io::{BufWriter, Write};

use anyhow::Context;
use manuf_common::config::Config;
use tracing::info;

use crate::commands::load_records;

/// Dumps every cached record to STDOUT as JSON lines.
pub async fn print(cfg: &Config, quiet: bool) -> anyhow::Result<()> {
    let records = load_records(cfg, quiet).await?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for record in &records {
        serde_json::to_writer(&mut out, record).context("failed to serialize record")?;
        writeln!(out)?;
    }
    out.flush()?;

    info!(records = records.len(), "printed cached records");
    Ok(())
}
