use std::io::{BufWriter, Write};

use manuf_common::config::Config;
use manuf_common::vendors::VendorRepository;
use manuf_core::vendors::{RecordsVendorRepo, UNKNOWN_VENDOR};
use tracing::debug;

use crate::commands::load_records;

/// Prints `<address>\t<organization>` per address, `?` when nothing matches.
pub async fn lookup(addresses: &[String], cfg: &Config, quiet: bool) -> anyhow::Result<()> {
    let records = load_records(cfg, quiet).await?;
    let repo = RecordsVendorRepo::new(records, cfg.match_strategy);
    debug!(records = repo.len(), strategy = ?cfg.match_strategy, "vendor table ready");

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for address in addresses {
        let vendor = repo.lookup(address);
        writeln!(out, "{address}\t{}", vendor.as_deref().unwrap_or(UNKNOWN_VENDOR))?;
    }
    out.flush()?;
    Ok(())
}
