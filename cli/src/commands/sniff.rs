use anyhow::{Context, bail};
use manuf_common::config::Config;
use manuf_common::network::interface::select_sniff_interface;
use manuf_core::cache::CacheManager;
use manuf_core::vendors::RecordsVendorRepo;
use pnet::datalink::{self, Channel};
use pnet::packet::ethernet::EthernetPacket;
use tracing::{info, warn};

use crate::commands::cache_manager;
use crate::terminal::format;

/// Names the vendor on both ends of every Ethernet frame seen on the interface.
///
/// Uses the existing cache as is; run `print` or `lookup` first to populate it.
pub async fn sniff(interface: Option<&str>, cfg: &Config) -> anyhow::Result<()> {
    if !is_root::is_root() {
        warn!("not running as root, opening a raw socket will likely fail");
    }

    let manager: CacheManager = cache_manager(cfg)?;
    let records = manager
        .load()
        .await
        .with_context(|| format!("no usable cache at {:?}", manager.cache_path()))?;
    let repo = RecordsVendorRepo::new(records, cfg.match_strategy);

    let intf = select_sniff_interface(interface)?;
    info!(interface = %intf.name, "listening for frames");

    let mut rx = match datalink::channel(&intf, Default::default()) {
        Ok(Channel::Ethernet(_tx, rx)) => rx,
        Ok(_) => bail!("unsupported channel type on {}", intf.name),
        Err(e) => return Err(e).with_context(|| format!("failed to open {}", intf.name)),
    };

    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        loop {
            let frame = rx.next().context("failed to read frame")?;
            let Some(packet) = EthernetPacket::new(frame) else {
                continue;
            };
            let (src, dst) = (packet.get_source(), packet.get_destination());
            println!(
                "{}",
                format::frame_line(
                    src,
                    &repo.vendor_or_unknown(src),
                    dst,
                    &repo.vendor_or_unknown(dst)
                )
            );
        }
    })
    .await
    .context("sniffer task failed")?
}
