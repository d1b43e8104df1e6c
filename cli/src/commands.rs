pub mod generate;
pub mod lookup;
pub mod print;
pub mod sniff;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use manuf_common::Records;
use manuf_common::config::{Config, MatchStrategy};
use manuf_core::cache::{CacheManager, Freshness};
use manuf_core::source::HttpSource;

use crate::terminal::spinner::RefreshSpinner;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Parser)]
#[command(name = "manuf")]
#[command(about = "Hardware vendor lookups backed by the IEEE OUI registries.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path of the cached records file [default: <user cache dir>/manuf.csv]
    #[arg(long, global = true)]
    pub cache: Option<PathBuf>,

    /// Seconds allowed for a full refresh
    #[arg(long, global = true, default_value_t = 300)]
    pub timeout: u64,

    /// Refresh the cache once it is older than this many days
    #[arg(long, global = true, default_value_t = 30)]
    pub max_age_days: u64,

    /// Prefer the most specific assignment instead of the first one listed
    #[arg(long, global = true)]
    pub longest_prefix: bool,

    /// Keep using the old cache when a refresh fails
    #[arg(long, global = true)]
    pub serve_stale: bool,

    /// More diagnostics (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only warnings and errors on STDERR
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every cached record as one JSON object per line (default)
    #[command(alias = "p")]
    Print,
    /// Fetch all five IEEE listings and write them, sorted by registry, to a CSV file
    #[command(alias = "g")]
    Generate {
        #[arg(short, long, default_value = "manuf.csv")]
        output: PathBuf,
    },
    /// Resolve hardware addresses to organization names
    #[command(alias = "l")]
    Lookup {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// Watch Ethernet traffic and name the vendor on both ends of every frame
    #[command(alias = "s")]
    Sniff {
        /// Interface to listen on [default: first up, broadcast-capable interface]
        #[arg(short, long)]
        interface: Option<String>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        let mut cfg = Config {
            deadline: Duration::from_secs(self.timeout),
            max_age: Duration::from_secs(self.max_age_days * SECS_PER_DAY),
            serve_stale_on_error: self.serve_stale,
            ..Config::default()
        };
        if let Some(path) = &self.cache {
            cfg.cache_path = path.clone();
        }
        if self.longest_prefix {
            cfg.match_strategy = MatchStrategy::LongestPrefix;
        }
        cfg
    }
}

pub fn cache_manager(cfg: &Config) -> anyhow::Result<CacheManager> {
    let source = HttpSource::new().context("failed to build HTTP client")?;
    Ok(CacheManager::new(cfg, Arc::new(source)))
}

/// Loads the cache, refreshing it behind a spinner when needed.
pub async fn load_records(cfg: &Config, quiet: bool) -> anyhow::Result<Records> {
    let manager = cache_manager(cfg)?;
    let now = SystemTime::now();

    let _spinner = match manager.freshness_at(now)? {
        Freshness::Fresh { .. } => None,
        Freshness::Missing => Some(RefreshSpinner::start("Populating cache from mirror", quiet)),
        Freshness::Stale { .. } => Some(RefreshSpinner::start("Refreshing IEEE listings", quiet)),
    };

    manager
        .load_or_refresh_at(now)
        .await
        .with_context(|| format!("failed to load records from cache {:?}", manager.cache_path()))
}
