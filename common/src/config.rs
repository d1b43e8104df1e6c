use std::path::PathBuf;
use std::time::Duration;

use crate::record::Registry;

/// Name of the cache file inside the user's cache directory.
pub const CACHE_FILE_NAME: &str = "manuf.csv";

/// Consolidated mirror of all five listings, served over HTTPS.
pub const MIRROR_URL: &str = "https://raw.githubusercontent.com/picatz/manuf/main/manuf.csv";

pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// How a hardware address is resolved against a records collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchStrategy {
    /// The first record in collection order whose assignment prefixes the address.
    #[default]
    FirstMatch,
    /// The record with the longest (most specific) matching assignment.
    /// Ties go to the earlier record.
    LongestPrefix,
}

pub struct Config {
    /// Location of the persisted snapshot.
    pub cache_path: PathBuf,

    /// Upper bound on a whole refresh, all concurrent fetches included.
    pub deadline: Duration,

    /// A snapshot older than this is refreshed from the five listings.
    pub max_age: Duration,

    pub match_strategy: MatchStrategy,

    /// Single-source bootstrap used when no snapshot exists yet.
    pub mirror_url: String,

    /// Authoritative per-registry listings used for periodic refreshes.
    pub listing_urls: Vec<String>,

    /// Returns the stale snapshot with a warning when a refresh fails,
    /// instead of surfacing the error.
    pub serve_stale_on_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_path: default_cache_path(),
            deadline: DEFAULT_DEADLINE,
            max_age: DEFAULT_MAX_AGE,
            match_strategy: MatchStrategy::default(),
            mirror_url: MIRROR_URL.to_string(),
            listing_urls: default_listing_urls(),
            serve_stale_on_error: false,
        }
    }
}

/// `<user cache dir>/manuf.csv`, or `./manuf.csv` when the platform has no cache dir.
pub fn default_cache_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CACHE_FILE_NAME)
}

pub fn default_listing_urls() -> Vec<String> {
    Registry::ALL
        .iter()
        .map(|registry| registry.url().to_string())
        .collect()
}
