use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use manuf_common::config::{Config, MatchStrategy};
use manuf_common::{ErrorKind, ManufError, Registry};
use manuf_core::cache::CacheManager;
use manuf_core::source::HttpSource;
use manuf_core::{aggregate, codec, matcher};

use crate::server::{ListingServer, RunningServer};

const DAY: Duration = Duration::from_secs(86_400);

const PATHS: [&str; 5] = [
    "/oui/oui.csv",
    "/cid/cid.csv",
    "/iab/iab.csv",
    "/oui28/mam.csv",
    "/oui36/oui36.csv",
];

const MIRROR_CSV: &str = "\
Registry,Assignment,Organization Name,Organization Address
MA-L,001122,Mirror Corp,Somewhere
";

fn listing(registry: &str, assignment: &str, name: &str) -> String {
    let header = "Registry,Assignment,Organization Name,Organization Address";
    format!("{header}\n{registry},{assignment},{name},Street 1\n")
}

async fn ieee_server(failing: Option<&str>) -> RunningServer {
    let rows = [
        ("MA-L", "AABBCC", "Large Corp"),
        ("CID", "0A0B0C", "Company Id"),
        ("IAB", "0050C2000", "Iab Org"),
        ("MA-M", "AABBCC1", "Medium Corp"),
        ("MA-S", "70B3D5000", "Small Corp"),
    ];

    let mut server = ListingServer::new().csv("/mirror/manuf.csv", MIRROR_CSV);
    for (path, (registry, assignment, name)) in PATHS.iter().zip(rows) {
        server = if Some(*path) == failing {
            server.status(path, 500, "Internal Server Error")
        } else {
            server.csv(path, &listing(registry, assignment, name))
        };
    }
    server.start().await
}

fn config(dir: &Path, server: &RunningServer) -> Config {
    Config {
        cache_path: dir.join("nested").join("manuf.csv"),
        deadline: Duration::from_secs(10),
        max_age: 30 * DAY,
        mirror_url: server.url("/mirror/manuf.csv"),
        listing_urls: PATHS.iter().map(|path| server.url(path)).collect(),
        ..Config::default()
    }
}

fn age_cache(path: &Path, age: Duration) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::now() - age)
        .unwrap();
}

fn manager(cfg: &Config) -> CacheManager {
    CacheManager::new(cfg, Arc::new(HttpSource::new().unwrap()))
}

#[tokio::test]
async fn first_run_populates_cache_from_mirror() {
    let server = ieee_server(None).await;
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), &server);

    let records = manager(&cfg).load_or_refresh().await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].organization_name, "Mirror Corp");
    assert_eq!(codec::read_file(&cfg.cache_path).unwrap(), records);
}

#[tokio::test]
async fn stale_cache_is_rebuilt_from_all_five_listings() {
    let server = ieee_server(None).await;
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), &server);
    let manager = manager(&cfg);

    manager.load_or_refresh().await.unwrap();
    age_cache(&cfg.cache_path, 31 * DAY);

    let records = manager.load_or_refresh().await.unwrap();

    let registries: Vec<Registry> = records.iter().map(|r| r.registry).collect();
    assert_eq!(
        registries,
        vec![Registry::MaL, Registry::Cid, Registry::Iab, Registry::MaM, Registry::MaS]
    );
    assert_eq!(codec::read_file(&cfg.cache_path).unwrap(), records);

    // "AABBCC1..." appears as both MA-L and MA-M assignments.
    let addr = "AA:BB:CC:11:22:33";
    let first = matcher::find_organization(&records, addr, MatchStrategy::FirstMatch);
    let longest = matcher::find_organization(&records, addr, MatchStrategy::LongestPrefix);
    assert_eq!(first, Some("Large Corp"));
    assert_eq!(longest, Some("Medium Corp"));
}

#[tokio::test]
async fn one_failing_listing_keeps_previous_cache() {
    let server = ieee_server(Some("/oui28/mam.csv")).await;
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), &server);
    let manager = manager(&cfg);

    manager.load_or_refresh().await.unwrap();
    age_cache(&cfg.cache_path, 45 * DAY);
    let before = std::fs::read(&cfg.cache_path).unwrap();

    let err = manager.load_or_refresh().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Remote);
    match &err {
        ManufError::Source { url, .. } => assert!(url.ends_with("/oui28/mam.csv")),
        other => panic!("expected the failing listing to be named, got {other:?}"),
    }
    assert_eq!(std::fs::read(&cfg.cache_path).unwrap(), before);
}

#[tokio::test]
async fn failed_fetch_all_writes_nothing() {
    let server = ieee_server(Some("/oui/oui.csv")).await;
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), &server);

    let err = aggregate::fetch_all(
        Arc::new(HttpSource::new().unwrap()),
        &cfg.listing_urls,
        cfg.deadline,
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(!cfg.cache_path.exists());
}
