//! Concurrent fan-out over every configured listing.
//!
//! One task per URL, all sharing a single [`CancellationToken`]. Each task stores its
//! result in a mutex-guarded map keyed by URL. The first failure cancels the token and
//! fails the whole call: callers get every source merged, or an error naming the source.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use manuf_common::{ManufError, Records, Result};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::source::RecordSource;

type ResultMap = Arc<Mutex<HashMap<String, Records>>>;

/// Fetches every listing in `urls` concurrently and merges the results.
///
/// Merged records follow the order of `urls`; a URL listed twice is fetched once.
/// No retries are attempted.
pub async fn fetch_all(
    source: Arc<dyn RecordSource>,
    urls: &[String],
    deadline: Duration,
) -> Result<Records> {
    let token = CancellationToken::new();

    match tokio::time::timeout(deadline, fan_out(source, urls, token.clone())).await {
        Ok(merged) => merged,
        Err(_) => {
            token.cancel();
            warn!(deadline = ?deadline, "listing fetch deadline exceeded");
            Err(ManufError::DeadlineExceeded(deadline))
        }
    }
}

async fn fan_out(
    source: Arc<dyn RecordSource>,
    urls: &[String],
    token: CancellationToken,
) -> Result<Records> {
    let results: ResultMap = Arc::new(Mutex::new(HashMap::new()));
    let mut tasks: JoinSet<Result<()>> = JoinSet::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for url in urls {
        if !seen.insert(url.as_str()) {
            debug!(url = %url, "skipping duplicate listing");
            continue;
        }
        tasks.spawn(fetch_into(
            Arc::clone(&source),
            url.clone(),
            token.clone(),
            Arc::clone(&results),
        ));
    }

    while let Some(joined) = tasks.join_next().await {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(ManufError::Cancelled),
        };
        if let Err(err) = outcome {
            token.cancel();
            tasks.abort_all();
            warn!(error = %err, "aborting remaining listing fetches");
            return Err(err);
        }
    }

    let mut by_url = std::mem::take(&mut *results.lock().await);
    let mut merged = Records::new();
    for url in urls {
        if let Some(records) = by_url.remove(url) {
            merged.extend(records);
        }
    }

    info!(sources = seen.len(), records = merged.len(), "merged listings");
    Ok(merged)
}

async fn fetch_into(
    source: Arc<dyn RecordSource>,
    url: String,
    token: CancellationToken,
    results: ResultMap,
) -> Result<()> {
    let records = tokio::select! {
        _ = token.cancelled() => return Err(ManufError::Cancelled.for_source(&url)),
        fetched = source.fetch(&url) => fetched.map_err(|e| e.for_source(&url))?,
    };

    info!(url = %url, records = records.len(), "fetched listing");
    results.lock().await.insert(url, records);
    Ok(())
}
