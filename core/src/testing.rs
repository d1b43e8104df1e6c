use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use manuf_common::{ManufError, Record, Records, Registry, Result};

use crate::source::RecordSource;

enum Reply {
    Records(Records),
    Status(u16),
    Slow(Duration),
}

/// In-memory [`RecordSource`] keyed by URL, recording every fetch.
#[derive(Default)]
pub struct FakeSource {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
    cancelled: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, url: &str, records: Records) -> Self {
        self.replies.insert(url.to_string(), Reply::Records(records));
        self
    }

    pub fn fail(mut self, url: &str, status: u16) -> Self {
        self.replies.insert(url.to_string(), Reply::Status(status));
        self
    }

    pub fn slow(mut self, url: &str, delay: Duration) -> Self {
        self.replies.insert(url.to_string(), Reply::Slow(delay));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Fetches that were dropped before completing.
    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for FakeSource {
    async fn fetch(&self, url: &str) -> Result<Records> {
        self.calls.lock().unwrap().push(url.to_string());

        match self.replies.get(url) {
            Some(Reply::Records(records)) => Ok(records.clone()),
            Some(Reply::Status(status)) => Err(ManufError::Remote {
                url: url.to_string(),
                status: *status,
                reason: "Internal Server Error".to_string(),
            }),
            Some(Reply::Slow(delay)) => {
                let cancelled = CancelCounter(&self.cancelled);
                tokio::time::sleep(*delay).await;
                std::mem::forget(cancelled);
                Ok(Records::new())
            }
            None => Err(ManufError::Remote {
                url: url.to_string(),
                status: 404,
                reason: "Not Found".to_string(),
            }),
        }
    }
}

/// Counts a cancellation when dropped mid-sleep.
struct CancelCounter<'a>(&'a AtomicUsize);

impl Drop for CancelCounter<'_> {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn record(registry: Registry, assignment: &str, name: &str) -> Record {
    Record::new(registry, assignment, name, "")
}
