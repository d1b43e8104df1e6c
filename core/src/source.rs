//! Listing sources.
//!
//! [`HttpSource`] reads the response body chunk by chunk into memory and decodes it once
//! complete, so peak memory per fetch is the size of one listing (the largest, MA-L, is a
//! few MB). Bodies above [`MAX_BODY_BYTES`] are rejected before decoding.

use std::time::Duration;

use async_trait::async_trait;
use manuf_common::{ManufError, Records, Result};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::codec;

/// Anything that can turn a listing URL into records.
///
/// The HTTP implementation is [`HttpSource`]; tests substitute in-memory sources.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Records>;
}

/// Upper bound on a single listing body.
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Fetches a listing with a single HTTP GET and decodes the body as CSV.
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
    body_limit: usize,
}

impl HttpSource {
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("manuf/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            body_limit: MAX_BODY_BYTES,
        }
    }

    /// Overrides [`MAX_BODY_BYTES`].
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<Records> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ManufError::Remote {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        if let Some(length) = response.content_length()
            && length > self.body_limit as u64
        {
            return Err(too_large(url, self.body_limit));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ManufError::parse(url, e))?
        {
            if body.len() + chunk.len() > self.body_limit {
                return Err(too_large(url, self.body_limit));
            }
            body.extend_from_slice(&chunk);
        }
        debug!(url = %url, bytes = body.len(), "downloaded listing");

        codec::decode(body.as_slice(), url)
    }
}

/// Runs a single-source fetch bounded by `deadline`.
pub async fn fetch_with_deadline(
    source: &dyn RecordSource,
    url: &str,
    deadline: Duration,
) -> Result<Records> {
    tokio::time::timeout(deadline, source.fetch(url))
        .await
        .map_err(|_| ManufError::DeadlineExceeded(deadline))?
}

fn too_large(url: &str, limit: usize) -> ManufError {
    ManufError::parse(url, format!("response body exceeds {limit} bytes"))
}

fn network_error(url: &str, err: reqwest::Error) -> ManufError {
    let mut reason = err.to_string();
    let mut cause = std::error::Error::source(&err);
    while let Some(inner) = cause {
        reason.push_str(": ");
        reason.push_str(&inner.to_string());
        cause = inner.source();
    }
    ManufError::Network {
        url: url.to_string(),
        reason,
    }
}
