use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ManufError>;

#[derive(Error, Debug)]
pub enum ManufError {
    #[error("failed to make HTTP request to {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("got non-200 HTTP response {status} from {url}: {reason}")]
    Remote {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("failed to read CSV records from {origin}: {reason}")]
    Parse { origin: String, reason: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    #[error("fetch cancelled after a sibling source failed")]
    Cancelled,

    #[error("failed to get records for {url}: {source}")]
    Source {
        url: String,
        #[source]
        source: Box<ManufError>,
    },
}

/// Flat view of [`ManufError`], looking through the per-source wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Remote,
    Parse,
    Io,
    DeadlineExceeded,
    Cancelled,
}

impl ManufError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ManufError::Network { .. } => ErrorKind::Network,
            ManufError::Remote { .. } => ErrorKind::Remote,
            ManufError::Parse { .. } => ErrorKind::Parse,
            ManufError::Io { .. } => ErrorKind::Io,
            ManufError::DeadlineExceeded(_) => ErrorKind::DeadlineExceeded,
            ManufError::Cancelled => ErrorKind::Cancelled,
            ManufError::Source { source, .. } => source.kind(),
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ManufError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn parse(origin: impl Into<String>, reason: impl ToString) -> Self {
        ManufError::Parse {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }

    /// Attaches the offending source URL, unless the error already carries it.
    pub fn for_source(self, url: &str) -> Self {
        match self {
            ManufError::Source { .. } => self,
            other => ManufError::Source {
                url: url.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The HTTP status of a [`ManufError::Remote`], looking through wrappers.
    pub fn status(&self) -> Option<u16> {
        match self {
            ManufError::Remote { status, .. } => Some(*status),
            ManufError::Source { source, .. } => source.status(),
            _ => None,
        }
    }
}
