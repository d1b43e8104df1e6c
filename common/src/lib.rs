//! # Manuf Common
//!
//! Shared building blocks for every `manuf` crate.
//!
//! * **[`record`]**: the OUI record model (`Registry`, `Assignment`, `Record`, `Records`).
//! * **[`error`]**: the error taxonomy returned by every core operation.
//! * **[`config`]**: the explicit configuration value handed to the cache manager.
//! * **[`network`]**: hardware address normalization and interface selection.
//! * **[`vendors`]**: the consumer-facing lookup port.

pub mod config;
pub mod error;
pub mod network;
pub mod record;
pub mod vendors;

pub use error::{ErrorKind, ManufError, Result};
pub use record::{Assignment, Record, Records, Registry};
