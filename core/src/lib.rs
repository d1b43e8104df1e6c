//! # Manuf Core
//!
//! Record acquisition and caching.
//!
//! ```text
//! CacheManager ── fresh? ──> codec::read_file
//!      │
//!      └─ stale/missing ──> aggregate::fetch_all ──> RecordSource × N ──> codec::write_file
//! ```
//!
//! * **[`codec`]**: CSV serialization of [`Records`](manuf_common::Records).
//! * **[`source`]**: the [`RecordSource`](source::RecordSource) port and its HTTP adapter.
//! * **[`aggregate`]**: concurrent fan-out over every listing with all-or-nothing semantics.
//! * **[`cache`]**: the freshness policy around the on-disk snapshot.
//! * **[`matcher`]**: hardware address to organization resolution.
//! * **[`vendors`]**: a [`VendorRepository`](manuf_common::vendors::VendorRepository) over
//!   loaded records.

pub mod aggregate;
pub mod cache;
pub mod codec;
pub mod matcher;
pub mod source;
pub mod vendors;

#[cfg(test)]
pub(crate) mod testing;
