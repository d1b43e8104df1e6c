//! Resolves a hardware address to the record whose assignment prefixes it.
//!
//! [`MatchStrategy::FirstMatch`] is a linear scan where collection order decides:
//! with `[AABBCC, AABB]` the /24 wins, with `[AABB, AABBCC]` the shorter one does.
//! [`MatchStrategy::LongestPrefix`] always prefers the most specific assignment.

use manuf_common::config::MatchStrategy;
use manuf_common::network::mac;
use manuf_common::{Record, Records};

pub fn find<'a>(
    records: &'a Records,
    hardware_addr: &str,
    strategy: MatchStrategy,
) -> Option<&'a Record> {
    find_normalized(records, &mac::normalize(hardware_addr), strategy)
}

/// Organization name for `hardware_addr`, if any assignment covers it.
pub fn find_organization<'a>(
    records: &'a Records,
    hardware_addr: &str,
    strategy: MatchStrategy,
) -> Option<&'a str> {
    find(records, hardware_addr, strategy).map(|record| record.organization_name.as_str())
}

pub(crate) fn find_normalized<'a>(
    records: &'a Records,
    key: &str,
    strategy: MatchStrategy,
) -> Option<&'a Record> {
    let mut matches = records.iter().filter(|record| record.assignment.is_prefix_of(key));

    match strategy {
        MatchStrategy::FirstMatch => matches.next(),
        MatchStrategy::LongestPrefix => matches.fold(None::<&Record>, |best, candidate| match best {
            Some(best) if best.assignment.len() >= candidate.assignment.len() => Some(best),
            _ => Some(candidate),
        }),
    }
}
