use manuf_common::config::MatchStrategy;
use manuf_common::network::mac;
use manuf_common::vendors::VendorRepository;
use manuf_common::Records;
use pnet::util::MacAddr;

use crate::matcher;

/// Shown in place of an organization name when no assignment matches.
pub const UNKNOWN_VENDOR: &str = "?";

/// Resolves vendors against an in-memory records collection.
pub struct RecordsVendorRepo {
    records: Records,
    strategy: MatchStrategy,
}

impl RecordsVendorRepo {
    pub fn new(records: Records, strategy: MatchStrategy) -> Self {
        Self { records, strategy }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Like [`VendorRepository::get_vendor`], falling back to [`UNKNOWN_VENDOR`].
    pub fn vendor_or_unknown(&self, mac_addr: MacAddr) -> String {
        self.get_vendor(mac_addr)
            .unwrap_or_else(|| UNKNOWN_VENDOR.to_string())
    }
}

impl VendorRepository for RecordsVendorRepo {
    fn get_vendor(&self, mac_addr: MacAddr) -> Option<String> {
        matcher::find_normalized(&self.records, &mac::key(mac_addr), self.strategy)
            .map(|record| record.organization_name.clone())
    }

    fn lookup(&self, hardware_addr: &str) -> Option<String> {
        matcher::find_organization(&self.records, hardware_addr, self.strategy).map(str::to_string)
    }
}
