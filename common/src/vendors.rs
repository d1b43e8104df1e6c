use pnet::util::MacAddr;

/// Defines the contract for resolving device manufacturers from hardware addresses.
pub trait VendorRepository {
    /// Retrieves the organization name for a parsed MAC address.
    ///
    /// # Returns
    /// * `Some(String)` - The name of the organization if found.
    /// * `None` - If no assignment covers the address.
    fn get_vendor(&self, mac_addr: MacAddr) -> Option<String> {
        self.lookup(&mac_addr.to_string())
    }

    /// Same as [`VendorRepository::get_vendor`] for an address in any of the usual
    /// textual forms (`aa:bb:..`, `AA-BB-..`, `aabb..`).
    fn lookup(&self, hardware_addr: &str) -> Option<String>;
}
