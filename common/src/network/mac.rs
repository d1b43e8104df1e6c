use pnet::util::MacAddr;

/// Reduces a hardware address to its matching key: separators (`:` and `-`) removed,
/// hex digits uppercased.
///
/// `aa-bb-cc-dd-ee-ff`, `AA:BB:CC:DD:EE:FF` and `aabbccddeeff` all yield `AABBCCDDEEFF`.
pub fn normalize(addr: &str) -> String {
    addr.chars()
        .filter(|c| *c != ':' && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Matching key for a parsed hardware address.
pub fn key(mac: MacAddr) -> String {
    normalize(&mac.to_string())
}
