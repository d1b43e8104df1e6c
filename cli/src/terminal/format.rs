use colored::*;
use pnet::util::MacAddr;

const MAC_ADDR: CustomColor = CustomColor {
    r: 255,
    g: 200,
    b: 120,
};
const VENDOR: CustomColor = CustomColor {
    r: 130,
    g: 200,
    b: 255,
};

pub fn mac_with_vendor(mac: MacAddr, vendor: &str) -> String {
    format!(
        "{} ({})",
        mac.to_string().custom_color(MAC_ADDR),
        vendor.custom_color(VENDOR)
    )
}

/// One observed frame: `src (vendor) -> dst (vendor)`.
pub fn frame_line(src: MacAddr, src_vendor: &str, dst: MacAddr, dst_vendor: &str) -> String {
    format!(
        "{} {} {}",
        mac_with_vendor(src, src_vendor),
        "->".dimmed(),
        mac_with_vendor(dst, dst_vendor)
    )
}
