use pnet::datalink::{self, NetworkInterface};
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// Loopback frames carry no real hardware addresses.
    IsLoopback,
    /// The interface does not have a MAC address.
    NoMacAddress,
    /// The interface does not support broadcast.
    NotBroadcast,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("no network interface named {0:?}")]
    NotFound(String),
    #[error("interface {name:?} cannot be used for sniffing: {reason:?}")]
    NotViable {
        name: String,
        reason: ViabilityError,
    },
    #[error("no up, broadcast-capable interface with a hardware address found")]
    NoneAvailable,
}

/// Picks the interface to sniff on.
///
/// A named interface is returned as long as it exists and is viable. Without a name,
/// the first viable interface in system order is used.
pub fn select_sniff_interface(name: Option<&str>) -> Result<NetworkInterface, InterfaceError> {
    select_from(datalink::interfaces(), name)
}

fn select_from(
    interfaces: Vec<NetworkInterface>,
    name: Option<&str>,
) -> Result<NetworkInterface, InterfaceError> {
    match name {
        Some(name) => {
            let interface = interfaces
                .into_iter()
                .find(|interface| interface.name == name)
                .ok_or_else(|| InterfaceError::NotFound(name.to_string()))?;
            is_viable_sniff_interface(&interface).map_err(|reason| InterfaceError::NotViable {
                name: interface.name.clone(),
                reason,
            })?;
            Ok(interface)
        }
        None => interfaces
            .into_iter()
            .find(|interface| is_viable_sniff_interface(interface).is_ok())
            .ok_or(InterfaceError::NoneAvailable),
    }
}

fn is_viable_sniff_interface(interface: &NetworkInterface) -> Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if interface.mac.is_none() {
        return Err(ViabilityError::NoMacAddress);
    }
    if !interface.is_broadcast() {
        return Err(ViabilityError::NotBroadcast);
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
