use netcheck_common::network::interface::InterfaceAddress;
use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};

use crate::ports::InterfaceSource;

pub trait NetworkInterfaceExtension {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network>;
}

impl NetworkInterfaceExtension for NetworkInterface {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network> {
        self.ips
            .iter()
            .filter_map(|ip| {
                if let IpNetwork::V4(ipv4) = ip {
                    Some(*ipv4)
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Flattens interfaces into one entry per IPv4 address, keeping the order
/// the OS reported them in. IPv6 and other families are skipped.
pub fn ipv4_addresses(interfaces: &[NetworkInterface]) -> Vec<InterfaceAddress> {
    interfaces
        .iter()
        .flat_map(|intf| {
            intf.get_ipv4_nets()
                .into_iter()
                .map(move |net| InterfaceAddress {
                    name: intf.name.clone(),
                    ip: net.ip(),
                    netmask: net.mask(),
                })
        })
        .collect()
}

/// Reads interfaces through `pnet::datalink`.
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn ipv4_addresses(&self) -> anyhow::Result<Vec<InterfaceAddress>> {
        Ok(ipv4_addresses(&datalink::interfaces()))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
