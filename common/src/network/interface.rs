use std::fmt;
use std::net::Ipv4Addr;

use crate::run::LogEntry;

/// An IPv4 address bound to a local interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddress {
    pub name: String,
    pub ip: Ipv4Addr,
    pub netmask: Ipv4Addr,
}

impl InterfaceAddress {
    pub fn to_entry(&self) -> LogEntry {
        LogEntry::info(self.to_string())
    }
}

impl fmt::Display for InterfaceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Interface: {} - IP: {} - Netmask: {}",
            self.name, self.ip, self.netmask
        )
    }
}
