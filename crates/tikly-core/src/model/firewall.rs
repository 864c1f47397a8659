// ── Firewall domain types ──
//
// Filter, NAT, mangle and raw rules share most of their matchers. Ports
// are plain integers: a port range such as `80-443` does not fit and
// reads back as 0.

use serde::{Deserialize, Serialize};
use tikly_api::Record;

use crate::resource::Resource;

/// A rule in `/ip/firewall/filter`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct FirewallRule {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "chain")]
    pub chain: String,
    #[record(name = "src-address")]
    pub src_address: String,
    #[record(name = "dst-address")]
    pub dst_address: String,
    #[record(name = "src-port")]
    pub src_port: u16,
    #[record(name = "dst-port")]
    pub dst_port: u16,
    #[record(name = "port")]
    pub any_port: u16,
    #[record(name = "protocol")]
    pub protocol: String,
    #[record(name = "in-interface")]
    pub in_interface: String,
    #[record(name = "out-interface")]
    pub out_interface: String,
    #[record(name = "in-interface-list")]
    pub in_interface_list: String,
    #[record(name = "out-interface-list")]
    pub out_interface_list: String,
    #[record(name = "packet-mark")]
    pub packet_mark: String,
    #[record(name = "connection-mark")]
    pub connection_mark: String,
    #[record(name = "routing-mark")]
    pub routing_mark: String,
    #[record(name = "routing-table")]
    pub routing_table: String,
    #[record(name = "connection-type")]
    pub connection_type: String,
    #[record(name = "src-address-list")]
    pub src_address_list: String,
    #[record(name = "dst-address-list")]
    pub dst_address_list: String,
    #[record(name = "layer7-protocol")]
    pub layer7_protocol: String,
    #[record(name = "src-mac-address")]
    pub src_mac_address: String,
    #[record(name = "ipsec-policy")]
    pub ipsec_policy: String,
    #[record(name = "in-bridge-port")]
    pub in_bridge_port: String,
    #[record(name = "out-bridge-port")]
    pub out_bridge_port: String,
    #[record(name = "in-bridge-port-list")]
    pub in_bridge_port_list: String,
    #[record(name = "out-bridge-port-list")]
    pub out_bridge_port_list: String,
    #[record(name = "action")]
    pub action: String,
    #[record(name = "log")]
    pub log: bool,
    #[record(name = "log-prefix")]
    pub log_prefix: String,
    #[record(name = "comment")]
    pub comment: String,
    #[record(name = "disabled")]
    pub disabled: bool,
}

impl Resource for FirewallRule {
    const PATH: &'static str = "/ip/firewall/filter";
    const KIND: &'static str = "firewall rule";

    fn key(&self) -> &str {
        &self.id
    }
}

/// A rule in `/ip/firewall/nat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct FirewallNat {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "chain")]
    pub chain: String,
    #[record(name = "src-address")]
    pub src_address: String,
    #[record(name = "dst-address")]
    pub dst_address: String,
    #[record(name = "src-port")]
    pub src_port: u16,
    #[record(name = "dst-port")]
    pub dst_port: u16,
    #[record(name = "port")]
    pub any_port: u16,
    #[record(name = "protocol")]
    pub protocol: String,
    #[record(name = "in-interface")]
    pub in_interface: String,
    #[record(name = "out-interface")]
    pub out_interface: String,
    #[record(name = "in-interface-list")]
    pub in_interface_list: String,
    #[record(name = "out-interface-list")]
    pub out_interface_list: String,
    #[record(name = "packet-mark")]
    pub packet_mark: String,
    #[record(name = "connection-mark")]
    pub connection_mark: String,
    #[record(name = "routing-mark")]
    pub routing_mark: String,
    #[record(name = "connection-type")]
    pub connection_type: String,
    #[record(name = "src-address-list")]
    pub src_address_list: String,
    #[record(name = "dst-address-list")]
    pub dst_address_list: String,
    #[record(name = "src-mac-address")]
    pub src_mac_address: String,
    #[record(name = "ipsec-policy")]
    pub ipsec_policy: String,
    #[record(name = "action")]
    pub action: String,
    /// Translated address for `dst-nat` / `src-nat` actions.
    #[record(name = "to-addresses")]
    pub to_addresses: String,
    #[record(name = "to-ports")]
    pub to_ports: u16,
    #[record(name = "log")]
    pub log: bool,
    #[record(name = "log-prefix")]
    pub log_prefix: String,
    #[record(name = "comment")]
    pub comment: String,
    #[record(name = "disabled")]
    pub disabled: bool,
}

impl Resource for FirewallNat {
    const PATH: &'static str = "/ip/firewall/nat";
    const KIND: &'static str = "NAT rule";

    fn key(&self) -> &str {
        &self.id
    }
}

/// A rule in `/ip/firewall/mangle`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct FirewallMangle {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "chain")]
    pub chain: String,
    #[record(name = "src-address")]
    pub src_address: String,
    #[record(name = "dst-address")]
    pub dst_address: String,
    #[record(name = "src-port")]
    pub src_port: u16,
    #[record(name = "dst-port")]
    pub dst_port: u16,
    #[record(name = "port")]
    pub any_port: u16,
    #[record(name = "protocol")]
    pub protocol: String,
    #[record(name = "in-interface")]
    pub in_interface: String,
    #[record(name = "out-interface")]
    pub out_interface: String,
    #[record(name = "in-interface-list")]
    pub in_interface_list: String,
    #[record(name = "out-interface-list")]
    pub out_interface_list: String,
    #[record(name = "packet-mark")]
    pub packet_mark: String,
    #[record(name = "connection-mark")]
    pub connection_mark: String,
    #[record(name = "routing-mark")]
    pub routing_mark: String,
    #[record(name = "connection-type")]
    pub connection_type: String,
    #[record(name = "connection-state")]
    pub connection_state: String,
    #[record(name = "connection-nat-state")]
    pub connection_nat_state: String,
    #[record(name = "tcp-flags")]
    pub tcp_flags: String,
    #[record(name = "src-address-list")]
    pub src_address_list: String,
    #[record(name = "dst-address-list")]
    pub dst_address_list: String,
    #[record(name = "action")]
    pub action: String,
    #[record(name = "new-packet-mark")]
    pub new_packet_mark: String,
    #[record(name = "new-connection-mark")]
    pub new_connection_mark: String,
    #[record(name = "new-routing-mark")]
    pub new_routing_mark: String,
    #[record(name = "passthrough")]
    pub passthrough: bool,
    #[record(name = "log")]
    pub log: bool,
    #[record(name = "log-prefix")]
    pub log_prefix: String,
    #[record(name = "comment")]
    pub comment: String,
    #[record(name = "disabled")]
    pub disabled: bool,
}

impl Resource for FirewallMangle {
    const PATH: &'static str = "/ip/firewall/mangle";
    const KIND: &'static str = "mangle rule";

    fn key(&self) -> &str {
        &self.id
    }
}

/// A rule in `/ip/firewall/raw`, evaluated before connection tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct FirewallRaw {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "chain")]
    pub chain: String,
    #[record(name = "src-address")]
    pub src_address: String,
    #[record(name = "dst-address")]
    pub dst_address: String,
    #[record(name = "src-port")]
    pub src_port: u16,
    #[record(name = "dst-port")]
    pub dst_port: u16,
    #[record(name = "port")]
    pub any_port: u16,
    #[record(name = "protocol")]
    pub protocol: String,
    #[record(name = "in-interface")]
    pub in_interface: String,
    #[record(name = "out-interface")]
    pub out_interface: String,
    #[record(name = "in-interface-list")]
    pub in_interface_list: String,
    #[record(name = "out-interface-list")]
    pub out_interface_list: String,
    #[record(name = "src-address-list")]
    pub src_address_list: String,
    #[record(name = "dst-address-list")]
    pub dst_address_list: String,
    #[record(name = "src-mac-address")]
    pub src_mac_address: String,
    #[record(name = "ipsec-policy")]
    pub ipsec_policy: String,
    #[record(name = "action")]
    pub action: String,
    #[record(name = "log")]
    pub log: bool,
    #[record(name = "log-prefix")]
    pub log_prefix: String,
    #[record(name = "comment")]
    pub comment: String,
    #[record(name = "disabled")]
    pub disabled: bool,
}

impl Resource for FirewallRaw {
    const PATH: &'static str = "/ip/firewall/raw";
    const KIND: &'static str = "raw rule";

    fn key(&self) -> &str {
        &self.id
    }
}
