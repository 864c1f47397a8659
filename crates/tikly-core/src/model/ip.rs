// ── IP services ──

use serde::{Deserialize, Serialize};
use tikly_api::Record;

use crate::resource::Resource;

/// An address assigned to an interface (`/ip/address`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct IpAddress {
    #[record(name = ".id")]
    pub id: String,
    /// CIDR notation, e.g. `10.0.0.1/24`.
    #[record(name = "address")]
    pub address: String,
    #[record(name = "comment")]
    pub comment: String,
    #[record(name = "disabled")]
    pub disabled: bool,
    #[record(name = "interface")]
    pub interface: String,
    /// Derived by the device from `address` when left empty.
    #[record(name = "network")]
    pub network: String,
}

impl Resource for IpAddress {
    const PATH: &'static str = "/ip/address";
    const KIND: &'static str = "IP address";

    fn key(&self) -> &str {
        &self.id
    }
}

/// A TFTP server access rule (`/ip/tftp`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct Tftp {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "ip-addresses")]
    pub ip_addresses: String,
    #[record(name = "req-filename")]
    pub req_filename: String,
    #[record(name = "real-filename")]
    pub real_filename: String,
    #[record(name = "allow")]
    pub allow: bool,
    #[record(name = "read-only")]
    pub read_only: bool,
    #[record(name = "disabled")]
    pub disabled: bool,
    #[record(name = "comment")]
    pub comment: String,
}

impl Resource for Tftp {
    const PATH: &'static str = "/ip/tftp";
    const KIND: &'static str = "TFTP rule";

    fn key(&self) -> &str {
        &self.id
    }
}

/// Options handed to clients of one DHCP network (`/ip/dhcp-server/network`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct DhcpServerNetwork {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "address")]
    pub address: String,
    #[record(name = "comment")]
    pub comment: String,
    #[record(name = "dns-server")]
    pub dns_server: String,
    #[record(name = "gateway")]
    pub gateway: String,
    /// `0` means "use the mask of `address`".
    #[record(name = "netmask")]
    pub netmask: String,
    #[record(name = "next-server")]
    pub next_server: String,
    #[record(name = "ntp-server")]
    pub ntp_server: String,
    #[record(name = "wins-server")]
    pub wins_server: String,
    #[record(name = "boot-file-name")]
    pub boot_file_name: String,
    #[record(name = "domain")]
    pub domain: String,
    #[record(name = "dhcp-option-set")]
    pub dhcp_option_set: String,
}

impl Resource for DhcpServerNetwork {
    const PATH: &'static str = "/ip/dhcp-server/network";
    const KIND: &'static str = "DHCP network";

    fn key(&self) -> &str {
        &self.id
    }
}
