// ── Interface domain types ──

use serde::{Deserialize, Serialize};
use tikly_api::Record;

use crate::resource::Resource;

/// A software bridge (`/interface/bridge`), keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct BridgeInterface {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "name")]
    pub name: String,
    #[record(name = "mtu")]
    pub mtu: u16,
    #[record(name = "disabled")]
    pub disabled: bool,
    #[record(name = "auto-mac")]
    pub auto_mac: bool,
    #[record(name = "admin-mac")]
    pub admin_mac: String,
    #[record(name = "comment")]
    pub comment: String,
}

impl Resource for BridgeInterface {
    const PATH: &'static str = "/interface/bridge";
    const KIND: &'static str = "bridge";
    const KEY: &'static str = "name";

    fn key(&self) -> &str {
        &self.name
    }
}

/// Membership of an interface in a bridge (`/interface/bridge/port`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct BridgePort {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "bridge")]
    pub bridge: String,
    #[record(name = "interface")]
    pub interface: String,
    #[record(name = "horizon")]
    pub horizon: String,
    #[record(name = "learn")]
    pub learn: String,
    #[record(name = "unknown-multicast-flood")]
    pub unknown_multicast_flood: bool,
    #[record(name = "unknown-unicast-flood")]
    pub unknown_unicast_flood: bool,
    #[record(name = "broadcast-flood")]
    pub broadcast_flood: bool,
    #[record(name = "trusted")]
    pub trusted: bool,
    #[record(name = "hw")]
    pub hardware_offload: bool,
    #[record(name = "auto-isolate")]
    pub auto_isolate: bool,
    #[record(name = "restricted-role")]
    pub restricted_role: bool,
    #[record(name = "restricted-tcn")]
    pub restricted_tcn: bool,
    #[record(name = "bpdu-guard")]
    pub bpdu_guard: bool,
    #[record(name = "priority")]
    pub priority: u32,
    #[record(name = "path-cost")]
    pub path_cost: u32,
    #[record(name = "internal-path-cost")]
    pub internal_path_cost: u32,
    #[record(name = "edge")]
    pub edge: String,
    #[record(name = "point-to-point")]
    pub point_to_point: String,
    #[record(name = "disabled")]
    pub disabled: bool,
    #[record(name = "comment")]
    pub comment: String,
}

impl Resource for BridgePort {
    const PATH: &'static str = "/interface/bridge/port";
    const KIND: &'static str = "bridge port";

    fn key(&self) -> &str {
        &self.id
    }
}

/// An 802.1Q VLAN interface (`/interface/vlan`), keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct VlanInterface {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "name")]
    pub name: String,
    /// Parent interface.
    #[record(name = "interface")]
    pub interface: String,
    #[record(name = "mtu")]
    pub mtu: u16,
    #[record(name = "vlan-id")]
    pub vlan_id: u16,
    /// 802.1ad service tag instead of 802.1Q.
    #[record(name = "use-service-tag")]
    pub use_service_tag: bool,
    #[record(name = "disabled")]
    pub disabled: bool,
    #[record(name = "comment")]
    pub comment: String,
}

impl Resource for VlanInterface {
    const PATH: &'static str = "/interface/vlan";
    const KIND: &'static str = "VLAN interface";
    const KEY: &'static str = "name";

    fn key(&self) -> &str {
        &self.name
    }
}
