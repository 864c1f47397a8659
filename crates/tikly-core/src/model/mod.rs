// ── Domain model ──
//
// One `Record` + `Resource` type per device menu.

pub mod firewall;
pub mod interface;
pub mod ip;
pub mod ipsec;
pub mod system;

pub use firewall::{FirewallMangle, FirewallNat, FirewallRaw, FirewallRule};
pub use interface::{BridgeInterface, BridgePort, VlanInterface};
pub use ip::{DhcpServerNetwork, IpAddress, Tftp};
pub use ipsec::{
    IpSecIdentity, IpSecPeer, IpSecPolicy, IpSecPolicyGroup, IpSecProfile, IpSecProposal,
};
pub use system::{Scheduler, Script};
