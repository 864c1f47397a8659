// tikly-core: typed resource operations between tikly-api and consumers (CLI).

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod resource;

// ── Primary re-exports ──────────────────────────────────────────────
pub use client::Client;
pub use config::{DeviceConfig, TlsVerification};
pub use error::CoreError;
pub use resource::Resource;

pub use model::{
    // Firewall
    FirewallMangle, FirewallNat, FirewallRaw, FirewallRule,
    // Interfaces
    BridgeInterface, BridgePort, VlanInterface,
    // IP services
    DhcpServerNetwork, IpAddress, Tftp,
    // IPsec
    IpSecIdentity, IpSecPeer, IpSecPolicy, IpSecPolicyGroup, IpSecProfile, IpSecProposal,
    // System
    Scheduler, Script,
};

// Gateway types consumers need without a direct tikly-api dependency.
pub use tikly_api::{Call, ConnectionState, Record, Session, Value};
