// ── IPsec domain types ──

use serde::{Deserialize, Serialize};
use tikly_api::Record;

use crate::resource::Resource;

/// A remote IKE peer (`/ip/ipsec/peer`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct IpSecPeer {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "name")]
    pub name: String,
    #[record(name = "address")]
    pub address: String,
    #[record(name = "profile")]
    pub profile: String,
    #[record(name = "exchange-mode")]
    pub exchange_mode: String,
    #[record(name = "send-initial-contact")]
    pub send_initial_contact: bool,
    #[record(name = "passive")]
    pub passive: bool,
    #[record(name = "local-address")]
    pub local_address: String,
    #[record(name = "port")]
    pub port: u16,
}

impl Resource for IpSecPeer {
    const PATH: &'static str = "/ip/ipsec/peer";
    const KIND: &'static str = "IPsec peer";

    fn key(&self) -> &str {
        &self.id
    }
}

/// Phase 2 algorithms (`/ip/ipsec/proposal`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct IpSecProposal {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "name")]
    pub name: String,
    /// Comma-separated, e.g. `sha256,sha1`.
    #[record(name = "auth-algorithms")]
    pub auth_algorithms: String,
    #[record(name = "enc-algorithms")]
    pub enc_algorithms: String,
    /// Device time notation, e.g. `30m`.
    #[record(name = "lifetime")]
    pub lifetime: String,
    #[record(name = "pfs-group")]
    pub pfs_group: String,
    #[record(name = "disabled")]
    pub disabled: bool,
}

impl Resource for IpSecProposal {
    const PATH: &'static str = "/ip/ipsec/proposal";
    const KIND: &'static str = "IPsec proposal";

    fn key(&self) -> &str {
        &self.id
    }
}

/// Phase 1 parameters (`/ip/ipsec/profile`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct IpSecProfile {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "name")]
    pub name: String,
    #[record(name = "dh-group")]
    pub dh_group: String,
    #[record(name = "dpd-interval")]
    pub dpd_interval: String,
    #[record(name = "dpd-maximum-failures")]
    pub dpd_maximum_failures: u32,
    #[record(name = "enc-algorithm")]
    pub enc_algorithm: String,
    #[record(name = "hash-algorithm")]
    pub hash_algorithm: String,
    #[record(name = "lifetime")]
    pub lifetime: String,
    #[record(name = "nat-traversal")]
    pub nat_traversal: bool,
    #[record(name = "proposal-check")]
    pub proposal_check: String,
}

impl Resource for IpSecProfile {
    const PATH: &'static str = "/ip/ipsec/profile";
    const KIND: &'static str = "IPsec profile";

    fn key(&self) -> &str {
        &self.id
    }
}

/// A traffic selector bound to a peer (`/ip/ipsec/policy`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct IpSecPolicy {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "peer")]
    pub peer: String,
    #[record(name = "tunnel")]
    pub tunnel: bool,
    #[record(name = "src-address")]
    pub src_address: String,
    #[record(name = "src-port")]
    pub src_port: u16,
    #[record(name = "dst-address")]
    pub dst_address: String,
    #[record(name = "dst-port")]
    pub dst_port: u16,
    #[record(name = "protocol")]
    pub protocol: String,
    #[record(name = "template")]
    pub template: bool,
    #[record(name = "action")]
    pub action: String,
    #[record(name = "level")]
    pub level: String,
    #[record(name = "ipsec-protocols")]
    pub ipsec_protocols: String,
    #[record(name = "proposal")]
    pub proposal: String,
}

impl Resource for IpSecPolicy {
    const PATH: &'static str = "/ip/ipsec/policy";
    const KIND: &'static str = "IPsec policy";

    fn key(&self) -> &str {
        &self.id
    }
}

/// A named group of policy templates (`/ip/ipsec/policy/group`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct IpSecPolicyGroup {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "name")]
    pub name: String,
}

impl Resource for IpSecPolicyGroup {
    const PATH: &'static str = "/ip/ipsec/policy/group";
    const KIND: &'static str = "IPsec policy group";

    fn key(&self) -> &str {
        &self.id
    }
}

/// Authentication for a peer (`/ip/ipsec/identity`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct IpSecIdentity {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "peer")]
    pub peer: String,
    #[record(name = "auth-method")]
    pub auth_method: String,
    #[record(name = "secret")]
    pub secret: String,
    #[record(name = "username")]
    pub username: String,
    #[record(name = "password")]
    pub password: String,
    #[record(name = "eap-methods")]
    pub eap_methods: String,
    #[record(name = "certificate")]
    pub certificate: String,
    #[record(name = "remote-certificate")]
    pub remote_certificate: String,
    #[record(name = "key")]
    pub key: String,
    #[record(name = "remote-key")]
    pub remote_key: String,
    #[record(name = "policy-template-group")]
    pub policy_template_group: String,
    #[record(name = "notrack-chain")]
    pub notrack_chain: String,
    #[record(name = "my-id")]
    pub my_id: String,
    #[record(name = "remote-id")]
    pub remote_id: String,
    #[record(name = "mode-config")]
    pub mode_config: String,
    #[record(name = "generate-policy")]
    pub generate_policy: String,
    #[record(name = "comment")]
    pub comment: String,
    #[record(name = "disabled")]
    pub disabled: bool,
}

impl Resource for IpSecIdentity {
    const PATH: &'static str = "/ip/ipsec/identity";
    const KIND: &'static str = "IPsec identity";

    fn key(&self) -> &str {
        &self.id
    }
}
