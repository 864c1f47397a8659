//! Command dispatch: routes each resource subcommand to the generic handler
//! with its concrete record type.

pub mod config_cmd;
pub mod resource;
pub mod util;

use tikly_core::{
    BridgeInterface, BridgePort, Client, DhcpServerNetwork, FirewallMangle, FirewallNat,
    FirewallRaw, FirewallRule, IpAddress, IpSecIdentity, IpSecPeer, IpSecPolicy,
    IpSecPolicyGroup, IpSecProfile, IpSecProposal, Scheduler, Script, Tftp, VlanInterface,
};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

use self::resource::handle;

/// Run a device command. `Config` and `Completions` never reach here.
pub async fn dispatch(cmd: Command, client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        // Firewall
        Command::FirewallFilter(args) => {
            handle::<FirewallRule>(args, client, global, "firewall-filter").await
        }
        Command::FirewallNat(args) => handle::<FirewallNat>(args, client, global, "firewall-nat").await,
        Command::FirewallMangle(args) => {
            handle::<FirewallMangle>(args, client, global, "firewall-mangle").await
        }
        Command::FirewallRaw(args) => handle::<FirewallRaw>(args, client, global, "firewall-raw").await,

        // IP services
        Command::IpAddress(args) => handle::<IpAddress>(args, client, global, "ip-address").await,
        Command::Tftp(args) => handle::<Tftp>(args, client, global, "tftp").await,
        Command::DhcpNetwork(args) => {
            handle::<DhcpServerNetwork>(args, client, global, "dhcp-network").await
        }

        // Interfaces
        Command::Bridge(args) => handle::<BridgeInterface>(args, client, global, "bridge").await,
        Command::BridgePort(args) => handle::<BridgePort>(args, client, global, "bridge-port").await,
        Command::Vlan(args) => handle::<VlanInterface>(args, client, global, "vlan").await,

        // IPsec
        Command::IpsecPeer(args) => handle::<IpSecPeer>(args, client, global, "ipsec-peer").await,
        Command::IpsecProposal(args) => {
            handle::<IpSecProposal>(args, client, global, "ipsec-proposal").await
        }
        Command::IpsecProfile(args) => {
            handle::<IpSecProfile>(args, client, global, "ipsec-profile").await
        }
        Command::IpsecPolicy(args) => {
            handle::<IpSecPolicy>(args, client, global, "ipsec-policy").await
        }
        Command::IpsecPolicyGroup(args) => {
            handle::<IpSecPolicyGroup>(args, client, global, "ipsec-policy-group").await
        }
        Command::IpsecIdentity(args) => {
            handle::<IpSecIdentity>(args, client, global, "ipsec-identity").await
        }

        // System
        Command::Scheduler(args) => handle::<Scheduler>(args, client, global, "scheduler").await,
        Command::Script(args) => handle::<Script>(args, client, global, "script").await,

        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal {
            message: "local command routed to the device dispatcher".into(),
        }),
    }
}
