//! Clap derive structures for the `tikly` CLI.
//!
//! Every device menu shares the same five verbs, so the tree is one
//! subcommand per resource over a common [`ResourceArgs`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tikly: manage RouterOS configuration over the API service
#[derive(Debug, Parser)]
#[command(
    name = "tikly",
    version,
    about = "Manage RouterOS devices from the command line",
    long_about = "Reads and writes RouterOS configuration menus over the binary API\n\
        service (8728, or 8729 with TLS). Objects are passed as JSON.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Device profile to use
    #[arg(long, short = 'p', env = "TIKLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Device address: host, host:port or [v6]:port (overrides profile)
    #[arg(long, short = 'H', global = true)]
    pub host: Option<String>,

    /// API user (overrides profile)
    #[arg(long, short = 'u', global = true)]
    pub user: Option<String>,

    /// API password (overrides profile)
    #[arg(long, global = true, hide = true)]
    pub password: Option<String>,

    /// Use the API-SSL service
    #[arg(long, global = true)]
    pub tls: bool,

    /// PEM bundle to verify the device certificate against (implies --tls)
    #[arg(long, global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Accept any device certificate (implies --tls)
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Dial and command timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TIKLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one key per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Firewall filter rules (/ip/firewall/filter)
    #[command(alias = "filter")]
    FirewallFilter(ResourceArgs),

    /// Firewall NAT rules (/ip/firewall/nat)
    #[command(alias = "nat")]
    FirewallNat(ResourceArgs),

    /// Firewall mangle rules (/ip/firewall/mangle)
    #[command(alias = "mangle")]
    FirewallMangle(ResourceArgs),

    /// Firewall raw rules (/ip/firewall/raw)
    #[command(alias = "raw")]
    FirewallRaw(ResourceArgs),

    /// Interface addresses (/ip/address)
    #[command(alias = "address")]
    IpAddress(ResourceArgs),

    /// TFTP server entries (/ip/tftp)
    Tftp(ResourceArgs),

    /// DHCP server networks (/ip/dhcp-server/network)
    DhcpNetwork(ResourceArgs),

    /// Bridges, by name (/interface/bridge)
    Bridge(ResourceArgs),

    /// Bridge ports (/interface/bridge/port)
    BridgePort(ResourceArgs),

    /// VLAN interfaces, by name (/interface/vlan)
    Vlan(ResourceArgs),

    /// IPsec peers (/ip/ipsec/peer)
    IpsecPeer(ResourceArgs),

    /// IPsec proposals (/ip/ipsec/proposal)
    IpsecProposal(ResourceArgs),

    /// IPsec profiles (/ip/ipsec/profile)
    IpsecProfile(ResourceArgs),

    /// IPsec policies (/ip/ipsec/policy)
    IpsecPolicy(ResourceArgs),

    /// IPsec policy groups (/ip/ipsec/policy/group)
    IpsecPolicyGroup(ResourceArgs),

    /// IPsec identities (/ip/ipsec/identity)
    IpsecIdentity(ResourceArgs),

    /// Scheduled tasks, by name (/system/scheduler)
    Scheduler(ResourceArgs),

    /// Stored scripts, by name (/system/script)
    Script(ResourceArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RESOURCES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ResourceArgs {
    #[command(subcommand)]
    pub command: ResourceCommand,
}

#[derive(Debug, Subcommand)]
pub enum ResourceCommand {
    /// List every object in the menu
    #[command(alias = "ls")]
    List,

    /// Show one object by key (`.id` such as `*1A`, or name)
    Get {
        /// Object key
        key: String,
    },

    /// Create an object from JSON and print it as stored
    #[command(alias = "create")]
    Add {
        /// JSON file to read (stdin when omitted)
        #[arg(long = "from", short = 'f')]
        from: Option<PathBuf>,
    },

    /// Push the fields of a JSON object to the object it identifies
    #[command(alias = "set")]
    Update {
        /// JSON file to read (stdin when omitted)
        #[arg(long = "from", short = 'f')]
        from: Option<PathBuf>,
    },

    /// Remove an object by key
    #[command(alias = "rm", alias = "remove")]
    Delete {
        /// Object key
        key: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the loaded configuration (passwords redacted)
    Show,

    /// Print the config file location
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
