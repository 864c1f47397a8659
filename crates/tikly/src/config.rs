//! CLI configuration: thin wrapper around `tikly_config` shared types.
//!
//! Adds the resolution step that lets `GlobalOpts` flags (--host, --user,
//! --tls, ...) override whatever the selected profile says.

use tikly_config::ConfigError;
use tikly_core::DeviceConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use tikly_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config,
};

/// Profile name reported when the device comes from flags alone.
const FLAGS_PROFILE: &str = "cli";

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Layer CLI flags over a profile. Flags win.
pub fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(ref user) = global.user {
        profile.username = Some(user.clone());
    }
    if let Some(ref password) = global.password {
        profile.password = Some(password.clone());
        profile.password_env = None;
    }
    if let Some(ref ca) = global.ca_cert {
        profile.ca_cert = Some(ca.clone());
        profile.tls = true;
    }
    if global.insecure {
        profile.insecure = Some(true);
        profile.tls = true;
    }
    if global.tls {
        profile.tls = true;
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
}

/// Build the `DeviceConfig` for this invocation from the config file, the
/// selected profile (or `MIKROTIK_*` environment), and CLI overrides.
pub fn build_device_config(global: &GlobalOpts) -> Result<DeviceConfig, CliError> {
    let cfg = load_config()?;

    let (name, mut profile) = match tikly_config::select_profile(&cfg, global.profile.as_deref()) {
        Ok(found) => found,
        Err(ConfigError::NoDevice) if global.host.is_some() => {
            (FLAGS_PROFILE.to_owned(), Profile::default())
        }
        Err(ConfigError::UnknownProfile { name }) => {
            return Err(CliError::ProfileNotFound {
                name,
                available: available_profiles(&cfg),
            });
        }
        Err(e) => return Err(e.into()),
    };

    apply_overrides(&mut profile, global);
    tracing::debug!(profile = %name, host = %profile.host, tls = profile.tls, "resolved device");

    Ok(tikly_config::profile_to_device_config(
        &profile,
        &name,
        &cfg.defaults,
    )?)
}

fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["tikly"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["tftp", "list"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn flags_override_profile_values() {
        let mut profile = Profile {
            host: "10.0.0.1".into(),
            username: Some("admin".into()),
            password_env: Some("LAB_PASSWORD".into()),
            ..Profile::default()
        };
        apply_overrides(
            &mut profile,
            &global(&["--host", "10.0.0.2:8729", "--user", "ops", "--password", "x"]),
        );
        assert_eq!(profile.host, "10.0.0.2:8729");
        assert_eq!(profile.username.as_deref(), Some("ops"));
        assert_eq!(profile.password.as_deref(), Some("x"));
        assert_eq!(profile.password_env, None);
        assert!(!profile.tls);
    }

    #[test]
    fn certificate_flags_imply_tls() {
        let mut profile = Profile::default();
        apply_overrides(&mut profile, &global(&["--ca-cert", "/etc/tikly/ca.pem"]));
        assert!(profile.tls);
        assert_eq!(profile.ca_cert, Some(PathBuf::from("/etc/tikly/ca.pem")));

        let mut profile = Profile::default();
        apply_overrides(&mut profile, &global(&["-k"]));
        assert!(profile.tls);
        assert_eq!(profile.insecure, Some(true));
    }

    #[test]
    fn absent_flags_leave_profile_alone() {
        let mut profile = Profile {
            host: "10.0.0.1".into(),
            timeout: Some(5),
            ..Profile::default()
        };
        apply_overrides(&mut profile, &global(&[]));
        assert_eq!(profile.host, "10.0.0.1");
        assert_eq!(profile.timeout, Some(5));
    }

    #[test]
    fn available_profiles_are_sorted() {
        let mut cfg = Config::default();
        cfg.profiles.insert("lab".into(), Profile::default());
        cfg.profiles.insert("core".into(), Profile::default());
        assert_eq!(available_profiles(&cfg), "core, lab");
        assert_eq!(available_profiles(&Config::default()), "(none)");
    }
}
