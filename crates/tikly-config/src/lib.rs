//! Shared configuration for the tikly CLI.
//!
//! TOML profiles, the `MIKROTIK_*` environment, credential resolution
//! (env + plaintext + keyring), and translation to
//! `tikly_core::DeviceConfig`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tikly_core::{DeviceConfig, TlsVerification};

/// Keyring service name; entries are keyed `<profile>/password`.
pub const KEYRING_SERVICE: &str = "tikly";

/// Profile name used for a device described only by `MIKROTIK_*` variables.
pub const ENV_PROFILE: &str = "env";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("no device configured (create a profile or set MIKROTIK_HOST)")]
    NoDevice,

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named device profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named device profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Device address: `host`, `host:port`, or `[v6]:port`.
    pub host: String,

    /// API user.
    pub username: Option<String>,

    /// Plaintext password. Prefer `password_env` or the keyring.
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Use the API-SSL service.
    #[serde(default)]
    pub tls: bool,

    /// PEM bundle to verify the device certificate against.
    pub ca_cert: Option<PathBuf>,

    /// Accept any device certificate.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

/// The `MIKROTIK_*` environment, as read by figment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnvDevice {
    host: Option<String>,
    user: Option<String>,
    password: Option<String>,
    tls: bool,
    ca_certificate: Option<PathBuf>,
    insecure: bool,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "tikly", "tikly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("tikly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// Layers: built-in defaults, then the TOML file (if present), then
/// `TIKLY_*` variables (`TIKLY_DEFAULTS__OUTPUT=json`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TIKLY_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// A profile built from `MIKROTIK_HOST`, `MIKROTIK_USER`,
/// `MIKROTIK_PASSWORD`, `MIKROTIK_TLS`, `MIKROTIK_CA_CERTIFICATE` and
/// `MIKROTIK_INSECURE`. `None` when `MIKROTIK_HOST` is unset.
pub fn env_profile() -> Result<Option<Profile>, ConfigError> {
    let env: EnvDevice = Figment::from(Env::prefixed("MIKROTIK_")).extract()?;

    Ok(env.host.map(|host| Profile {
        host,
        username: env.user,
        password: env.password,
        password_env: None,
        tls: env.tls,
        ca_cert: env.ca_certificate,
        insecure: Some(env.insecure),
        timeout: None,
    }))
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Profile selection ───────────────────────────────────────────────

/// Pick the profile to use.
///
/// An explicit name must exist. Without one, the configured default is
/// used if present, then the `MIKROTIK_*` environment.
pub fn select_profile(
    config: &Config,
    requested: Option<&str>,
) -> Result<(String, Profile), ConfigError> {
    if let Some(name) = requested {
        return config
            .profiles
            .get(name)
            .map(|p| (name.to_owned(), p.clone()))
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() });
    }

    if let Some(name) = config.default_profile.as_deref() {
        if let Some(profile) = config.profiles.get(name) {
            return Ok((name.to_owned(), profile.clone()));
        }
    }

    env_profile()?
        .map(|p| (ENV_PROFILE.to_owned(), p))
        .ok_or(ConfigError::NoDevice)
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the password: profile's `password_env`, then plaintext, then
/// `MIKROTIK_PASSWORD`, then the system keyring.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. Plaintext in config (or --password)
    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    // 3. Conventional env var
    if let Ok(val) = std::env::var("MIKROTIK_PASSWORD") {
        return Ok(SecretString::from(val));
    }

    // 4. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Resolve the username: profile, then `MIKROTIK_USER`.
pub fn resolve_username(profile: &Profile, profile_name: &str) -> Result<String, ConfigError> {
    profile
        .username
        .clone()
        .or_else(|| std::env::var("MIKROTIK_USER").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })
}

/// TLS strategy for a profile. Insecure wins over a CA bundle.
pub fn resolve_tls(profile: &Profile) -> Option<TlsVerification> {
    if !profile.tls {
        return None;
    }
    Some(if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    })
}

/// Build a `DeviceConfig` from a profile as-is.
pub fn profile_to_device_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<DeviceConfig, ConfigError> {
    if profile.host.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: format!("profile '{profile_name}' has no host"),
        });
    }

    Ok(DeviceConfig {
        host: profile.host.clone(),
        username: resolve_username(profile, profile_name)?,
        password: resolve_password(profile, profile_name)?,
        tls: resolve_tls(profile),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn profiles_load_from_toml() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                default_profile = "lab"

                [defaults]
                output = "json"

                [profiles.lab]
                host = "10.0.0.1"
                username = "admin"
                password = "hunter2"
                tls = true
                ca_cert = "/etc/ssl/router.pem"
                "#,
            )?;

            let config = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(config.defaults.output, "json");
            assert_eq!(config.defaults.timeout, 30);

            let (name, profile) = select_profile(&config, None).unwrap();
            assert_eq!(name, "lab");
            assert_eq!(
                resolve_tls(&profile),
                Some(TlsVerification::CustomCa("/etc/ssl/router.pem".into()))
            );
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[defaults]\ntimeout = 10\n")?;
            jail.set_env("TIKLY_DEFAULTS__TIMEOUT", "5");

            let config = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(config.defaults.timeout, 5);
            Ok(())
        });
    }

    #[test]
    fn mikrotik_environment_forms_a_profile() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("MIKROTIK_HOST", "192.168.88.1:8729");
            jail.set_env("MIKROTIK_USER", "ops");
            jail.set_env("MIKROTIK_PASSWORD", "s3cret");
            jail.set_env("MIKROTIK_TLS", "true");
            jail.set_env("MIKROTIK_INSECURE", "true");

            let (name, profile) = select_profile(&Config::default(), None).unwrap();
            assert_eq!(name, ENV_PROFILE);

            let device = profile_to_device_config(&profile, &name, &Defaults::default()).unwrap();
            assert_eq!(device.host, "192.168.88.1:8729");
            assert_eq!(device.username, "ops");
            assert_eq!(device.password.expose_secret(), "s3cret");
            assert_eq!(device.tls, Some(TlsVerification::DangerAcceptInvalid));
            assert_eq!(device.timeout, Duration::from_secs(30));
            Ok(())
        });
    }

    #[test]
    fn no_profile_and_no_environment_is_no_device() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let err = select_profile(&Config::default(), None).unwrap_err();
            assert!(matches!(err, ConfigError::NoDevice), "got {err:?}");
            Ok(())
        });
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let err = select_profile(&Config::default(), Some("nope")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { .. }), "got {err:?}");
    }

    #[test]
    fn password_env_wins_over_plaintext() {
        Jail::expect_with(|jail| {
            jail.set_env("LAB_ROUTER_PASSWORD", "from-env");
            let profile = Profile {
                host: "10.0.0.1".into(),
                password: Some("from-file".into()),
                password_env: Some("LAB_ROUTER_PASSWORD".into()),
                ..Profile::default()
            };
            let pw = resolve_password(&profile, "lab").unwrap();
            assert_eq!(pw.expose_secret(), "from-env");
            Ok(())
        });
    }

    #[test]
    fn plaintext_wins_over_conventional_env() {
        Jail::expect_with(|jail| {
            jail.set_env("MIKROTIK_PASSWORD", "from-env");
            let profile = Profile {
                host: "10.0.0.1".into(),
                password: Some("from-file".into()),
                ..Profile::default()
            };
            let pw = resolve_password(&profile, "lab").unwrap();
            assert_eq!(pw.expose_secret(), "from-file");
            Ok(())
        });
    }

    #[test]
    fn plaintext_tls_off_means_no_tls() {
        let profile = Profile {
            host: "10.0.0.1".into(),
            insecure: Some(true),
            ..Profile::default()
        };
        assert_eq!(resolve_tls(&profile), None);
    }

    #[test]
    fn empty_host_is_rejected() {
        let profile = Profile {
            username: Some("admin".into()),
            password: Some(String::new()),
            ..Profile::default()
        };
        let err = profile_to_device_config(&profile, "blank", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }), "got {err:?}");
    }
}
