//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use tikly_config::ConfigError;
use tikly_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to device at {address}")]
    #[diagnostic(
        code(tikly::connection_failed),
        help(
            "Check that the API service is enabled (/ip service) and reachable.\n\
             Plaintext listens on 8728, API-SSL on 8729."
        )
    )]
    ConnectionFailed {
        address: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS handshake with the device failed: {reason}")]
    #[diagnostic(
        code(tikly::tls_error),
        help(
            "RouterOS usually presents a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or configure ca_cert in your profile."
        )
    )]
    TlsError { reason: String },

    #[error("Device closed the session: {reason}")]
    #[diagnostic(code(tikly::disconnected))]
    Disconnected { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(tikly::auth_failed),
        help(
            "Verify the username and password, and that the user's group has the api policy.\n\
             Run: tikly config set-password --profile <name>"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(tikly::no_credentials),
        help(
            "Set username in the profile and store a password with: tikly config set-password\n\
             Or set MIKROTIK_USER and MIKROTIK_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(tikly::not_found),
        help("Run: tikly {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Device rejected the command: {message}")]
    #[diagnostic(code(tikly::rejected))]
    Rejected { message: String },

    #[error("Cannot decode device reply: {message}")]
    #[diagnostic(code(tikly::decode))]
    Decode { message: String },

    #[error("Internal error: {message}")]
    #[diagnostic(code(tikly::internal))]
    Internal { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tikly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(tikly::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No device configured")]
    #[diagnostic(
        code(tikly::no_config),
        help(
            "Add a profile to {path}\n\
             Or pass --host, or set MIKROTIK_HOST."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(tikly::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(tikly::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Device did not answer within {seconds}s")]
    #[diagnostic(
        code(tikly::timeout),
        help("Increase timeout with --timeout or check device load.")
    )]
    Timeout { seconds: u64 },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(tikly::json), help("Check the JSON input and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Cannot render YAML: {0}")]
    #[diagnostic(code(tikly::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } | Self::Disconnected { .. } => {
                exit_code::CONNECTION
            }
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { reason, .. } if reason.starts_with("TLS error") => {
                CliError::TlsError { reason }
            }

            CoreError::ConnectionFailed { address, reason } => CliError::ConnectionFailed {
                address,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Disconnected { reason } => CliError::Disconnected { reason },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::NotFound { kind, key } => CliError::NotFound {
                list_command: format!("<{kind}> list"),
                resource_type: kind.into(),
                identifier: key,
            },

            CoreError::Decode { message } => CliError::Decode { message },

            CoreError::Rejected { message, .. } => CliError::Rejected { message },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Internal { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: "(none)".into(),
            },
            ConfigError::NoDevice => CliError::NoConfig {
                path: tikly_config::config_path().display().to_string(),
            },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            other => CliError::Config(other),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tls_failures_get_their_own_diagnostic() {
        let err = CliError::from(CoreError::ConnectionFailed {
            address: String::new(),
            reason: "TLS error: invalid peer certificate: UnknownIssuer".into(),
        });
        assert!(matches!(err, CliError::TlsError { .. }), "got {err:?}");
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn exit_codes_follow_error_class() {
        let auth = CliError::from(CoreError::AuthenticationFailed {
            message: "invalid user name or password".into(),
        });
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let missing = CliError::from(CoreError::NotFound {
            kind: "bridge",
            key: "br9".into(),
        });
        assert_eq!(missing.exit_code(), exit_code::NOT_FOUND);

        let trap = CliError::from(CoreError::Rejected {
            message: "failure: already have such address".into(),
            category: None,
        });
        assert_eq!(trap.exit_code(), exit_code::REJECTED);

        let timeout = CliError::from(CoreError::Timeout { timeout_secs: 5 });
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);
    }

    #[test]
    fn missing_device_points_at_config_file() {
        let err = CliError::from(ConfigError::NoDevice);
        assert!(matches!(err, CliError::NoConfig { .. }), "got {err:?}");
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
