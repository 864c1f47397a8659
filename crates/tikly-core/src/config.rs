// ── Runtime connection configuration ──
//
// Describes *how* to reach one device. Carries credentials and transport
// tuning but never touches disk: the CLI resolves profiles and hands a
// `DeviceConfig` in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tikly_api::{Credentials, SessionConfig, TlsMode, TransportConfig};

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// Bundled web PKI roots (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file (PEM).
    CustomCa(PathBuf),
    /// Skip verification (self-signed router certificates).
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single device.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// `host`, `host:port`, or `[v6]:port`. Without a port the API
    /// default is used (8728, or 8729 with TLS).
    pub host: String,
    pub username: String,
    pub password: SecretString,
    /// `None` speaks plaintext.
    pub tls: Option<TlsVerification>,
    /// Dial and per-command timeout.
    pub timeout: Duration,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: "192.168.88.1".into(),
            username: "admin".into(),
            password: SecretString::from(String::new()),
            tls: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl DeviceConfig {
    /// Reject configs that could never reach a device.
    pub fn validate(&self) -> Result<(), CoreError> {
        let problem = if self.host.trim().is_empty() {
            "host is empty"
        } else if self.username.trim().is_empty() {
            "username is empty"
        } else if self.timeout.is_zero() {
            "timeout must be greater than zero"
        } else {
            return Ok(());
        };
        Err(CoreError::Config {
            message: problem.into(),
        })
    }

    /// Build the gateway configuration for this device.
    pub fn session_config(&self) -> SessionConfig {
        let mode = self.tls.as_ref().map(|tls| match tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        });

        let transport = TransportConfig {
            tls: mode,
            timeout: self.timeout,
        };

        SessionConfig::new(
            self.host.clone(),
            Credentials::new(self.username.clone(), self.password.expose_secret()),
        )
        .with_transport(transport)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn plaintext_by_default() {
        let session = DeviceConfig::default().session_config();
        assert_eq!(session.transport.tls, None);
        assert_eq!(session.transport.timeout, Duration::from_secs(30));
        assert_eq!(session.address, "192.168.88.1");
    }

    #[test]
    fn tls_modes_map_onto_transport() {
        let config = DeviceConfig {
            tls: Some(TlsVerification::CustomCa("/etc/tikly/ca.pem".into())),
            ..DeviceConfig::default()
        };
        assert_eq!(
            config.session_config().transport.tls,
            Some(TlsMode::CustomCa("/etc/tikly/ca.pem".into()))
        );

        let config = DeviceConfig {
            tls: Some(TlsVerification::DangerAcceptInvalid),
            ..DeviceConfig::default()
        };
        assert_eq!(
            config.session_config().transport.tls,
            Some(TlsMode::DangerAcceptInvalid)
        );
    }

    #[test]
    fn credentials_carry_over() {
        let config = DeviceConfig {
            username: "ops".into(),
            password: SecretString::from("s3cret".to_owned()),
            ..DeviceConfig::default()
        };
        let session = config.session_config();
        assert_eq!(session.credentials.username, "ops");
        assert_eq!(session.credentials.password.expose_secret(), "s3cret");
    }

    #[test]
    fn default_config_is_valid() {
        DeviceConfig::default().validate().unwrap();
    }

    #[test]
    fn unusable_configs_are_config_errors() {
        let blank_host = DeviceConfig {
            host: "  ".into(),
            ..DeviceConfig::default()
        };
        let no_user = DeviceConfig {
            username: String::new(),
            ..DeviceConfig::default()
        };
        let zero_timeout = DeviceConfig {
            timeout: Duration::ZERO,
            ..DeviceConfig::default()
        };

        for config in [blank_host, no_user, zero_timeout] {
            let err = config.validate().unwrap_err();
            assert!(matches!(err, CoreError::Config { .. }), "got {err:?}");
        }
    }
}
