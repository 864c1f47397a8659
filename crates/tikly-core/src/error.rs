// ── Core error types ──
//
// User-facing errors from tikly-core. Consumers never see framing or
// socket details directly: the `From<tikly_api::Error>` impl translates
// gateway failures into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to device at {address}: {reason}")]
    ConnectionFailed { address: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Device closed the session: {reason}")]
    Disconnected { reason: String },

    #[error("Device did not answer within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("Cannot decode device reply: {message}")]
    Decode { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation rejected by device: {message}")]
    Rejected {
        message: String,
        /// RouterOS trap category, when present.
        category: Option<u8>,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from gateway errors ───────────────────────────────────

impl From<tikly_api::Error> for CoreError {
    fn from(err: tikly_api::Error) -> Self {
        match err {
            tikly_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            tikly_api::Error::Connect { address, source } => CoreError::ConnectionFailed {
                address,
                reason: source.to_string(),
            },
            tikly_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                address: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            tikly_api::Error::Io(e) => CoreError::Disconnected {
                reason: e.to_string(),
            },
            tikly_api::Error::Fatal(reason) => CoreError::Disconnected { reason },
            tikly_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            tikly_api::Error::Protocol(msg) => {
                CoreError::Internal(format!("Protocol error: {msg}"))
            }
            tikly_api::Error::Device { message, category } => {
                CoreError::Rejected { message, category }
            }
            tikly_api::Error::Decode(e) => CoreError::Decode {
                message: e.to_string(),
            },
        }
    }
}

impl From<tikly_api::DecodeError> for CoreError {
    fn from(err: tikly_api::DecodeError) -> Self {
        CoreError::Decode {
            message: err.to_string(),
        }
    }
}

impl CoreError {
    /// Whether this is the uniform "object does not exist" signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }
}
