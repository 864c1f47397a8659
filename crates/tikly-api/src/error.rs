use thiserror::Error;

/// Top-level error type for the `tikly-api` crate.
///
/// Covers every failure mode of a device call: dialing, TLS, login,
/// framing, device-side rejections, and reply decoding.
/// `tikly-core` maps these into user-facing errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login was rejected (wrong credentials, disabled user, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// TCP connection could not be established.
    #[error("Cannot connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// TLS configuration, CA loading, or handshake error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// I/O failure on an established connection.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The device did not answer within the configured timeout.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The byte stream did not follow the sentence framing rules.
    #[error("Protocol error: {0}")]
    Protocol(String),

    // ── Device ──────────────────────────────────────────────────────
    /// The device rejected or failed to execute a command (`!trap`).
    #[error("Device error: {message}")]
    Device {
        message: String,
        /// RouterOS trap category, when the device supplied one.
        category: Option<u8>,
    },

    /// The device terminated the session (`!fatal`).
    #[error("Device closed the session: {0}")]
    Fatal(String),

    // ── Data ────────────────────────────────────────────────────────
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl Error {
    /// Returns `true` if the connection that produced this error can no
    /// longer be trusted and must be re-established before the next call.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connect { .. }
                | Self::Tls(_)
                | Self::Io(_)
                | Self::Timeout { .. }
                | Self::Protocol(_)
                | Self::Fatal(_)
        )
    }

    /// Returns `true` if the device itself rejected the command.
    pub fn is_device(&self) -> bool {
        matches!(self, Self::Device { .. })
    }

    /// Returns `true` if login failed.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}

/// Errors raised while turning wire replies into records.
///
/// Scalar coercion is permissive everywhere except the day count of a
/// duration.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A single-record decode received more than one row.
    #[error("ambiguous reply: expected at most one row, got {rows}")]
    Ambiguous { rows: usize },

    /// The `<N>` in `<N>d<HH:MM:SS>` was not a number.
    #[error("malformed day count in duration {value:?}")]
    DayCount { value: String },

    /// A field-level failure, tagged with the wire name of the field.
    #[error("failed to decode `{field}`: {source}")]
    Field {
        field: &'static str,
        #[source]
        source: Box<DecodeError>,
    },
}
