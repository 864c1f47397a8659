// Transport configuration and dialing.
//
// Builds the byte stream a session talks over: plain TCP, or TCP wrapped
// in rustls with one of three verification modes.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{CryptoProvider, verify_tls12_signature, verify_tls13_signature};
use rustls::{ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme};
use rustls_pki_types::pem::PemObject;
use rustls_pki_types::{CertificateDer, ServerName, UnixTime};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::debug;

use crate::error::Error;

/// API service port.
pub const DEFAULT_PORT: u16 = 8728;
/// API-SSL service port.
pub const DEFAULT_TLS_PORT: u16 = 8729;

/// TLS verification mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsMode {
    /// Verify against the bundled web PKI roots.
    System,
    /// Verify against the CA certificates in the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (self-signed router certificates).
    DangerAcceptInvalid,
}

/// How to reach the device: plaintext or TLS, plus an I/O timeout.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// `None` dials plaintext TCP.
    pub tls: Option<TlsMode>,
    /// Bound on dialing and on each command/reply exchange.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Any duplex byte stream a connection can run over.
pub trait Stream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> Stream for T {}

impl TransportConfig {
    pub fn plaintext() -> Self {
        Self::default()
    }

    pub fn tls(mode: TlsMode) -> Self {
        Self {
            tls: Some(mode),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Port used when the address does not carry one.
    pub fn default_port(&self) -> u16 {
        if self.tls.is_some() {
            DEFAULT_TLS_PORT
        } else {
            DEFAULT_PORT
        }
    }

    /// Open a stream to `address` (`host`, `host:port`, or `[v6]:port`).
    pub async fn connect(&self, address: &str) -> Result<Box<dyn Stream>, Error> {
        let (host, port) = split_host_port(address, self.default_port());
        debug!(%host, port, tls = self.tls.is_some(), "dialing device");

        let tcp = tokio::time::timeout(self.timeout, TcpStream::connect((host.as_str(), port)))
            .await
            .map_err(|_| Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            })?
            .map_err(|source| Error::Connect {
                address: format!("{host}:{port}"),
                source,
            })?;
        tcp.set_nodelay(true)?;

        let Some(mode) = &self.tls else {
            return Ok(Box::new(tcp));
        };

        let connector = TlsConnector::from(Arc::new(build_tls_config(mode)?));
        let server_name = ServerName::try_from(host.clone())
            .map_err(|e| Error::Tls(format!("invalid server name {host:?}: {e}")))?;

        let tls = tokio::time::timeout(self.timeout, connector.connect(server_name, tcp))
            .await
            .map_err(|_| Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            })?
            .map_err(|e| Error::Tls(format!("handshake with {host} failed: {e}")))?;

        Ok(Box::new(tls))
    }
}

/// Build a rustls client config for the given verification mode.
pub fn build_tls_config(mode: &TlsMode) -> Result<ClientConfig, Error> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let builder = ClientConfig::builder_with_provider(Arc::clone(&provider))
        .with_safe_default_protocol_versions()
        .map_err(|e| Error::Tls(format!("failed to build TLS config: {e}")))?;

    let config = match mode {
        TlsMode::System => {
            let mut roots = RootCertStore::empty();
            roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
            builder.with_root_certificates(roots).with_no_client_auth()
        }
        TlsMode::CustomCa(path) => {
            let pem = std::fs::read(path)
                .map_err(|e| Error::Tls(format!("failed to read CA cert {}: {e}", path.display())))?;
            builder
                .with_root_certificates(load_roots(&pem)?)
                .with_no_client_auth()
        }
        TlsMode::DangerAcceptInvalid => builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyCert(provider)))
            .with_no_client_auth(),
    };

    Ok(config)
}

fn load_roots(pem: &[u8]) -> Result<RootCertStore, Error> {
    let mut roots = RootCertStore::empty();
    for cert in CertificateDer::pem_slice_iter(pem) {
        let cert = cert.map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
        roots
            .add(cert)
            .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
    }
    if roots.is_empty() {
        return Err(Error::Tls("CA file contains no certificates".into()));
    }
    Ok(roots)
}

/// Split `address` into host and port, falling back to `default_port`.
pub fn split_host_port(address: &str, default_port: u16) -> (String, u16) {
    if let Some(rest) = address.strip_prefix('[') {
        if let Some((host, tail)) = rest.split_once(']') {
            let port = tail
                .strip_prefix(':')
                .and_then(|p| p.parse().ok())
                .unwrap_or(default_port);
            return (host.to_owned(), port);
        }
    }

    match address.rsplit_once(':') {
        // A bare IPv6 address has more than one colon and no brackets.
        Some((host, port)) if !host.contains(':') => match port.parse() {
            Ok(port) => (host.to_owned(), port),
            Err(_) => (address.to_owned(), default_port),
        },
        _ => (address.to_owned(), default_port),
    }
}

/// Certificate verifier for insecure mode: trusts any chain but still
/// checks handshake signatures so the session keys are sound.
#[derive(Debug)]
struct AcceptAnyCert(Arc<CryptoProvider>);

impl ServerCertVerifier for AcceptAnyCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}
