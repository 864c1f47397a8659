// Session / call gateway
//
// A `Session` owns at most one live device connection. The connection is
// opened (and logged in) lazily on the first call, reused for every call
// after that, and dropped as soon as a call fails at the transport level.
// Calls on one session are serialised by an async mutex.

use std::future::Future;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use secrecy::ExposeSecret;
use tokio::sync::{Mutex, watch};
use tokio_util::codec::Framed;
use tracing::{debug, trace, warn};

use crate::auth::Credentials;
use crate::error::Error;
use crate::transport::{Stream, TransportConfig};
use crate::wire::framing::SentenceCodec;
use crate::wire::{Command, Reply, Sentence};

/// Where and how to reach one device.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// `host`, `host:port`, or `[v6]:port`.
    pub address: String,
    pub credentials: Credentials,
    pub transport: TransportConfig,
}

impl SessionConfig {
    pub fn new(address: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            address: address.into(),
            credentials,
            transport: TransportConfig::default(),
        }
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }
}

/// Lifecycle of the session's device connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Unconnected,
    Connecting,
    Connected,
    /// The last connect attempt failed. The next call tries again.
    Failed,
}

/// Anything that can carry a command to a device and bring back its reply.
///
/// `Session` is the real implementation; tests and higher layers can drive
/// resource operations through any other gateway.
pub trait Call: Send + Sync {
    fn call(&self, command: &Command) -> impl Future<Output = Result<Reply, Error>> + Send;
}

/// An established, logged-in device connection.
pub struct Connection {
    framed: Framed<Box<dyn Stream>, SentenceCodec>,
    timeout: Duration,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Dial the device and log in.
    pub async fn open(config: &SessionConfig) -> Result<Self, Error> {
        let stream = config.transport.connect(&config.address).await?;
        let mut connection = Self::new(stream, config.transport.timeout);
        connection.login(&config.credentials).await?;
        Ok(connection)
    }

    /// Wrap an already-open stream. No login is performed.
    pub fn new(stream: Box<dyn Stream>, timeout: Duration) -> Self {
        Self {
            framed: Framed::new(stream, SentenceCodec::new()),
            timeout,
        }
    }

    /// Plain-text login (`/login =name= =password=`).
    ///
    /// Devices that answer with a `ret` challenge only speak the legacy
    /// MD5 login, which is refused.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<(), Error> {
        debug!(username = %credentials.username, "logging in");
        let command = Command::new("/login")
            .attr("name", &credentials.username)
            .attr("password", credentials.password.expose_secret());

        match self.run(&command).await {
            Ok(reply) if reply.ret().is_some() => Err(Error::Authentication {
                message: "device requested the legacy challenge login, which is not supported"
                    .into(),
            }),
            Ok(_) => Ok(()),
            Err(Error::Device { message, .. }) => Err(Error::Authentication { message }),
            Err(e) => Err(e),
        }
    }

    /// Send one command and collect its full reply, bounded by the
    /// connection timeout.
    pub async fn run(&mut self, command: &Command) -> Result<Reply, Error> {
        let timeout = self.timeout;
        tokio::time::timeout(timeout, self.exchange(command))
            .await
            .map_err(|_| Error::Timeout {
                timeout_secs: timeout.as_secs(),
            })?
    }

    async fn exchange(&mut self, command: &Command) -> Result<Reply, Error> {
        debug!(path = command.path(), "sending command");
        trace!(%command, "command words");
        self.framed.send(command.words()).await?;

        let mut reply = Reply::default();
        let mut trap = None;

        loop {
            let words = self
                .framed
                .next()
                .await
                .ok_or_else(|| Error::Protocol("connection closed before !done".into()))??;

            let Some((kind, attrs)) = words.split_first() else {
                continue;
            };
            let sentence = Sentence::from_words(attrs);
            trace!(kind = kind.as_str(), attrs = sentence.len(), "reply sentence");

            match kind.as_str() {
                "!re" => reply.rows.push(sentence),
                "!done" => {
                    reply.done = sentence;
                    break;
                }
                "!trap" => {
                    // Keep the first trap; the device still finishes with !done.
                    if trap.is_none() {
                        trap = Some(Error::Device {
                            message: sentence.get("message").unwrap_or("unknown error").to_owned(),
                            category: sentence.get("category").and_then(|c| c.parse().ok()),
                        });
                    }
                }
                "!fatal" => {
                    let reason = attrs.join(" ");
                    return Err(Error::Fatal(reason));
                }
                "!empty" => {}
                other => {
                    return Err(Error::Protocol(format!("unexpected reply word {other:?}")));
                }
            }
        }

        debug!(
            path = command.path(),
            rows = reply.rows.len(),
            trapped = trap.is_some(),
            "command finished"
        );

        match trap {
            Some(err) => Err(err),
            None => Ok(reply),
        }
    }
}

/// Lazily-connected gateway to one device.
pub struct Session {
    config: SessionConfig,
    connection: Mutex<Option<Connection>>,
    state: watch::Sender<ConnectionState>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("address", &self.config.address)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session. Nothing is dialed until the first call.
    pub fn new(config: SessionConfig) -> Self {
        let (state, _) = watch::channel(ConnectionState::Unconnected);
        Self {
            config,
            connection: Mutex::new(None),
            state,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Watch connection state changes.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Issue a command, connecting first if needed.
    ///
    /// A transport failure (I/O, timeout, framing, `!fatal`) drops the
    /// connection so the next call dials afresh. Device errors (`!trap`)
    /// leave it in place. Nothing is retried.
    ///
    /// If the returned future is dropped mid-exchange, the connection is
    /// discarded and the state falls back to `Unconnected`.
    pub async fn call(&self, command: &Command) -> Result<Reply, Error> {
        let mut slot = self.connection.lock().await;
        let mut in_flight = InFlight::new(&self.state);

        let mut connection = match slot.take() {
            Some(connection) => connection,
            None => match self.connect().await {
                Ok(connection) => connection,
                Err(e) => {
                    in_flight.disarm();
                    return Err(e);
                }
            },
        };

        let result = connection.run(command).await;
        match &result {
            Err(e) if e.is_transport() => {
                warn!(error = %e, address = %self.config.address, "dropping device connection");
            }
            _ => {
                *slot = Some(connection);
                in_flight.disarm();
            }
        }
        result
    }

    /// Drop the live connection, if any.
    pub async fn close(&self) {
        if self.connection.lock().await.take().is_some() {
            debug!(address = %self.config.address, "closing device connection");
        }
        self.state.send_replace(ConnectionState::Unconnected);
    }

    async fn connect(&self) -> Result<Connection, Error> {
        self.state.send_replace(ConnectionState::Connecting);
        debug!(address = %self.config.address, "connecting to device");

        match Connection::open(&self.config).await {
            Ok(connection) => {
                self.state.send_replace(ConnectionState::Connected);
                Ok(connection)
            }
            Err(e) => {
                self.state.send_replace(ConnectionState::Failed);
                Err(e)
            }
        }
    }
}

/// Publishes `Unconnected` on drop unless the connection went back into
/// its slot.
struct InFlight<'a> {
    state: &'a watch::Sender<ConnectionState>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a watch::Sender<ConnectionState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.send_replace(ConnectionState::Unconnected);
        }
    }
}

impl Call for Session {
    fn call(&self, command: &Command) -> impl Future<Output = Result<Reply, Error>> + Send {
        Session::call(self, command)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bytes::BytesMut;
    use tokio_util::codec::Encoder;

    use super::*;

    fn frame(words: &[&str]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        SentenceCodec::new().encode(words, &mut buf).unwrap();
        buf.to_vec()
    }

    fn scripted(script: tokio_test::io::Builder) -> Connection {
        let mut script = script;
        Connection::new(Box::new(script.build()), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn rows_and_done_attributes_are_collected() {
        let mut script = tokio_test::io::Builder::new();
        script
            .write(&frame(&["/ip/address/print"]))
            .read(&frame(&["!re", "=.id=*1", "=address=10.0.0.1/24"]))
            .read(&frame(&["!re", "=.id=*2", "=address=10.0.1.1/24"]))
            .read(&frame(&["!done"]));
        let mut connection = scripted(script);

        let reply = connection
            .run(&Command::new("/ip/address/print"))
            .await
            .unwrap();
        assert_eq!(reply.rows.len(), 2);
        assert_eq!(reply.rows[1].get("address"), Some("10.0.1.1/24"));
        assert!(reply.done.is_empty());
    }

    #[tokio::test]
    async fn trap_is_reported_after_done() {
        let mut script = tokio_test::io::Builder::new();
        script
            .write(&frame(&["/ip/address/remove", "=numbers=*9"]))
            .read(&frame(&["!trap", "=category=0", "=message=no such item"]))
            .read(&frame(&["!done"]));
        let mut connection = scripted(script);

        let err = connection
            .run(&Command::new("/ip/address/remove").numbers("*9"))
            .await
            .unwrap_err();
        match err {
            Error::Device { message, category } => {
                assert_eq!(message, "no such item");
                assert_eq!(category, Some(0));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn fatal_is_a_transport_error() {
        let mut script = tokio_test::io::Builder::new();
        script
            .write(&frame(&["/system/reboot"]))
            .read(&frame(&["!fatal", "session terminated on request"]));
        let mut connection = scripted(script);

        let err = connection
            .run(&Command::new("/system/reboot"))
            .await
            .unwrap_err();
        assert!(matches!(&err, Error::Fatal(reason) if reason == "session terminated on request"));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn login_rejection_is_an_authentication_error() {
        let mut script = tokio_test::io::Builder::new();
        script
            .write(&frame(&["/login", "=name=admin", "=password=wrong"]))
            .read(&frame(&["!trap", "=message=invalid user name or password (6)"]))
            .read(&frame(&["!done"]));
        let mut connection = scripted(script);

        let err = connection
            .login(&Credentials::new("admin", "wrong"))
            .await
            .unwrap_err();
        assert!(err.is_auth(), "got {err:?}");
    }

    #[tokio::test]
    async fn legacy_challenge_login_is_refused() {
        let mut script = tokio_test::io::Builder::new();
        script
            .write(&frame(&["/login", "=name=admin", "=password=secret"]))
            .read(&frame(&["!done", "=ret=93b438ec9b80057c06dd9fe67d56aa9a"]));
        let mut connection = scripted(script);

        let err = connection
            .login(&Credentials::new("admin", "secret"))
            .await
            .unwrap_err();
        assert!(err.is_auth(), "got {err:?}");
    }

    #[tokio::test]
    async fn stream_closed_mid_reply_is_a_protocol_error() {
        let mut script = tokio_test::io::Builder::new();
        script
            .write(&frame(&["/ip/address/print"]))
            .read(&frame(&["!re", "=.id=*1"]));
        let mut connection = scripted(script);

        let err = connection
            .run(&Command::new("/ip/address/print"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Protocol(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn new_session_is_unconnected_and_close_is_idempotent() {
        let session = Session::new(SessionConfig::new(
            "127.0.0.1:1",
            Credentials::new("admin", ""),
        ));
        assert_eq!(session.state(), ConnectionState::Unconnected);
        session.close().await;
        assert_eq!(session.state(), ConnectionState::Unconnected);
    }
}
