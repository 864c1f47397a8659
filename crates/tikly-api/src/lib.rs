// tikly-api: record codec and session gateway for the RouterOS sentence API
//
// Leaf-first: `codec` converts typed records to and from wire sentences,
// `wire` frames sentences on a byte stream, `transport` dials TCP/TLS, and
// `session` owns the single lazily-established device connection.

// Lets `#[derive(Record)]` expand to `::tikly_api::...` paths inside this crate.
extern crate self as tikly_api;

pub mod auth;
pub mod codec;
pub mod error;
pub mod session;
pub mod transport;
pub mod wire;

pub use auth::Credentials;
pub use codec::marshal::marshal;
pub use codec::record::{Coercion, FieldDescriptor, Record};
pub use codec::unmarshal::{decode_row, unmarshal, unmarshal_all};
pub use codec::value::Value;
pub use error::{DecodeError, Error};
pub use session::{Call, ConnectionState, Session, SessionConfig};
pub use tikly_derive::Record;
pub use transport::{TlsMode, TransportConfig};
pub use wire::{Command, Reply, Sentence};
