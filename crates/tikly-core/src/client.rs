// ── Resource client ──
//
// Generic create / list / find / update / delete over any `Resource`.
// Each operation is encode -> call -> decode; the client holds no state
// besides the gateway.

use tikly_api::{Call, Command, Session, marshal, unmarshal, unmarshal_all};
use tracing::debug;

use crate::config::DeviceConfig;
use crate::error::CoreError;
use crate::resource::{Resource, verb};

/// Typed access to a device's configuration menus.
#[derive(Debug)]
pub struct Client<C: Call = Session> {
    gateway: C,
}

impl Client<Session> {
    /// Client over a lazily-connected session. The config is validated
    /// here, but nothing is dialed until the first operation.
    pub fn connect_lazy(config: &DeviceConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self::new(Session::new(config.session_config())))
    }
}

impl<C: Call> Client<C> {
    pub fn new(gateway: C) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &C {
        &self.gateway
    }

    /// Create an object and read it back as the device stored it.
    pub async fn add<R: Resource>(&self, record: &R) -> Result<R, CoreError> {
        let reply = self.gateway.call(&marshal(&verb::<R>("add"), record)).await?;

        let key = if R::KEY == ".id" {
            reply.ret().map(str::to_owned).ok_or_else(|| {
                CoreError::Internal(format!("device assigned no id to the new {}", R::KIND))
            })?
        } else {
            record.key().to_owned()
        };

        debug!(kind = R::KIND, %key, "created");
        self.find(&key).await
    }

    /// Every object in the menu, in device order.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, CoreError> {
        let reply = self.gateway.call(&Command::new(verb::<R>("print"))).await?;
        Ok(unmarshal_all(&reply)?)
    }

    /// The object whose key attribute equals `key`.
    pub async fn find<R: Resource>(&self, key: &str) -> Result<R, CoreError> {
        let command = Command::new(verb::<R>("print")).query(R::KEY, key);
        let reply = self.gateway.call(&command).await?;
        let record: R = unmarshal(&reply)?;

        if record.key().is_empty() {
            return Err(CoreError::NotFound {
                kind: R::KIND,
                key: key.to_owned(),
            });
        }
        Ok(record)
    }

    /// Like [`Client::find`], but a missing object is `None` rather than
    /// an error.
    pub async fn get<R: Resource>(&self, key: &str) -> Result<Option<R>, CoreError> {
        match self.find(key).await {
            Ok(record) => Ok(Some(record)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Push every non-zero field (and every boolean) of `record` to the
    /// object it identifies, then read it back.
    pub async fn update<R: Resource>(&self, record: &R) -> Result<R, CoreError> {
        if record.key().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: format!("{} update needs `{}`", R::KIND, R::KEY),
            });
        }
        let mut command = marshal(&verb::<R>("set"), record);
        // Name-keyed objects read back without `.id` need an explicit selector.
        if R::KEY != ".id" && !command.words().iter().any(|w| w.starts_with("=.id=")) {
            command.push_attr("numbers", record.key());
        }
        self.gateway.call(&command).await?;
        debug!(kind = R::KIND, key = record.key(), "updated");
        self.find(record.key()).await
    }

    /// Remove the object identified by `key`.
    pub async fn delete<R: Resource>(&self, key: &str) -> Result<(), CoreError> {
        let command = Command::new(verb::<R>("remove")).numbers(key);
        self.gateway.call(&command).await?;
        debug!(kind = R::KIND, %key, "deleted");
        Ok(())
    }
}
