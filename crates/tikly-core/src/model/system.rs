// ── System domain types ──

use serde::{Deserialize, Serialize};
use tikly_api::Record;

use crate::resource::Resource;

/// A scheduled task (`/system/scheduler`), keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct Scheduler {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "name")]
    pub name: String,
    /// Script name or inline source run on each tick.
    #[record(name = "on-event")]
    pub on_event: String,
    #[record(name = "start-date")]
    pub start_date: String,
    #[record(name = "start-time")]
    pub start_time: String,
    /// Seconds between runs. The device reports `<N>d<HH:MM:SS>`.
    #[record(name = "interval", duration)]
    pub interval: i64,
    #[record(name = "disabled")]
    pub disabled: bool,
    #[record(name = "comment")]
    pub comment: String,
}

impl Resource for Scheduler {
    const PATH: &'static str = "/system/scheduler";
    const KIND: &'static str = "scheduler";
    const KEY: &'static str = "name";

    fn key(&self) -> &str {
        &self.name
    }
}

/// A stored script (`/system/script`), keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct Script {
    #[record(name = ".id")]
    pub id: String,
    #[record(name = "name")]
    pub name: String,
    #[record(name = "owner")]
    pub owner: String,
    #[record(name = "source")]
    pub source: String,
    /// Comma-separated permission list, e.g. `read,write,test`.
    #[record(name = "policy")]
    pub policy: String,
    #[record(name = "dont-require-permissions")]
    pub dont_require_permissions: bool,
    #[record(name = "comment")]
    pub comment: String,
}

impl Resource for Script {
    const PATH: &'static str = "/system/script";
    const KIND: &'static str = "script";
    const KEY: &'static str = "name";

    fn key(&self) -> &str {
        &self.name
    }
}
