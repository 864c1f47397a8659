use tikly_api::Record;

/// A device configuration object addressable under a fixed menu path.
///
/// Every resource shares the same five operations (see [`crate::Client`]);
/// implementing this trait on a `#[derive(Record)]` struct is all it takes
/// to manage a new menu.
pub trait Resource: Record + Clone + Send + Sync {
    /// Menu path without the verb, e.g. `/ip/firewall/filter`.
    const PATH: &'static str;

    /// Human-readable name used in messages, e.g. `"firewall rule"`.
    const KIND: &'static str;

    /// Wire name of the attribute that identifies an object.
    ///
    /// Most menus key on the device-assigned `.id`. Named menus (bridges,
    /// schedulers) key on `name`, which stays stable across reboots.
    const KEY: &'static str = ".id";

    /// Current value of the key attribute. Empty means "not found" after
    /// a lookup.
    fn key(&self) -> &str;
}

/// The full command path for a verb under `R`'s menu.
pub(crate) fn verb<R: Resource>(verb: &str) -> String {
    format!("{}/{verb}", R::PATH)
}
