// Record codec
//
// Bridges strongly-typed records and the device's weakly-typed wire
// sentences. `record` holds the static field descriptors, `value` the
// scalar coercions, and `marshal` / `unmarshal` the two directions.

pub mod marshal;
pub mod record;
pub mod unmarshal;
pub mod value;
