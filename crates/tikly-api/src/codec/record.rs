//! Static field descriptors for device records.

use crate::codec::value::Value;

/// How a field's wire text maps to its native type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Text,
    Bool,
    Int,
    /// Integer seconds decoded from `"<N>d<HH:MM:SS>"` text.
    Duration,
}

/// Wire name and coercion mode for one record attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Attribute name on the wire, e.g. `src-address` or `.id`.
    pub wire_name: &'static str,
    /// Native attribute name, accepted case-insensitively as a fallback key.
    pub attr_name: &'static str,
    pub coercion: Coercion,
}

impl FieldDescriptor {
    pub const fn new(wire_name: &'static str, attr_name: &'static str, coercion: Coercion) -> Self {
        Self {
            wire_name,
            attr_name,
            coercion,
        }
    }
}

/// A device configuration object the codec can encode and decode.
///
/// Normally implemented with `#[derive(Record)]`. `FIELDS` is a `const`
/// table in attribute declaration order; `get` and `set` address fields by
/// their index in that table. Fields without a wire name are absent from
/// the table and therefore never touched by the codec.
pub trait Record: Default {
    const FIELDS: &'static [FieldDescriptor];

    /// Current value of the field at `index`, or `None` past the end.
    fn get(&self, index: usize) -> Option<Value>;

    /// Store a decoded value. Values of the wrong variant are ignored.
    fn set(&mut self, index: usize, value: Value);

    /// Descriptor of the field with the given wire name.
    fn field(wire_name: &str) -> Option<(usize, &'static FieldDescriptor)> {
        Self::FIELDS
            .iter()
            .enumerate()
            .find(|(_, f)| f.wire_name == wire_name)
    }
}
