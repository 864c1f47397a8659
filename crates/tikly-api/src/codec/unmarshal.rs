//! Reply to record decoding.

use crate::codec::record::Record;
use crate::codec::value;
use crate::error::DecodeError;
use crate::wire::{Reply, Sentence};

/// Decode a reply that should describe at most one object.
///
/// Zero rows yield `R::default()`: callers check the record's key field
/// to tell "not found" apart. More than one row is an error.
pub fn unmarshal<R: Record>(reply: &Reply) -> Result<R, DecodeError> {
    match reply.rows.as_slice() {
        [] => Ok(R::default()),
        [row] => decode_row(row),
        rows => Err(DecodeError::Ambiguous { rows: rows.len() }),
    }
}

/// Decode every row of a reply, in order.
pub fn unmarshal_all<R: Record>(reply: &Reply) -> Result<Vec<R>, DecodeError> {
    reply.rows.iter().map(decode_row).collect()
}

/// Decode one row into a fresh record.
///
/// Each field is looked up by its wire name first and, failing that, by
/// its native attribute name ignoring ASCII case. Fields with no match
/// keep their zero value; keys no field claims are ignored.
pub fn decode_row<R: Record>(row: &Sentence) -> Result<R, DecodeError> {
    let mut record = R::default();
    for (index, field) in R::FIELDS.iter().enumerate() {
        let text = row.get(field.wire_name).or_else(|| {
            row.iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(field.attr_name))
                .map(|(_, value)| value)
        });
        let Some(text) = text else {
            continue;
        };
        let value = value::decode(field.coercion, text).map_err(|source| DecodeError::Field {
            field: field.wire_name,
            source: Box::new(source),
        })?;
        record.set(index, value);
    }
    Ok(record)
}
