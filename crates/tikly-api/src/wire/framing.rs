//! Word and sentence framing.
//!
//! Every word is a variable-width length prefix followed by that many
//! bytes. A sentence is a run of words closed by an empty word.
//!
//! ```text
//! length            prefix bytes
//! < 0x80            1   0xxxxxxx
//! < 0x4000          2   10xxxxxx ...
//! < 0x20_0000       3   110xxxxx ...
//! < 0x1000_0000     4   1110xxxx ...
//! otherwise         5   11110000 + u32 big-endian
//! ```

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

use crate::error::Error;

/// Upper bound for a single word, well above anything a device sends.
pub const MAX_WORD_LENGTH: usize = 16 * 1024 * 1024;

/// Codec turning a slice of words into one framed sentence and back.
#[derive(Debug, Default, Clone, Copy)]
pub struct SentenceCodec;

impl SentenceCodec {
    pub fn new() -> Self {
        Self
    }
}

/// Append the length prefix for a word of `len` bytes.
pub fn encode_length(len: usize, dst: &mut BytesMut) -> Result<(), Error> {
    let n = u32::try_from(len)
        .ok()
        .filter(|_| len <= MAX_WORD_LENGTH)
        .ok_or_else(|| Error::Protocol(format!("word of {len} bytes exceeds the frame limit")))?;

    if n < 0x80 {
        dst.put_slice(&n.to_be_bytes()[3..]);
    } else if n < 0x4000 {
        dst.put_slice(&(n | 0x8000).to_be_bytes()[2..]);
    } else if n < 0x20_0000 {
        dst.put_slice(&(n | 0xC0_0000).to_be_bytes()[1..]);
    } else if n < 0x1000_0000 {
        dst.put_u32(n | 0xE000_0000);
    } else {
        dst.put_u8(0xF0);
        dst.put_u32(n);
    }
    Ok(())
}

/// Decode a length prefix at the start of `buf`.
///
/// Returns `(word_length, prefix_width)`, or `None` if more bytes are
/// needed.
pub fn decode_length(buf: &[u8]) -> Result<Option<(usize, usize)>, Error> {
    let Some(&first) = buf.first() else {
        return Ok(None);
    };

    let (width, mask) = if first & 0x80 == 0 {
        (1, 0x7F)
    } else if first & 0xC0 == 0x80 {
        (2, 0x3F)
    } else if first & 0xE0 == 0xC0 {
        (3, 0x1F)
    } else if first & 0xF0 == 0xE0 {
        (4, 0x0F)
    } else if first == 0xF0 {
        (5, 0x00)
    } else {
        return Err(Error::Protocol(format!(
            "reserved control byte {first:#04x} in length prefix"
        )));
    };

    let Some(prefix) = buf.get(1..width) else {
        return Ok(None);
    };

    let len = prefix
        .iter()
        .fold(u32::from(first & mask), |acc, b| (acc << 8) | u32::from(*b));
    let len = usize::try_from(len).map_err(|_| Error::Protocol("word length overflow".into()))?;

    if len > MAX_WORD_LENGTH {
        return Err(Error::Protocol(format!(
            "word of {len} bytes exceeds the frame limit"
        )));
    }

    Ok(Some((len, width)))
}

impl<S: AsRef<str>> Encoder<&[S]> for SentenceCodec {
    type Error = Error;

    fn encode(&mut self, words: &[S], dst: &mut BytesMut) -> Result<(), Error> {
        for word in words {
            let bytes = word.as_ref().as_bytes();
            encode_length(bytes.len(), dst)?;
            dst.put_slice(bytes);
        }
        dst.put_u8(0);
        Ok(())
    }
}

impl Decoder for SentenceCodec {
    type Item = Vec<String>;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Error> {
        let mut cursor = 0;
        let mut spans = Vec::new();

        loop {
            let Some(rest) = src.get(cursor..) else {
                return Ok(None);
            };
            let Some((len, width)) = decode_length(rest)? else {
                return Ok(None);
            };
            let start = cursor + width;

            if len == 0 {
                let words = spans
                    .into_iter()
                    .map(|(from, to)| word_text(&src[from..to]))
                    .collect();
                src.advance(start);
                return Ok(Some(words));
            }

            if src.len() < start + len {
                src.reserve(start + len - src.len());
                return Ok(None);
            }
            spans.push((start, start + len));
            cursor = start + len;
        }
    }
}

/// Word bytes as text. Invalid UTF-8 is replaced, not rejected.
fn word_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            warn!(word = %text, "word is not valid UTF-8, replacing invalid bytes");
            text
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn prefix(len: usize) -> Vec<u8> {
        let mut buf = BytesMut::new();
        encode_length(len, &mut buf).unwrap();
        buf.to_vec()
    }

    #[test]
    fn length_prefix_boundaries() {
        assert_eq!(prefix(0x7F), [0x7F]);
        assert_eq!(prefix(0x80), [0x80, 0x80]);
        assert_eq!(prefix(0x3FFF), [0xBF, 0xFF]);
        assert_eq!(prefix(0x4000), [0xC0, 0x40, 0x00]);
        assert_eq!(prefix(0x20_0000), [0xE0, 0x20, 0x00, 0x00]);
    }

    #[test]
    fn length_prefix_decodes_what_it_encodes() {
        for len in [0, 1, 0x7F, 0x80, 0x3FFF, 0x4000, 0x1F_FFFF, 0x20_0000] {
            let bytes = prefix(len);
            assert_eq!(decode_length(&bytes).unwrap(), Some((len, bytes.len())));
        }
    }

    #[test]
    fn partial_prefix_needs_more_bytes() {
        assert_eq!(decode_length(&[0xC0, 0x40]).unwrap(), None);
        assert_eq!(decode_length(&[]).unwrap(), None);
    }

    #[test]
    fn reserved_control_byte_is_rejected() {
        assert!(decode_length(&[0xF8]).is_err());
    }

    #[test]
    fn sentence_survives_split_delivery() {
        let mut codec = SentenceCodec::new();
        let mut encoded = BytesMut::new();
        codec
            .encode(&["!re", "=.id=*1", "=name=ether1"][..], &mut encoded)
            .unwrap();

        let full = encoded.to_vec();
        let (head, tail) = full.split_at(7);

        let mut buf = BytesMut::from(head);
        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(tail);
        let words = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(words, ["!re", "=.id=*1", "=name=ether1"]);
        assert!(buf.is_empty());
    }

    #[test]
    fn back_to_back_sentences_decode_separately() {
        let mut codec = SentenceCodec::new();
        let mut buf = BytesMut::new();
        codec.encode(&["!re", "=a=1"][..], &mut buf).unwrap();
        codec.encode(&["!done"][..], &mut buf).unwrap();

        assert_eq!(codec.decode(&mut buf).unwrap().unwrap(), ["!re", "=a=1"]);
        assert_eq!(codec.decode(&mut buf).unwrap().unwrap(), ["!done"]);
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn invalid_utf8_word_is_replaced_not_rejected() {
        let mut buf = BytesMut::new();
        buf.put_u8(3);
        buf.put_slice(b"!re");
        buf.put_u8(11);
        buf.put_slice(b"=comment=\xe9t");
        buf.put_u8(0);

        let words = SentenceCodec::new().decode(&mut buf).unwrap().unwrap();
        assert_eq!(words, ["!re", "=comment=\u{FFFD}t"]);
        assert!(buf.is_empty());
    }
}
