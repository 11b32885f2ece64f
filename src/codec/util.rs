use std::borrow::Cow;

use crate::error::{CodeckitError, Result};
use crate::value::Value;

/// Deepest `seq`/`map` nesting the structured decoders accept.
pub const MAX_DEPTH: usize = 128;

/// Byte codecs only accept raw bytes.
pub fn require_bytes(data: &Value) -> Result<&[u8]> {
    data.as_bytes().ok_or(CodeckitError::InvalidData)
}

/// Text codecs accept text, or bytes holding valid UTF-8.
pub fn require_text(data: &Value) -> Result<Cow<'_, str>> {
    match data {
        Value::Text(s) => Ok(Cow::Borrowed(s)),
        Value::Bytes(b) => std::str::from_utf8(b)
            .map(Cow::Borrowed)
            .map_err(|_| CodeckitError::InvalidData),
        _ => Err(CodeckitError::InvalidData),
    }
}

pub fn parse_int(text: &str) -> Result<i64> {
    text.parse::<i64>()
        .map_err(|_| CodeckitError::invalid_number(text))
}
