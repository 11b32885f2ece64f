use std::fs::File;
use std::io::{self, Read};

use crate::error::{CodeckitError, Result};
use crate::types::{DataKind, InputSource};
use codeckit::Value;

pub fn read_input(source: &InputSource) -> Result<Vec<u8>> {
    match source {
        InputSource::Stdin => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        InputSource::File(path) => {
            let mut file = File::open(path)?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)?;
            Ok(buf)
        }
        InputSource::Literal(data) => Ok(data.clone()),
    }
}

/// Reads input as text with the trailing line ending removed.
pub fn read_text(source: &InputSource) -> Result<String> {
    let data = read_input(source)?;
    let text = String::from_utf8(data).map_err(|_| CodeckitError::InvalidData)?;
    Ok(text.trim_end_matches(['\r', '\n']).to_string())
}

/// Reads a value to encode: a JSON document when it parses as one,
/// plain text otherwise or when `raw_text` is set.
pub fn read_value(source: &InputSource, raw_text: bool) -> Result<Value> {
    let text = read_text(source)?;
    if raw_text {
        return Ok(Value::Text(text));
    }
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) => Ok(Value::from_json(json)),
        Err(_) => Ok(Value::Text(text)),
    }
}

/// Reads encoded data in the representation the codec expects.
pub fn read_encoded(source: &InputSource, kind: DataKind) -> Result<Value> {
    match kind {
        DataKind::Text => Ok(Value::Text(read_text(source)?.trim().to_string())),
        DataKind::Binary => Ok(Value::Bytes(read_input(source)?)),
    }
}
