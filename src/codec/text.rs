use data_encoding::{Encoding, Specification};

use super::util;
use super::Codec;
use crate::error::{CodeckitError, Result};
use crate::types::{CodecMeta, DataKind};
use crate::value::{any_to_string, Value};

const LINE_SEPARATOR: &str = "\n";

/// Builds a padded Base64-style encoding over a caller-supplied alphabet.
pub fn make_encoding(alphabet: &str) -> Result<Encoding> {
    let mut spec = Specification::new();
    spec.symbols.push_str(alphabet);
    spec.padding = Some('=');
    spec.encoding()
        .map_err(|e| CodeckitError::config(format!("text alphabet: {}", e)))
}

fn decode_string(encoding: &Encoding, data: &Value) -> Result<String> {
    let text = util::require_text(data)?;
    let bytes = encoding.decode(text.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

pub struct Text {
    encoding: Encoding,
    alphabet: String,
}

impl Text {
    pub fn new(alphabet: &str) -> Result<Self> {
        Ok(Self {
            encoding: make_encoding(alphabet)?,
            alphabet: alphabet.to_string(),
        })
    }
}

impl Codec for Text {
    fn name(&self) -> &'static str {
        "text"
    }

    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: "text",
            aliases: &["string"],
            title: "Text obfuscation",
            description: format!("Base64-style encoding over a custom alphabet: {}", self.alphabet),
            output: DataKind::Text,
        }
    }

    fn encode(&self, value: &Value) -> Result<Value> {
        let text = any_to_string(value);
        Ok(Value::Text(self.encoding.encode(text.as_bytes())))
    }

    fn decode(&self, data: &Value) -> Result<Value> {
        decode_string(&self.encoding, data).map(Value::Text)
    }
}

/// Like [`Text`], for string sequences joined by newlines.
///
/// Newline is the only separator: an empty list decodes as `[""]` and an
/// item holding a newline comes back as two items.
pub struct Texts {
    encoding: Encoding,
    alphabet: String,
}

impl Texts {
    pub fn new(alphabet: &str) -> Result<Self> {
        Ok(Self {
            encoding: make_encoding(alphabet)?,
            alphabet: alphabet.to_string(),
        })
    }
}

fn join_lines(value: &Value) -> String {
    if let Value::Seq(items) = value {
        let lines: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
        if let Some(lines) = lines {
            return lines.join(LINE_SEPARATOR);
        }
    }
    any_to_string(value)
}

impl Codec for Texts {
    fn name(&self) -> &'static str {
        "texts"
    }

    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: "texts",
            aliases: &["strings"],
            title: "Text list obfuscation",
            description: format!(
                "Newline-joined string lists over a custom Base64-style alphabet: {}",
                self.alphabet
            ),
            output: DataKind::Text,
        }
    }

    fn encode(&self, value: &Value) -> Result<Value> {
        let text = join_lines(value);
        Ok(Value::Text(self.encoding.encode(text.as_bytes())))
    }

    fn decode(&self, data: &Value) -> Result<Value> {
        let text = decode_string(&self.encoding, data)?;
        Ok(Value::Seq(
            text.split(LINE_SEPARATOR).map(Value::from).collect(),
        ))
    }
}
