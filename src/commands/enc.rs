use serde::Serialize;

use crate::io::read_value;
use codeckit::error::Result;
use codeckit::types::{Context, InputSource};
use codeckit::Value;

#[derive(Debug, Serialize)]
pub struct EncodeResult {
    pub codec: String,
    pub input: serde_json::Value,
    pub output: serde_json::Value,
}

pub fn run_encode(ctx: &Context, codec_name: &str, input: &InputSource, raw_text: bool) -> Result<Value> {
    let value = read_value(input, raw_text)?;
    ctx.registry.encode(codec_name, &value)
}

pub fn run_encode_json(ctx: &Context, codec_name: &str, input: &InputSource, raw_text: bool) -> Result<EncodeResult> {
    let codec = ctx.registry.get(codec_name)?;
    let value = read_value(input, raw_text)?;
    let encoded = codec.encode(&value)?;

    Ok(EncodeResult {
        codec: codec.name().to_string(),
        input: value.to_json(),
        output: render(&encoded),
    })
}

/// JSON rendering of a codec result; byte output is shown as text when
/// it is valid UTF-8.
fn render(value: &Value) -> serde_json::Value {
    match value {
        Value::Bytes(b) => match std::str::from_utf8(b) {
            Ok(s) => serde_json::Value::String(s.to_string()),
            Err(_) => value.to_json(),
        },
        other => other.to_json(),
    }
}
