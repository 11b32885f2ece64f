use serde::Serialize;

use crate::io::read_encoded;
use codeckit::error::Result;
use codeckit::types::{Context, InputSource};
use codeckit::Value;

#[derive(Debug, Serialize)]
pub struct DecodeResult {
    pub codec: String,
    pub kind: &'static str,
    pub value: serde_json::Value,
}

pub fn run_decode(ctx: &Context, codec_name: &str, input: &InputSource) -> Result<Value> {
    let codec = ctx.registry.get(codec_name)?;
    let data = read_encoded(input, codec.meta().output)?;
    codec.decode(&data)
}

pub fn run_decode_json(ctx: &Context, codec_name: &str, input: &InputSource) -> Result<DecodeResult> {
    let codec = ctx.registry.get(codec_name)?;
    let decoded = run_decode(ctx, codec_name, input)?;

    Ok(DecodeResult {
        codec: codec.name().to_string(),
        kind: decoded.kind_name(),
        value: decoded.to_json(),
    })
}
