use crate::io::read_encoded;
use codeckit::error::Result;
use codeckit::types::{Context, InputSource};
use codeckit::Value;

pub fn run_conv(ctx: &Context, from_codec: &str, to_codec: &str, input: &InputSource) -> Result<Value> {
    let decoder = ctx.registry.get(from_codec)?;
    let encoder = ctx.registry.get(to_codec)?;

    let data = read_encoded(input, decoder.meta().output)?;
    let decoded = decoder.decode(&data)?;
    tracing::debug!(from = decoder.name(), to = encoder.name(), kind = decoded.kind_name(), "converting");
    encoder.encode(&decoded)
}
