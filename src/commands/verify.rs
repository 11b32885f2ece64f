use serde::Serialize;

use crate::io::read_encoded;
use codeckit::error::{CodeckitError, Result};
use codeckit::types::{Context, InputSource};

#[derive(Debug, Serialize)]
pub struct VerifyResult {
    pub schema_version: u32,
    pub valid: bool,
    pub codec: String,
    pub error: Option<String>,
    #[serde(skip)]
    pub failure: Option<CodeckitError>,
}

pub fn run_verify(ctx: &Context, codec_name: &str, input: &InputSource) -> Result<VerifyResult> {
    let codec = ctx.registry.get(codec_name)?;
    let data = read_encoded(input, codec.meta().output)?;

    match codec.decode(&data) {
        Ok(_) => Ok(VerifyResult {
            schema_version: 1,
            valid: true,
            codec: codec.name().to_string(),
            error: None,
            failure: None,
        }),
        Err(e) => Ok(VerifyResult {
            schema_version: 1,
            valid: false,
            codec: codec.name().to_string(),
            error: Some(e.to_string()),
            failure: Some(e),
        }),
    }
}
