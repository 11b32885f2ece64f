use serde::Serialize;

use codeckit::error::Result;
use codeckit::types::Context;

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub rule: String,
    pub value: String,
    pub valid: bool,
}

pub fn run_check(ctx: &Context, rule: &str, value: &str) -> Result<CheckResult> {
    let valid = ctx.validators.is_match(rule, value)?;
    Ok(CheckResult {
        rule: rule.to_string(),
        value: value.to_string(),
        valid,
    })
}
