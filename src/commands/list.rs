use codeckit::types::{CodecMeta, Context, ValidatorMeta};

pub fn run_list(ctx: &Context) -> Vec<CodecMeta> {
    ctx.registry.list()
}

pub fn run_rules(ctx: &Context) -> Vec<ValidatorMeta> {
    ctx.validators.list()
}
