mod check;
mod conv;
mod dec;
mod digest;
mod enc;
mod info;
mod list;
mod verify;

pub use check::run_check;
pub use conv::run_conv;
pub use dec::{run_decode, run_decode_json};
pub use digest::run_digest;
pub use enc::{run_encode, run_encode_json};
pub use info::run_info;
pub use list::{run_list, run_rules};
pub use verify::run_verify;

use crate::io::{write_output, write_value, OutputConfig};
use codeckit::digest::Algorithm;
use codeckit::error::{CodeckitError, Result};
use codeckit::types::{Context, InputSource, OutputDest};

pub trait CommandHandler {
    fn execute(&self, ctx: &Context) -> Result<()>;
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub struct EncCommand {
    pub codec: String,
    pub input: InputSource,
    pub output: OutputDest,
    pub text: bool,
    pub json: bool,
}

impl CommandHandler for EncCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        if self.json {
            let result = run_encode_json(ctx, &self.codec, &self.input, self.text)?;
            return print_json(&result);
        }

        let encoded = run_encode(ctx, &self.codec, &self.input, self.text)?;
        let config = OutputConfig {
            dest: self.output.clone(),
            force: true,
        };
        write_value(&encoded, &config)
    }
}

pub struct DecCommand {
    pub codec: String,
    pub input: InputSource,
    pub output: OutputDest,
    pub force: bool,
    pub json: bool,
}

impl CommandHandler for DecCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        if self.json {
            let result = run_decode_json(ctx, &self.codec, &self.input)?;
            return print_json(&result);
        }

        let decoded = run_decode(ctx, &self.codec, &self.input)?;
        let config = OutputConfig {
            dest: self.output.clone(),
            force: self.force,
        };
        write_value(&decoded, &config)
    }
}

pub struct ConvCommand {
    pub from: String,
    pub to: String,
    pub input: InputSource,
    pub output: OutputDest,
    pub force: bool,
}

impl CommandHandler for ConvCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let converted = run_conv(ctx, &self.from, &self.to, &self.input)?;
        let config = OutputConfig {
            dest: self.output.clone(),
            force: self.force,
        };
        write_value(&converted, &config)
    }
}

pub struct ListCommand {
    pub json: bool,
}

impl CommandHandler for ListCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let codecs = run_list(ctx);
        if self.json {
            return print_json(&codecs);
        }
        println!("{:<12} {:<10} {:<8} TITLE", "NAME", "ALIASES", "OUTPUT");
        println!("{}", "-".repeat(60));
        for c in codecs {
            let aliases = if c.aliases.is_empty() {
                "-".to_string()
            } else {
                c.aliases.join(",")
            };
            println!("{:<12} {:<10} {:<8} {}", c.name, aliases, format!("{:?}", c.output), c.title);
        }
        Ok(())
    }
}

pub struct InfoCommand {
    pub codec: String,
    pub json: bool,
}

impl CommandHandler for InfoCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let meta = run_info(ctx, &self.codec)?;
        if self.json {
            return print_json(&meta);
        }
        println!("Name:        {}", meta.name);
        println!("Aliases:     {}", meta.aliases.join(", "));
        println!("Title:       {}", meta.title);
        println!("Output:      {:?}", meta.output);
        println!("Description: {}", meta.description);
        Ok(())
    }
}

pub struct VerifyCommand {
    pub codec: String,
    pub input: InputSource,
    pub json: bool,
}

impl CommandHandler for VerifyCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let result = run_verify(ctx, &self.codec, &self.input)?;
        if self.json {
            return print_json(&result);
        }
        match result.failure {
            None => {
                println!("valid");
                Ok(())
            }
            Some(err) => {
                println!("invalid: {}", err);
                Err(err)
            }
        }
    }
}

pub struct RulesCommand {
    pub json: bool,
}

impl CommandHandler for RulesCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let rules = run_rules(ctx);
        if self.json {
            return print_json(&rules);
        }
        for rule in rules {
            println!("{}", rule.name);
            for pattern in rule.patterns {
                println!("    {}", pattern);
            }
        }
        Ok(())
    }
}

pub struct CheckCommand {
    pub rule: String,
    pub value: String,
    pub json: bool,
}

impl CommandHandler for CheckCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let result = run_check(ctx, &self.rule, &self.value)?;
        if self.json {
            return print_json(&result);
        }
        if result.valid {
            println!("valid");
            Ok(())
        } else {
            println!("invalid");
            Err(CodeckitError::InvalidData)
        }
    }
}

pub struct DigestCommand {
    pub algorithm: Algorithm,
    pub input: InputSource,
}

impl CommandHandler for DigestCommand {
    fn execute(&self, _ctx: &Context) -> Result<()> {
        let digest = run_digest(self.algorithm, &self.input)?;
        let config = OutputConfig {
            dest: OutputDest::Stdout,
            force: true,
        };
        write_output(digest.as_bytes(), &config)?;
        println!();
        Ok(())
    }
}
