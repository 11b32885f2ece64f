mod cli;
mod commands;
mod io;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use codeckit::{error, types, Config, Context, Registry, Validators};
use commands::CommandHandler;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            e.exit_code().into()
        }
    }
}

fn run(cli: Cli) -> error::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let registry = Registry::from_config(&config)?;
    let validators = Validators::builtin()?;
    let ctx = Context::new(&registry, &validators);

    let handler: Box<dyn CommandHandler> = match cli.command {
        Command::Enc {
            codec,
            r#in,
            out,
            text,
            json,
        } => Box::new(commands::EncCommand {
            codec,
            input: types::InputSource::parse(&r#in),
            output: types::OutputDest::parse(&out),
            text,
            json,
        }),

        Command::Dec {
            codec,
            r#in,
            out,
            force,
            json,
        } => Box::new(commands::DecCommand {
            codec,
            input: types::InputSource::parse(&r#in),
            output: types::OutputDest::parse(&out),
            force,
            json,
        }),

        Command::Conv {
            from,
            to,
            r#in,
            out,
            force,
        } => Box::new(commands::ConvCommand {
            from,
            to,
            input: types::InputSource::parse(&r#in),
            output: types::OutputDest::parse(&out),
            force,
        }),

        Command::List { json } => Box::new(commands::ListCommand { json }),

        Command::Info { codec, json } => Box::new(commands::InfoCommand { codec, json }),

        Command::Verify { codec, r#in, json } => Box::new(commands::VerifyCommand {
            codec,
            input: types::InputSource::parse(&r#in),
            json,
        }),

        Command::Rules { json } => Box::new(commands::RulesCommand { json }),

        Command::Check { rule, value, json } => Box::new(commands::CheckCommand { rule, value, json }),

        Command::Digest { algo, r#in } => Box::new(commands::DigestCommand {
            algorithm: algo.into(),
            input: types::InputSource::parse(&r#in),
        }),
    };

    handler.execute(&ctx)
}
