use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use codeckit::digest::Algorithm;

#[derive(Parser)]
#[command(name = "codeckit")]
#[command(about = "Named codecs and validators: JSON, XML, binary, Base64, text and number obfuscation")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "TOML file with codec alphabets and salt")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Encode a value")]
    Enc {
        #[arg(long, default_value = "json")]
        codec: String,

        #[arg(long, short = 'i', default_value = "-")]
        r#in: String,

        #[arg(long, short = 'o', default_value = "-")]
        out: String,

        #[arg(long, help = "Treat input as plain text instead of a JSON document")]
        text: bool,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Decode encoded data")]
    Dec {
        #[arg(long, default_value = "json")]
        codec: String,

        #[arg(long, short = 'i', default_value = "-")]
        r#in: String,

        #[arg(long, short = 'o', default_value = "-")]
        out: String,

        #[arg(long)]
        force: bool,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Decode with one codec and encode with another")]
    Conv {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long, short = 'i', default_value = "-")]
        r#in: String,

        #[arg(long, short = 'o', default_value = "-")]
        out: String,

        #[arg(long)]
        force: bool,
    },

    #[command(about = "List registered codecs")]
    List {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Show codec details")]
    Info {
        codec: String,

        #[arg(long)]
        json: bool,
    },

    #[command(about = "Verify input decodes with a codec")]
    Verify {
        #[arg(long, default_value = "json")]
        codec: String,

        #[arg(long, short = 'i', default_value = "-")]
        r#in: String,

        #[arg(long)]
        json: bool,
    },

    #[command(about = "List validator rules")]
    Rules {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Check a value against a validator rule")]
    Check {
        #[arg(long)]
        rule: String,

        value: String,

        #[arg(long)]
        json: bool,
    },

    #[command(about = "Hex digest of input")]
    Digest {
        #[arg(long, default_value = "sha1")]
        algo: AlgoArg,

        #[arg(long, short = 'i', default_value = "-")]
        r#in: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AlgoArg {
    Sha1,
    Md5,
    Sha256,
}

impl From<AlgoArg> for Algorithm {
    fn from(arg: AlgoArg) -> Self {
        match arg {
            AlgoArg::Sha1 => Algorithm::Sha1,
            AlgoArg::Md5 => Algorithm::Md5,
            AlgoArg::Sha256 => Algorithm::Sha256,
        }
    }
}
