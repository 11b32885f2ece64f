pub mod codec;
pub mod config;
pub mod digest;
pub mod error;
pub mod types;
pub mod validator;
pub mod value;

pub use codec::{Codec, Registry, RegistryBuilder};
pub use config::{CodecConfig, Config};
pub use error::{CodeckitError, ErrorKind, Result};
pub use types::{CodecMeta, Context, DataKind, InputSource, OutputDest, ValidatorMeta};
pub use validator::{Validators, ValidatorsBuilder};
pub use value::{any_to_string, Value};
