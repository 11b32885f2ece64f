mod base64;
mod binary;
mod digit;
mod json;
pub mod registry;
mod text;
pub(crate) mod util;
mod xml;

pub use registry::{Registry, RegistryBuilder};

use crate::error::Result;
use crate::types::CodecMeta;
use crate::value::Value;

/// A named pair of inverse transforms.
///
/// Implementations are stateless after construction and may be shared
/// freely across threads.
pub trait Codec: Send + Sync {
    fn meta(&self) -> CodecMeta;
    fn encode(&self, value: &Value) -> Result<Value>;
    fn decode(&self, data: &Value) -> Result<Value>;

    fn name(&self) -> &'static str {
        self.meta().name
    }
}
