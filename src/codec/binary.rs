use super::util;
use super::Codec;
use crate::error::{CodeckitError, Result};
use crate::types::{CodecMeta, DataKind};
use crate::value::Value;

/// Self-describing binary object graph.
///
/// Every node carries its variant tag, so a blob only decodes into the
/// shapes `Value` knows about; anything else is rejected by bincode.
pub struct Binary;

impl Codec for Binary {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: "binary",
            aliases: &["gob"],
            title: "Binary object graph",
            description: "bincode-encoded tagged values, including maps, map sequences and timestamps"
                .to_string(),
            output: DataKind::Binary,
        }
    }

    fn encode(&self, value: &Value) -> Result<Value> {
        Ok(Value::Bytes(bincode::serialize(value)?))
    }

    fn decode(&self, data: &Value) -> Result<Value> {
        let bytes = util::require_bytes(data)?;
        check_depth(bytes)?;
        Ok(bincode::deserialize(bytes)?)
    }
}

// Variant indexes of `Value` as bincode writes them.
const TAG_NULL: u32 = 0;
const TAG_BOOL: u32 = 1;
const TAG_INT: u32 = 2;
const TAG_FLOAT: u32 = 3;
const TAG_TEXT: u32 = 4;
const TAG_BYTES: u32 = 5;
const TAG_TIME: u32 = 6;
const TAG_SEQ: u32 = 7;
const TAG_MAP: u32 = 8;

struct Frame {
    remaining: u64,
    keyed: bool,
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn take(&mut self, len: usize) -> Option<&[u8]> {
        let end = self.pos.checked_add(len).filter(|&end| end <= self.bytes.len())?;
        let chunk = &self.bytes[self.pos..end];
        self.pos = end;
        Some(chunk)
    }

    fn u32(&mut self) -> Option<u32> {
        self.take(4).and_then(|b| b.try_into().ok()).map(u32::from_le_bytes)
    }

    fn u64(&mut self) -> Option<u64> {
        self.take(8).and_then(|b| b.try_into().ok()).map(u64::from_le_bytes)
    }

    fn skip_prefixed(&mut self) -> Option<()> {
        let len = usize::try_from(self.u64()?).ok()?;
        self.take(len).map(|_| ())
    }
}

/// Walks the blob without recursion and rejects containers nested past
/// [`util::MAX_DEPTH`], so the recursive decode below stays bounded.
///
/// Anything the walk cannot follow (truncation, unknown tags) is left for
/// bincode to report.
fn check_depth(bytes: &[u8]) -> Result<()> {
    let mut cursor = Cursor { bytes, pos: 0 };
    let mut stack = vec![Frame {
        remaining: 1,
        keyed: false,
    }];

    while let Some(frame) = stack.last_mut() {
        if frame.remaining == 0 {
            stack.pop();
            continue;
        }
        frame.remaining -= 1;
        if frame.keyed && cursor.skip_prefixed().is_none() {
            return Ok(());
        }

        let Some(tag) = cursor.u32() else {
            return Ok(());
        };
        let skipped = match tag {
            TAG_BOOL => cursor.take(1).map(|_| ()),
            TAG_INT | TAG_FLOAT => cursor.take(8).map(|_| ()),
            TAG_TEXT | TAG_BYTES | TAG_TIME => cursor.skip_prefixed(),
            TAG_SEQ | TAG_MAP => {
                let Some(len) = cursor.u64() else {
                    return Ok(());
                };
                if stack.len() > util::MAX_DEPTH {
                    return Err(CodeckitError::Binary(Box::new(bincode::ErrorKind::Custom(
                        "nesting too deep".to_string(),
                    ))));
                }
                if len > 0 {
                    stack.push(Frame {
                        remaining: len,
                        keyed: tag == TAG_MAP,
                    });
                }
                Some(())
            }
            TAG_NULL => Some(()),
            _ => None,
        };
        if skipped.is_none() {
            return Ok(());
        }
    }
    Ok(())
}
