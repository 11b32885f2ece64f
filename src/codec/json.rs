use super::util;
use super::Codec;
use crate::error::Result;
use crate::types::{CodecMeta, DataKind};
use crate::value::Value;

pub struct Json;

impl Codec for Json {
    fn name(&self) -> &'static str {
        "json"
    }

    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: "json",
            aliases: &[],
            title: "JSON",
            description: "Compact UTF-8 JSON, object keys sorted".to_string(),
            output: DataKind::Binary,
        }
    }

    fn encode(&self, value: &Value) -> Result<Value> {
        Ok(Value::Bytes(serde_json::to_vec(&value.to_json())?))
    }

    fn decode(&self, data: &Value) -> Result<Value> {
        let bytes = util::require_bytes(data)?;
        let json: serde_json::Value = serde_json::from_slice(bytes)?;
        Ok(Value::from_json(json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodeckitError;

    #[test]
    fn test_json_encode_is_byte_exact() {
        let encoded = Json.encode(&Value::map([("x", Value::Int(1))])).unwrap();
        assert_eq!(encoded, Value::Bytes(br#"{"x":1}"#.to_vec()));
    }

    #[test]
    fn test_json_roundtrip_nested() {
        let value = Value::map([
            ("name", Value::from("codeckit")),
            ("tags", Value::from(vec!["a", "b"])),
            ("ratio", Value::Float(0.5)),
            ("ok", Value::Bool(true)),
            ("none", Value::Null),
            ("inner", Value::map([("n", Value::Int(-7))])),
        ]);
        let encoded = Json.encode(&value).unwrap();
        assert_eq!(Json.decode(&encoded).unwrap(), value);
    }

    #[test]
    fn test_json_decode_malformed() {
        let err = Json.decode(&Value::Bytes(b"{\"x\":".to_vec())).unwrap_err();
        assert!(matches!(err, CodeckitError::Json(_)));
    }

    #[test]
    fn test_json_decode_rejects_text_input() {
        let err = Json.decode(&Value::from(r#"{"x":1}"#)).unwrap_err();
        assert!(matches!(err, CodeckitError::InvalidData));
    }
}
