use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::Codec;
use crate::config::Config;
use crate::error::{CodeckitError, Result};
use crate::types::CodecMeta;
use crate::value::Value;

/// Collects codecs before they are frozen into a [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    codecs: Vec<Box<dyn Codec>>,
    name_map: HashMap<&'static str, usize>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a codec under its name and aliases.
    ///
    /// Without `overwrite`, any name or alias already taken is a
    /// [`CodeckitError::DuplicateName`]. With it, a codec of the same name
    /// is replaced and colliding aliases move to the new codec. An alias
    /// equal to another codec's primary name is refused either way.
    pub fn register(&mut self, codec: Box<dyn Codec>, overwrite: bool) -> Result<&mut Self> {
        let meta = codec.meta();
        let names: Vec<&'static str> = std::iter::once(meta.name)
            .chain(meta.aliases.iter().copied())
            .collect();

        if !overwrite {
            if let Some(taken) = names.iter().find(|n| self.name_map.contains_key(*n)) {
                return Err(CodeckitError::duplicate_name(*taken));
            }
        }
        // A primary name always stays with its own codec, even when overwriting.
        if let Some(taken) = meta.aliases.iter().find(|alias| {
            **alias != meta.name && self.codecs.iter().any(|c| c.name() == **alias)
        }) {
            return Err(CodeckitError::duplicate_name(*taken));
        }

        let existing = self.name_map.get(meta.name).copied();
        let idx = match existing {
            Some(idx) if self.codecs[idx].name() == meta.name => {
                self.name_map.retain(|_, i| *i != idx);
                self.codecs[idx] = codec;
                tracing::debug!(codec = meta.name, "replaced codec");
                idx
            }
            _ => {
                self.codecs.push(codec);
                self.codecs.len() - 1
            }
        };
        for name in names {
            self.name_map.insert(name, idx);
        }
        tracing::debug!(codec = meta.name, aliases = ?meta.aliases, "registered codec");
        Ok(self)
    }

    pub fn build(self) -> Registry {
        Registry {
            codecs: self.codecs,
            name_map: self.name_map,
        }
    }
}

/// Immutable name → codec table, built once and then shared.
pub struct Registry {
    codecs: Vec<Box<dyn Codec>>,
    name_map: HashMap<&'static str, usize>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Builds every builtin codec from the given configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let codec = &config.codec;
        let mut builder = RegistryBuilder::new();
        builder
            .register(Box::new(super::json::Json), false)?
            .register(Box::new(super::xml::Xml), false)?
            .register(Box::new(super::binary::Binary), false)?
            .register(Box::new(super::base64::Base64), false)?
            .register(Box::new(super::base64::Base64Url), false)?
            .register(Box::new(super::text::Text::new(&codec.text_alphabet)?), false)?
            .register(Box::new(super::text::Texts::new(&codec.text_alphabet)?), false)?
            .register(Box::new(super::digit::Digit::new(codec)?), false)?
            .register(Box::new(super::digit::Digits::new(codec)?), false)?;
        Ok(builder.build())
    }

    pub fn builtin() -> Result<Self> {
        Self::from_config(&Config::default())
    }

    pub fn get(&self, name: &str) -> Result<&dyn Codec> {
        let name_lower = name.to_lowercase();
        self.name_map
            .get(name_lower.as_str())
            .or_else(|| self.name_map.get(name))
            .map(|&idx| self.codecs[idx].as_ref())
            .ok_or_else(|| CodeckitError::unsupported_codec(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    pub fn list(&self) -> Vec<CodecMeta> {
        self.codecs.iter().map(|c| c.meta()).collect()
    }

    pub fn encode(&self, name: &str, value: &Value) -> Result<Value> {
        let codec = self.get(name)?;
        tracing::trace!(codec = codec.name(), kind = value.kind_name(), "encode");
        codec.encode(value)
    }

    pub fn decode(&self, name: &str, data: &Value) -> Result<Value> {
        let codec = self.get(name)?;
        tracing::trace!(codec = codec.name(), kind = data.kind_name(), "decode");
        codec.decode(data)
    }

    pub fn encode_from<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<Value> {
        self.encode(name, &Value::from_serialize(value)?)
    }

    /// Decodes `data` and populates a value of type `T` from the result.
    pub fn decode_into<T: DeserializeOwned>(&self, name: &str, data: &Value) -> Result<T> {
        self.decode(name, data)?.deserialize_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataKind;
    use serde::Deserialize;

    const ALL: [&str; 9] = [
        "json", "xml", "binary", "base64", "base64url", "text", "texts", "digit", "digits",
    ];

    struct Stub {
        name: &'static str,
        aliases: &'static [&'static str],
    }

    impl Codec for Stub {
        fn meta(&self) -> CodecMeta {
            CodecMeta {
                name: self.name,
                aliases: self.aliases,
                title: "Stub",
                description: String::new(),
                output: DataKind::Text,
            }
        }

        fn encode(&self, value: &Value) -> Result<Value> {
            Ok(Value::Text(value.to_string().to_uppercase()))
        }

        fn decode(&self, data: &Value) -> Result<Value> {
            Ok(Value::Text(data.to_string().to_lowercase()))
        }
    }

    fn stub(name: &'static str, aliases: &'static [&'static str]) -> Box<dyn Codec> {
        Box::new(Stub { name, aliases })
    }

    #[test]
    fn test_all_builtins_registered() {
        let registry = Registry::builtin().unwrap();
        let names: Vec<&str> = registry.list().iter().map(|m| m.name).collect();
        assert_eq!(names, ALL.to_vec());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(registry.get("JSON").unwrap().name(), "json");
        assert!(matches!(registry.get("yaml"), Err(CodeckitError::UnsupportedCodec { .. })));
    }

    #[test]
    fn test_aliases_resolve_to_primary() {
        let registry = Registry::builtin().unwrap();
        for (alias, primary) in [
            ("gob", "binary"),
            ("string", "text"),
            ("strings", "texts"),
            ("number", "digit"),
            ("numbers", "digits"),
        ] {
            assert_eq!(registry.get(alias).unwrap().name(), primary);
        }
    }

    #[test]
    fn test_alias_equivalence() {
        let registry = Registry::builtin().unwrap();
        let token = registry.encode("digit", &Value::Int(12345)).unwrap();
        assert_eq!(registry.decode("number", &token).unwrap(), Value::Int(12345));

        let encoded = registry.encode("strings", &Value::from(vec!["x", "y"])).unwrap();
        assert_eq!(encoded, registry.encode("texts", &Value::from(vec!["x", "y"])).unwrap());
        assert_eq!(registry.decode("texts", &encoded).unwrap(), Value::from(vec!["x", "y"]));
    }

    #[test]
    fn test_duplicate_alias_rejected_without_overwrite() {
        let mut builder = RegistryBuilder::new();
        builder.register(Box::new(crate::codec::json::Json), false).unwrap();
        let err = builder.register(stub("upper", &["json"]), false).err().unwrap();
        assert!(matches!(err, CodeckitError::DuplicateName { ref name } if name == "json"));
    }

    #[test]
    fn test_overwrite_cannot_take_primary_name() {
        let mut builder = RegistryBuilder::new();
        builder.register(Box::new(crate::codec::json::Json), false).unwrap();
        let err = builder.register(stub("hijack", &["json"]), true).err().unwrap();
        assert!(matches!(err, CodeckitError::DuplicateName { ref name } if name == "json"));

        let registry = builder.build();
        assert_eq!(registry.get("json").unwrap().name(), "json");
        assert!(!registry.contains("hijack"));
        let names: Vec<&str> = registry.list().iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["json"]);
    }

    #[test]
    fn test_overwrite_moves_alias() {
        let mut builder = RegistryBuilder::new();
        builder.register(stub("lower", &["case"]), false).unwrap();
        builder.register(stub("upper", &["case"]), true).unwrap();
        let registry = builder.build();
        assert_eq!(registry.get("case").unwrap().name(), "upper");
        assert_eq!(registry.get("lower").unwrap().name(), "lower");
    }

    #[test]
    fn test_overwrite_replaces_same_name() {
        let mut builder = RegistryBuilder::new();
        builder.register(stub("upper", &["caps"]), false).unwrap();
        builder.register(stub("upper", &["caps"]), true).unwrap();
        let registry = builder.build();
        assert_eq!(registry.list().len(), 1);
        assert_eq!(registry.get("caps").unwrap().name(), "upper");
    }

    #[test]
    fn test_json_decode_into_target() {
        #[derive(Debug, Deserialize)]
        struct Target {
            x: i64,
        }

        let registry = Registry::builtin().unwrap();
        let encoded = registry.encode("json", &Value::map([("x", Value::Int(1))])).unwrap();
        assert_eq!(encoded, Value::Bytes(br#"{"x":1}"#.to_vec()));
        let target: Target = registry.decode_into("json", &encoded).unwrap();
        assert_eq!(target.x, 1);
    }

    #[test]
    fn test_roundtrip_every_codec() {
        let registry = Registry::builtin().unwrap();
        let samples: [(&str, Value); 9] = [
            ("json", Value::map([("a", Value::from(vec![1i64, 2]))])),
            ("xml", Value::map([("a", Value::from("b"))])),
            ("binary", Value::Seq(vec![Value::map([("k", Value::Bool(true))])])),
            ("base64", Value::from("hello")),
            ("base64url", Value::from("hello")),
            ("text", Value::from("plain text")),
            ("texts", Value::from(vec!["one", "two"])),
            ("digit", Value::Int(99)),
            ("digits", Value::from(vec![3i64, 1, 2])),
        ];
        for (name, value) in samples {
            let encoded = registry.encode(name, &value).unwrap();
            assert_eq!(registry.decode(name, &encoded).unwrap(), value, "codec {}", name);
        }
    }

    #[test]
    fn test_byte_codecs_reject_non_bytes() {
        let registry = Registry::builtin().unwrap();
        for name in ["json", "xml", "binary"] {
            let err = registry.decode(name, &Value::Int(1)).unwrap_err();
            assert!(matches!(err, CodeckitError::InvalidData), "codec {}", name);
        }
    }

    #[test]
    fn test_bad_alphabet_fails_build() {
        let mut config = Config::default();
        config.codec.text_alphabet = "short".to_string();
        assert!(matches!(Registry::from_config(&config), Err(CodeckitError::Config { .. })));
    }
}
