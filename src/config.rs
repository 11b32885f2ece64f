use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CodeckitError, Result};

/// Environment variable naming a config file when none is passed explicitly.
pub const CONFIG_ENV: &str = "CODECKIT_CONFIG";

pub const DEFAULT_TEXT_ALPHABET: &str =
    "01234AaBbCcDdEeFfGgHhIiJjKkLlMmNnOoPpQqRrSsTtUuVvWwXxYyZz56789-_";
pub const DEFAULT_DIGIT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";
pub const DEFAULT_SALT: &str = "codeckit";
pub const DEFAULT_MIN_LENGTH: usize = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub codec: CodecConfig,
}

/// Alphabets and salt consumed by the `text`/`texts` and `digit`/`digits`
/// codecs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// 64 distinct symbols for the Base64-style text encoding.
    pub text_alphabet: String,
    pub digit_alphabet: String,
    pub salt: String,
    /// Minimum length of an obfuscated numeric token.
    pub min_length: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            text_alphabet: DEFAULT_TEXT_ALPHABET.to_string(),
            digit_alphabet: DEFAULT_DIGIT_ALPHABET.to_string(),
            salt: DEFAULT_SALT.to_string(),
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| CodeckitError::config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        let config = Self::from_toml(&source)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Resolves the config file from an explicit path, then
    /// [`CONFIG_ENV`], then falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(value) if !value.is_empty() => Self::from_file(&PathBuf::from(value)),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_text_alphabet_has_64_distinct_symbols() {
        let mut chars: Vec<char> = DEFAULT_TEXT_ALPHABET.chars().collect();
        assert_eq!(chars.len(), 64);
        chars.sort_unstable();
        chars.dedup();
        assert_eq!(chars.len(), 64);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml("[codec]\nsalt = \"pepper\"\n").unwrap();
        assert_eq!(config.codec.salt, "pepper");
        assert_eq!(config.codec.min_length, DEFAULT_MIN_LENGTH);
        assert_eq!(config.codec.text_alphabet, DEFAULT_TEXT_ALPHABET);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("[codec\nsalt = 1").unwrap_err();
        assert!(matches!(err, CodeckitError::Config { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::from_file(Path::new("/nonexistent/codeckit.toml")).unwrap_err();
        assert!(matches!(err, CodeckitError::Io(_)));
    }
}
