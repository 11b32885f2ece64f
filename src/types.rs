use serde::Serialize;
use std::path::PathBuf;

use crate::codec::Registry;
use crate::validator::Validators;

pub struct Context<'a> {
    pub registry: &'a Registry,
    pub validators: &'a Validators,
}

impl<'a> Context<'a> {
    pub fn new(registry: &'a Registry, validators: &'a Validators) -> Self {
        Self {
            registry,
            validators,
        }
    }
}

#[derive(Debug, Clone)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
    Literal(Vec<u8>),
}

impl InputSource {
    pub fn parse(s: &str) -> Self {
        match s {
            "-" => InputSource::Stdin,
            s if s.starts_with('@') => InputSource::File(PathBuf::from(&s[1..])),
            s => {
                if Self::looks_like_path(s) {
                    tracing::warn!("treating '{}' as literal data, use @{} to read from file", s, s);
                }
                InputSource::Literal(s.as_bytes().to_vec())
            }
        }
    }

    fn looks_like_path(s: &str) -> bool {
        if s.contains('/') || s.contains('\\') {
            return true;
        }
        let extensions = [".txt", ".bin", ".dat", ".json", ".xml", ".toml", ".log"];
        extensions.iter().any(|ext| s.ends_with(ext))
    }
}

#[derive(Debug, Clone)]
pub enum OutputDest {
    Stdout,
    File(PathBuf),
}

impl OutputDest {
    pub fn parse(s: &str) -> Self {
        match s {
            "-" => OutputDest::Stdout,
            s if s.starts_with('@') => OutputDest::File(PathBuf::from(&s[1..])),
            s => OutputDest::File(PathBuf::from(s)),
        }
    }
}

/// Representation a codec encodes to and decodes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataKind {
    Text,
    Binary,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodecMeta {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub title: &'static str,
    pub description: String,
    pub output: DataKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidatorMeta {
    pub name: String,
    pub patterns: Vec<String>,
}
