//! Hex digests of strings and files.
//!
//! File variants stream the content and drop the handle on every return
//! path, including read errors.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use md5::Md5;
use serde::Serialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::error::{CodeckitError, Result};

const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Sha1,
    Md5,
    Sha256,
}

impl Algorithm {
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "sha1" => Ok(Algorithm::Sha1),
            "md5" => Ok(Algorithm::Md5),
            "sha256" => Ok(Algorithm::Sha256),
            _ => Err(CodeckitError::config(format!("unknown digest algorithm: {}", name))),
        }
    }

    pub fn digest_bytes(self, data: &[u8]) -> String {
        match self {
            Algorithm::Sha1 => hex::encode(Sha1::digest(data)),
            Algorithm::Md5 => hex::encode(Md5::digest(data)),
            Algorithm::Sha256 => hex::encode(Sha256::digest(data)),
        }
    }

    pub fn digest_file(self, path: &Path) -> Result<String> {
        match self {
            Algorithm::Sha1 => stream_file::<Sha1>(path),
            Algorithm::Md5 => stream_file::<Md5>(path),
            Algorithm::Sha256 => stream_file::<Sha256>(path),
        }
    }
}

fn stream_file<D: Digest>(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = D::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

pub fn sha1_string(text: &str) -> String {
    Algorithm::Sha1.digest_bytes(text.as_bytes())
}

pub fn md5_string(text: &str) -> String {
    Algorithm::Md5.digest_bytes(text.as_bytes())
}

pub fn sha256_string(text: &str) -> String {
    Algorithm::Sha256.digest_bytes(text.as_bytes())
}

/// Stored password form: lowercase SHA-1 hex, which is what the
/// `password` validator accepts.
pub fn password(text: &str) -> String {
    sha1_string(text)
}

pub fn sha1_file(path: &Path) -> Result<String> {
    Algorithm::Sha1.digest_file(path)
}

pub fn md5_file(path: &Path) -> Result<String> {
    Algorithm::Md5.digest_file(path)
}

pub fn sha256_file(path: &Path) -> Result<String> {
    Algorithm::Sha256.digest_file(path)
}
