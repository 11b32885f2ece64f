use std::process::ExitCode as StdExitCode;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidInput = 10,
    FormatError = 11,
    IoError = 12,
    UnknownName = 13,
    ConfigError = 14,
}

impl From<ExitCode> for StdExitCode {
    fn from(code: ExitCode) -> Self {
        StdExitCode::from(code as u8)
    }
}

/// Coarse classification of [`CodeckitError`].
///
/// `Format` means an underlying encoder or decoder rejected the data;
/// `InvalidInput` means the value never reached one because it had the
/// wrong shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    InvalidInput,
    Lookup,
    Config,
    Io,
}

#[derive(Debug, Error)]
pub enum CodeckitError {
    #[error("invalid data")]
    InvalidData,

    #[error("invalid number: {value}")]
    InvalidNumber { value: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML: {message}")]
    MalformedXml { message: String },

    #[error(transparent)]
    Binary(#[from] bincode::Error),

    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    Alphabet(#[from] data_encoding::DecodeError),

    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid token: {message}")]
    Token { message: String },

    #[error("invalid result")]
    EmptyResult,

    #[error("unsupported codec: {name}")]
    UnsupportedCodec { name: String },

    #[error("unknown validator: {name}")]
    UnknownValidator { name: String },

    #[error("name already registered: {name}")]
    DuplicateName { name: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodeckitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodeckitError::InvalidData | CodeckitError::InvalidNumber { .. } => ErrorKind::InvalidInput,
            CodeckitError::Json(_)
            | CodeckitError::Xml(_)
            | CodeckitError::MalformedXml { .. }
            | CodeckitError::Binary(_)
            | CodeckitError::Base64(_)
            | CodeckitError::Alphabet(_)
            | CodeckitError::Utf8(_)
            | CodeckitError::Token { .. }
            | CodeckitError::EmptyResult => ErrorKind::Format,
            CodeckitError::UnsupportedCodec { .. }
            | CodeckitError::UnknownValidator { .. }
            | CodeckitError::DuplicateName { .. } => ErrorKind::Lookup,
            CodeckitError::Config { .. } | CodeckitError::Pattern(_) => ErrorKind::Config,
            CodeckitError::Io(_) => ErrorKind::Io,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.kind() {
            ErrorKind::InvalidInput => ExitCode::InvalidInput,
            ErrorKind::Format => ExitCode::FormatError,
            ErrorKind::Lookup => ExitCode::UnknownName,
            ErrorKind::Config => ExitCode::ConfigError,
            ErrorKind::Io => ExitCode::IoError,
        }
    }

    // Helper constructors for common error patterns
    pub fn invalid_number(value: impl Into<String>) -> Self {
        Self::InvalidNumber { value: value.into() }
    }

    pub fn malformed_xml(message: impl Into<String>) -> Self {
        Self::MalformedXml {
            message: message.into(),
        }
    }

    pub fn token(message: impl Into<String>) -> Self {
        Self::Token {
            message: message.into(),
        }
    }

    pub fn unsupported_codec(name: impl Into<String>) -> Self {
        Self::UnsupportedCodec { name: name.into() }
    }

    pub fn unknown_validator(name: impl Into<String>) -> Self {
        Self::UnknownValidator { name: name.into() }
    }

    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodeckitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_data_message_is_generic() {
        assert_eq!(CodeckitError::InvalidData.to_string(), "invalid data");
        assert_eq!(CodeckitError::InvalidData.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_library_errors_are_format_kind() {
        let err: CodeckitError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.exit_code(), ExitCode::FormatError);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CodeckitError::invalid_number("x").exit_code(), ExitCode::InvalidInput);
        assert_eq!(CodeckitError::unsupported_codec("nope").exit_code(), ExitCode::UnknownName);
        assert_eq!(CodeckitError::config("bad").exit_code(), ExitCode::ConfigError);
    }
}
