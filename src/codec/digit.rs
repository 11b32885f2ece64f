use harsh::Harsh;

use super::util;
use super::Codec;
use crate::config::CodecConfig;
use crate::error::{CodeckitError, Result};
use crate::types::{CodecMeta, DataKind};
use crate::value::Value;

/// Builds the salted Hashids coder shared by `digit` and `digits`.
pub fn make_coder(config: &CodecConfig) -> Result<Harsh> {
    Harsh::builder()
        .salt(config.salt.as_str())
        .length(config.min_length)
        .alphabet(config.digit_alphabet.as_str())
        .build()
        .map_err(|e| CodeckitError::config(format!("digit alphabet: {}", e)))
}

fn to_unsigned(n: i64) -> Result<u64> {
    u64::try_from(n).map_err(|_| CodeckitError::invalid_number(n.to_string()))
}

fn to_signed(n: u64) -> Result<i64> {
    i64::try_from(n).map_err(|_| CodeckitError::EmptyResult)
}

fn encode_numbers(coder: &Harsh, numbers: &[i64]) -> Result<Value> {
    if numbers.is_empty() {
        return Err(CodeckitError::invalid_number("[]"));
    }
    let unsigned = numbers
        .iter()
        .map(|&n| to_unsigned(n))
        .collect::<Result<Vec<u64>>>()?;
    Ok(Value::Text(coder.encode(&unsigned)))
}

fn decode_numbers(coder: &Harsh, data: &Value) -> Result<Vec<i64>> {
    let token = util::require_text(data)?;
    let numbers = coder
        .decode(token.as_ref())
        .map_err(|e| CodeckitError::token(e.to_string()))?;
    numbers.into_iter().map(to_signed).collect()
}

fn single_number(value: &Value) -> Result<i64> {
    match value {
        Value::Int(n) => Ok(*n),
        Value::Text(s) => util::parse_int(s),
        other => Err(CodeckitError::invalid_number(other.to_string())),
    }
}

pub struct Digit {
    coder: Harsh,
}

impl Digit {
    pub fn new(config: &CodecConfig) -> Result<Self> {
        Ok(Self {
            coder: make_coder(config)?,
        })
    }
}

impl Codec for Digit {
    fn name(&self) -> &'static str {
        "digit"
    }

    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: "digit",
            aliases: &["number"],
            title: "Number obfuscation",
            description: "Salted Hashids token for a single non-negative integer".to_string(),
            output: DataKind::Text,
        }
    }

    fn encode(&self, value: &Value) -> Result<Value> {
        encode_numbers(&self.coder, &[single_number(value)?])
    }

    fn decode(&self, data: &Value) -> Result<Value> {
        let numbers = decode_numbers(&self.coder, data)?;
        numbers
            .first()
            .copied()
            .map(Value::Int)
            .ok_or(CodeckitError::EmptyResult)
    }
}

pub struct Digits {
    coder: Harsh,
}

impl Digits {
    pub fn new(config: &CodecConfig) -> Result<Self> {
        Ok(Self {
            coder: make_coder(config)?,
        })
    }
}

impl Codec for Digits {
    fn name(&self) -> &'static str {
        "digits"
    }

    fn meta(&self) -> CodecMeta {
        CodecMeta {
            name: "digits",
            aliases: &["numbers"],
            title: "Number list obfuscation",
            description: "Salted Hashids token for a sequence of non-negative integers".to_string(),
            output: DataKind::Text,
        }
    }

    fn encode(&self, value: &Value) -> Result<Value> {
        let numbers = match value {
            Value::Seq(items) => items
                .iter()
                .map(|item| {
                    item.as_i64()
                        .ok_or_else(|| CodeckitError::invalid_number(item.to_string()))
                })
                .collect::<Result<Vec<i64>>>()?,
            other => vec![single_number(other)?],
        };
        encode_numbers(&self.coder, &numbers)
    }

    fn decode(&self, data: &Value) -> Result<Value> {
        let numbers = decode_numbers(&self.coder, data)?;
        Ok(Value::from(numbers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CodecConfig {
        CodecConfig::default()
    }

    #[test]
    fn test_digit_scenario() {
        let codec = Digit::new(&config()).unwrap();
        let token = codec.encode(&Value::Int(12345)).unwrap();
        let text = token.as_str().unwrap();
        assert!(text.len() >= config().min_length);
        assert_eq!(codec.decode(&token).unwrap(), Value::Int(12345));
    }

    #[test]
    fn test_digit_accepts_numeric_string() {
        let codec = Digit::new(&config()).unwrap();
        assert_eq!(
            codec.encode(&Value::from("12345")).unwrap(),
            codec.encode(&Value::Int(12345)).unwrap()
        );
    }

    #[test]
    fn test_digit_rejects_non_numeric() {
        let codec = Digit::new(&config()).unwrap();
        for bad in [Value::from("12a"), Value::Bool(true), Value::Float(1.5), Value::Int(-1)] {
            assert!(
                matches!(codec.encode(&bad), Err(CodeckitError::InvalidNumber { .. })),
                "expected rejection of {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_digit_malformed_token() {
        let codec = Digit::new(&config()).unwrap();
        let err = codec.decode(&Value::from("!!!!!!!")).unwrap_err();
        assert!(matches!(err, CodeckitError::Token { .. }));
    }

    #[test]
    fn test_digit_salt_changes_token() {
        let other = CodecConfig {
            salt: "another salt".to_string(),
            ..config()
        };
        let a = Digit::new(&config()).unwrap().encode(&Value::Int(7)).unwrap();
        let b = Digit::new(&other).unwrap().encode(&Value::Int(7)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_digits_scenario() {
        let codec = Digits::new(&config()).unwrap();
        let token = codec.encode(&Value::from(vec![1i64, 2, 3])).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), Value::from(vec![1i64, 2, 3]));
    }

    #[test]
    fn test_digits_preserves_order_and_duplicates() {
        let codec = Digits::new(&config()).unwrap();
        let numbers = vec![9i64, 0, 9, 400_000, 1];
        let token = codec.encode(&Value::from(numbers.clone())).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), Value::from(numbers));
    }

    #[test]
    fn test_digits_single_integer_and_string() {
        let codec = Digits::new(&config()).unwrap();
        let token = codec.encode(&Value::from("77")).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), Value::from(vec![77i64]));
        assert_eq!(codec.encode(&Value::Int(77)).unwrap(), token);
    }

    #[test]
    fn test_digits_rejects_empty_and_mixed() {
        let codec = Digits::new(&config()).unwrap();
        assert!(matches!(codec.encode(&Value::Seq(vec![])), Err(CodeckitError::InvalidNumber { .. })));
        let mixed = Value::Seq(vec![Value::Int(1), Value::from("x")]);
        assert!(matches!(codec.encode(&mixed), Err(CodeckitError::InvalidNumber { .. })));
    }

    #[test]
    fn test_digit_and_digits_share_tokens() {
        let digit = Digit::new(&config()).unwrap();
        let digits = Digits::new(&config()).unwrap();
        let token = digits.encode(&Value::Int(5)).unwrap();
        assert_eq!(digit.decode(&token).unwrap(), Value::Int(5));
    }
}
