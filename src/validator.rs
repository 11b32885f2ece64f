use std::collections::BTreeMap;

use regex::Regex;

use crate::error::{CodeckitError, Result};
use crate::types::ValidatorMeta;

const BUILTIN: &[(&str, &[&str])] = &[
    ("password", &[r"^[0-9A-Fa-f]{40}$"]),
    ("number", &[r"^[0-9]+$"]),
    ("float", &[r"^[0-9]+(\.[0-9]+)?$"]),
    (
        "date",
        &[
            r"^(\d{4})(\d{2})(\d{2})$",
            r"^(\d{4})-(\d{2})-(\d{2})$",
            r"^(\d{10,15})$",
        ],
    ),
    (
        "datetime",
        &[
            r"^(\d{4})-(\d{2})-(\d{2})$",
            r"^(\d{4})-(\d{2})-(\d{2}) (\d{2}):(\d{2}):(\d{2})$",
            r"^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2})Z$",
            r"^(\d{4})-(\d{2})-(\d{2}) (\d{2}):(\d{2}):(\d{2})\.(\d{3})$",
            r"^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2})\.(\d{3})Z$",
            // 2017-03-18T17:20:26.689501+08:00
            r"^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2})\.(\d{6})\+(\d{2}):(\d{2})$",
            r"^(\d{10,15})$",
        ],
    ),
    ("mobile", &[r"^1[0-9]{10}$"]),
    ("idcard", &[r"(^\d{15}$)|(^\d{18}$)|(^\d{17}(\d|X|x)$)"]),
    (
        "email",
        &[r"^[0-9A-Za-z][_.0-9A-Za-z-]{0,31}@([0-9A-Za-z][0-9A-Za-z-]{0,30}[0-9A-Za-z]\.){1,4}[A-Za-z]{2,4}$"],
    ),
];

#[derive(Default)]
pub struct ValidatorsBuilder {
    entries: BTreeMap<String, Vec<Regex>>,
}

impl ValidatorsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: AsRef<str>>(
        &mut self,
        name: &str,
        patterns: &[S],
        overwrite: bool,
    ) -> Result<&mut Self> {
        if !overwrite && self.entries.contains_key(name) {
            return Err(CodeckitError::duplicate_name(name));
        }
        let compiled = patterns
            .iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        tracing::debug!(validator = name, patterns = compiled.len(), "registered validator");
        self.entries.insert(name.to_string(), compiled);
        Ok(self)
    }

    pub fn build(self) -> Validators {
        Validators {
            entries: self.entries,
        }
    }
}

/// Fixed name → pattern-set table. A value is valid for a name when any
/// pattern in its set matches.
pub struct Validators {
    entries: BTreeMap<String, Vec<Regex>>,
}

impl Validators {
    pub fn builder() -> ValidatorsBuilder {
        ValidatorsBuilder::new()
    }

    pub fn builtin() -> Result<Self> {
        let mut builder = ValidatorsBuilder::new();
        for &(name, patterns) in BUILTIN {
            builder.register(name, patterns, false)?;
        }
        Ok(builder.build())
    }

    fn patterns_for(&self, name: &str) -> Result<&[Regex]> {
        self.entries
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| CodeckitError::unknown_validator(name))
    }

    pub fn is_match(&self, name: &str, value: &str) -> Result<bool> {
        let matched = self.patterns_for(name)?.iter().any(|re| re.is_match(value));
        tracing::trace!(validator = name, matched, "validate");
        Ok(matched)
    }

    pub fn patterns(&self, name: &str) -> Result<Vec<String>> {
        Ok(self
            .patterns_for(name)?
            .iter()
            .map(|re| re.as_str().to_string())
            .collect())
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn list(&self) -> Vec<ValidatorMeta> {
        self.entries
            .iter()
            .map(|(name, patterns)| ValidatorMeta {
                name: name.clone(),
                patterns: patterns.iter().map(|re| re.as_str().to_string()).collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validators() -> Validators {
        Validators::builtin().unwrap()
    }

    #[test]
    fn test_builtin_names() {
        assert_eq!(
            validators().names(),
            vec!["date", "datetime", "email", "float", "idcard", "mobile", "number", "password"]
        );
    }

    #[test]
    fn test_email() {
        let v = validators();
        assert!(v.is_match("email", "user@example.com").unwrap());
        assert!(!v.is_match("email", "not-an-email").unwrap());
    }

    #[test]
    fn test_mobile_and_idcard() {
        let v = validators();
        assert!(v.is_match("mobile", "13800138000").unwrap());
        assert!(!v.is_match("mobile", "23800138000").unwrap());
        assert!(v.is_match("idcard", "11010519491231002X").unwrap());
        assert!(v.is_match("idcard", "110105491231002").unwrap());
        assert!(!v.is_match("idcard", "1101051949123100").unwrap());
    }

    #[test]
    fn test_any_pattern_matches() {
        let v = validators();
        assert!(v.is_match("date", "20240131").unwrap());
        assert!(v.is_match("date", "2024-01-31").unwrap());
        assert!(v.is_match("date", "1706659200").unwrap());
        assert!(!v.is_match("date", "2024/01/31").unwrap());

        assert!(v.is_match("datetime", "2017-03-18T17:20:26.689501+08:00").unwrap());
        assert!(v.is_match("datetime", "2017-03-18 17:20:26.123").unwrap());
        assert!(!v.is_match("datetime", "2017-03-18 17:20").unwrap());
    }

    #[test]
    fn test_match_iff_some_pattern_matches() {
        let v = validators();
        for input in ["2024-01-31", "20240131", "x", "1706659200000", "2024-01-31 10:00:00"] {
            let expected = v
                .patterns("date")
                .unwrap()
                .iter()
                .any(|p| Regex::new(p).unwrap().is_match(input));
            assert_eq!(v.is_match("date", input).unwrap(), expected, "input {}", input);
        }
    }

    #[test]
    fn test_number_and_float() {
        let v = validators();
        assert!(v.is_match("number", "0042").unwrap());
        assert!(!v.is_match("number", "4.2").unwrap());
        assert!(v.is_match("float", "4.2").unwrap());
        assert!(v.is_match("float", "42").unwrap());
    }

    #[test]
    fn test_unknown_validator() {
        assert!(matches!(
            validators().is_match("zip", "12345"),
            Err(CodeckitError::UnknownValidator { .. })
        ));
    }

    #[test]
    fn test_register_duplicate_and_bad_pattern() {
        let mut builder = Validators::builder();
        builder.register("yes", &["^y$"], false).unwrap();
        assert!(matches!(
            builder.register("yes", &["^yes$"], false),
            Err(CodeckitError::DuplicateName { .. })
        ));
        assert!(matches!(
            builder.register("broken", &["("], false),
            Err(CodeckitError::Pattern(_))
        ));
        builder.register("yes", &["^y$", "^yes$"], true).unwrap();
        assert!(builder.build().is_match("yes", "yes").unwrap());
    }
}
