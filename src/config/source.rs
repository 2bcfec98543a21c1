use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Keys the registration page reads from configuration.
pub mod keys {
    pub const BASE_URL: &str = "baseUrl";
    pub const PASSWORD: &str = "password";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const COMPANY: &str = "company";
    pub const ADDRESS: &str = "address";
    pub const STATE: &str = "state";
    pub const CITY: &str = "city";
    pub const ZIP: &str = "zip";
    pub const MOBILE: &str = "mobile";
    pub const BIRTH_DAY: &str = "birthDay";
    pub const BIRTH_MONTH: &str = "birthMonth";
    pub const BIRTH_YEAR: &str = "birthYear";
    pub const COUNTRY: &str = "country";

    pub const ALL: [&str; 14] = [
        BASE_URL,
        PASSWORD,
        FIRST_NAME,
        LAST_NAME,
        COMPANY,
        ADDRESS,
        STATE,
        CITY,
        ZIP,
        MOBILE,
        BIRTH_DAY,
        BIRTH_MONTH,
        BIRTH_YEAR,
        COUNTRY,
    ];
}

/// Key to string lookup. A missing key is an error, never a default.
pub trait ConfigSource {
    fn value(&self, key: &str) -> Result<String, ConfigError>;
}

/// Test input data: user profile fields and the base URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TestData {
    values: BTreeMap<String, String>,
}

/// The `data` section of a config file before its values are checked.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct RawData(BTreeMap<String, RawValue>);

/// One data value as written in the file. Only strings are used; other
/// scalars keep just their kind for the error message.
#[derive(Debug)]
pub enum RawValue {
    Text(String),
    Other(&'static str),
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawValueVisitor)
    }
}

struct RawValueVisitor;

impl<'de> Visitor<'de> for RawValueVisitor {
    type Value = RawValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawValue, E> {
        Ok(RawValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RawValue, E> {
        Ok(RawValue::Text(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<RawValue, E> {
        Ok(RawValue::Other("boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<RawValue, E> {
        Ok(RawValue::Other("number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<RawValue, E> {
        Ok(RawValue::Other("number"))
    }

    fn visit_i128<E: de::Error>(self, _: i128) -> Result<RawValue, E> {
        Ok(RawValue::Other("number"))
    }

    fn visit_u128<E: de::Error>(self, _: u128) -> Result<RawValue, E> {
        Ok(RawValue::Other("number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<RawValue, E> {
        Ok(RawValue::Other("number"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawValue, E> {
        Ok(RawValue::Other("null"))
    }

    fn visit_none<E: de::Error>(self) -> Result<RawValue, E> {
        Ok(RawValue::Other("null"))
    }
}

impl TryFrom<RawData> for TestData {
    type Error = ConfigError;

    /// Every value must be a YAML string: `birthYear: "1990"` is accepted,
    /// `birthYear: 1990` is `NotText`.
    fn try_from(raw: RawData) -> Result<Self, ConfigError> {
        raw.0
            .into_iter()
            .map(|(key, value)| match value {
                RawValue::Text(text) => Ok((key, text)),
                RawValue::Other(kind) => Err(ConfigError::NotText { key, kind }),
            })
            .collect()
    }
}

impl TestData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Recognized keys that have no value.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        keys::ALL
            .iter()
            .copied()
            .filter(|k| !self.values.contains_key(*k))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TestData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        TestData {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl ConfigSource for TestData {
    fn value(&self, key: &str) -> Result<String, ConfigError> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }
}
