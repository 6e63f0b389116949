//! Request properties - the typed key/value bag that parameterizes generation
//!
//! A `Properties` value is built once per request from the inbound property
//! text and never mutated afterwards. Generators read it through the typed
//! accessors below; required keys fail fast instead of defaulting.

pub mod errors;
pub mod parser;

pub use errors::*;

use std::collections::BTreeMap;

/// Key holding the project name
pub const PROJECT_NAME: &str = "projectName";

/// Key holding the application type used to pick the variant template directory
pub const APPLICATION_TYPE: &str = "applicationType";

/// Key holding the base Java package for generated sources
pub const BASE_PACKAGE: &str = "basePackage";

/// Immutable, ordered property map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    /// Create an empty property set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse flat property-file text. Later duplicates win.
    pub fn parse(text: &str) -> Result<Self, PropertyError> {
        Ok(parser::parse_pairs(text)?.into_iter().collect())
    }

    /// Raw value for a key, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Required string value, returned as stored; absent or blank values are an error
    pub fn get_string(&self, key: &str) -> Result<&str, PropertyError> {
        self.get_non_blank(key)
            .ok_or_else(|| PropertyError::missing(key))
    }

    /// Optional string value with a fallback for absent or blank values
    pub fn get_string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_non_blank(key).unwrap_or(default)
    }

    /// Required boolean value
    pub fn get_bool(&self, key: &str) -> Result<bool, PropertyError> {
        let value = self.get_string(key)?;
        parse_bool(value).ok_or_else(|| coercion_error(key, value, "boolean"))
    }

    /// Optional boolean value; a present but malformed value is still an error
    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool, PropertyError> {
        match self.get_non_blank(key) {
            Some(_) => self.get_bool(key),
            None => Ok(default),
        }
    }

    /// Required integer value
    pub fn get_int(&self, key: &str) -> Result<i64, PropertyError> {
        let value = self.get_string(key)?;
        value
            .trim()
            .parse::<i64>()
            .map_err(|_| coercion_error(key, value, "integer"))
    }

    /// Optional integer value; a present but malformed value is still an error
    pub fn get_int_or(&self, key: &str, default: i64) -> Result<i64, PropertyError> {
        match self.get_non_blank(key) {
            Some(_) => self.get_int(key),
            None => Ok(default),
        }
    }

    /// Iterate over all entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn get_non_blank(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn coercion_error(key: &str, value: &str, expected: &'static str) -> PropertyError {
    PropertyError::TypeCoercion {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}
