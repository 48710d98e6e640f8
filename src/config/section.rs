//! Raw configuration sections and the serde adapter that decodes them.
//!
//! # Responsibilities
//! - Hold one named block of key → string pairs as read from a config file
//! - Populate typed records from those pairs by key name
//!
//! # Design Decisions
//! - Values stay strings until a record asks for a concrete type
//! - Empty values decode as the zero value of the requested type
//! - Unknown keys are ignored so one section can feed several records

use std::collections::BTreeMap;
use std::fmt;

use serde::de::value::MapDeserializer;
use serde::de::{self, DeserializeOwned, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;
use thiserror::Error;

/// A field could not be decoded from its raw string value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct DecodeError(String);

impl de::Error for DecodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self(msg.to_string())
    }
}

/// An ordered set of key → string pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    entries: BTreeMap<String, String>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, or the empty string when the key is absent.
    pub fn get(&self, key: &str) -> &str {
        self.entries.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode the section into `T`, matching keys against field names.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        let pairs = self
            .entries
            .iter()
            .map(|(key, value)| (key.as_str(), ValueDeserializer { key, value }));
        let deserializer: MapDeserializer<'_, _, DecodeError> = MapDeserializer::new(pairs);
        T::deserialize(deserializer)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Section {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Deserializes one raw value, parsing it into whatever type the field wants.
struct ValueDeserializer<'a> {
    key: &'a str,
    value: &'a str,
}

impl<'a> ValueDeserializer<'a> {
    fn invalid(&self, expected: &str) -> DecodeError {
        DecodeError(format!(
            "invalid value {:?} for key `{}`: expected {}",
            self.value, self.key, expected
        ))
    }

    fn parse<T: std::str::FromStr + Default>(&self, expected: &str) -> Result<T, DecodeError> {
        let trimmed = self.value.trim();
        if trimmed.is_empty() {
            return Ok(T::default());
        }
        trimmed.parse().map_err(|_| self.invalid(expected))
    }

    fn parse_bool(&self) -> Result<bool, DecodeError> {
        match self.value.trim().to_ascii_lowercase().as_str() {
            "" | "0" | "f" | "false" | "n" | "no" | "off" => Ok(false),
            "1" | "t" | "true" | "y" | "yes" | "on" => Ok(true),
            _ => Err(self.invalid("a boolean")),
        }
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident, $ty:ty, $expected:literal;)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
                visitor.$visit(self.parse::<$ty>($expected)?)
            }
        )*
    };
}

impl<'de, 'a> de::Deserializer<'de> for ValueDeserializer<'a> {
    type Error = DecodeError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_str(self.value)
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_bool(self.parse_bool()?)
    }

    deserialize_parsed! {
        deserialize_i8 => visit_i8, i8, "an integer";
        deserialize_i16 => visit_i16, i16, "an integer";
        deserialize_i32 => visit_i32, i32, "an integer";
        deserialize_i64 => visit_i64, i64, "an integer";
        deserialize_u8 => visit_u8, u8, "an unsigned integer";
        deserialize_u16 => visit_u16, u16, "an unsigned integer";
        deserialize_u32 => visit_u32, u32, "an unsigned integer";
        deserialize_u64 => visit_u64, u64, "an unsigned integer";
        deserialize_f32 => visit_f32, f32, "a number";
        deserialize_f64 => visit_f64, f64, "a number";
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        if self.value.trim().is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    forward_to_deserialize_any! {
        char str string bytes byte_buf unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

impl<'de, 'a> IntoDeserializer<'de, DecodeError> for ValueDeserializer<'a> {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}
