//! JSON encoding of requests and decoding of responses.
//!
//! Requests omit every field left at its zero value. Responses are decoded
//! leniently: missing or `null` members fall back to their defaults, and
//! counters accept either JSON numbers or numeric strings. Only malformed
//! JSON (or a sparse-vector key that is not an `i32`) is a decode error.

use std::collections::HashMap;

use serde::de::{DeserializeOwned, Error as _, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Serializes a request body.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(Error::Encode)
}

/// Deserializes a response body.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(Error::Decode)
}

/// Output of calls whose envelope carries no payload (create, delete).
///
/// Whatever the server places in `output` is accepted and discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOutput;

impl<'de> Deserialize<'de> for NoOutput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(NoOutput)
    }
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| D::Error::custom(format!("integer out of range: {n}"))),
        Value::String(s) if s.is_empty() => Ok(0),
        Value::String(s) => s
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid integer: {s:?}"))),
        other => Err(D::Error::custom(format!("expected integer, got {other}"))),
    }
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0.0),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom(format!("invalid number: {n}"))),
        Value::String(s) if s.is_empty() => Ok(0.0),
        Value::String(s) => s
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid number: {s:?}"))),
        other => Err(D::Error::custom(format!("expected number, got {other}"))),
    }
}

// skip_serializing_if predicates

pub(crate) fn is_zero_usize(value: &usize) -> bool {
    *value == 0
}

pub(crate) fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}

pub(crate) fn is_zero_f32(value: &f32) -> bool {
    *value == 0.0
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

pub(crate) fn is_none_or_empty<T>(value: &Option<Vec<T>>) -> bool {
    value.as_ref().map_or(true, Vec::is_empty)
}

pub(crate) fn is_none_or_empty_map<K, V>(value: &Option<HashMap<K, V>>) -> bool {
    value.as_ref().map_or(true, HashMap::is_empty)
}
