//! Serde helpers for the API's `yyyy-MM-dd HH:mm:ss` timestamps.
//!
//! Use with `#[serde(with = "crate::date")]` on `NaiveDateTime` fields, or
//! `crate::date::option` on optional ones.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

/// chrono pattern for timestamps in request and response bodies.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(DATE_FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
}

pub mod option {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.is_empty() => NaiveDateTime::parse_from_str(&raw, DATE_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
