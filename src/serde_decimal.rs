//! Serializes a value through its decimal string form.
//!
//! Used with `#[serde(with = "serde_decimal")]` on big integer and price fields so
//! JSON consumers never see lossy numbers or hex: `u128`, `i128`, `U256` and
//! `FixedPrice` all round-trip through `Display`/`FromStr`.

use serde::{de, Deserialize, Deserializer, Serializer};
use std::{fmt::Display, str::FromStr};

pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(de::Error::custom)
}
