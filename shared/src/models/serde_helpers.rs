//! Lenient serde helpers for admin form payloads
//!
//! Admin forms post numeric inputs either as JSON numbers or as the raw
//! text of the input box. These helpers coerce both shapes.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<T> {
    Number(T),
    Text(String),
}

/// Deserialize an optional number that may arrive as a string.
///
/// `null`, a missing field and an empty / whitespace-only string all map to `None`.
pub fn option_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    match Option::<NumberOrString<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<T>()
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid number '{}': {}", trimmed, e)))
        }
    }
}

/// Deserialize a clearable field of a partial update.
///
/// Paired with `#[serde(default)]`: a missing field stays `None` (keep the
/// stored value), an explicit `null` becomes `Some(None)` (clear it).
pub fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize bool that treats null as true
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(true))
}

pub(crate) fn default_true() -> bool {
    true
}
