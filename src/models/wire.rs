//! Lenient deserializers for loosely typed backend columns.
//!
//! The catalog tables were edited by hand over time: numeric-looking text
//! columns sometimes come back as JSON numbers and nullable columns as
//! `null`. These helpers absorb that so a null or numeric value in a text column
//! never fails a listing.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Accept a string, a number or null as a `String` (null becomes empty).
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

/// Accept a string or null as a `String` (null becomes empty).
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a number, a numeric string or null as an `f64` (null becomes 0).
pub(crate) fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom(format!("number out of range: {}", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid price: {}", s))),
        Some(other) => Err(de::Error::custom(format!("expected number, got {}", other))),
    }
}

/// Accept a single URL, a list of URLs or null as a `Vec`.
pub(crate) fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(url)) if url.trim().is_empty() => Vec::new(),
        Some(OneOrMany::One(url)) => vec![url],
        Some(OneOrMany::Many(urls)) => urls.into_iter().filter(|u| !u.trim().is_empty()).collect(),
    })
}

/// True when an embedded relation came back with at least one row.
pub(crate) fn has_rows<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(rows)) => !rows.is_empty(),
        Some(Value::Object(_)) => true,
        Some(Value::Bool(flag)) => flag,
        _ => false,
    })
}
