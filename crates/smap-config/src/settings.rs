//! Lenient readers over raw settings mappings.
//!
//! Hosts store widget settings as loosely typed key/value maps. Every reader
//! here returns `None` (or the caller's default) for missing or unusable
//! values instead of failing; unusable values are reported at debug level.

use std::collections::BTreeSet;

use serde_json::Value;
use smap_store::ItemId;

/// Raw settings mapping as supplied by the host.
pub type RawSettings = serde_json::Map<String, Value>;

/// Read a string value. Non-string values are ignored.
pub(crate) fn string<'a>(raw: &'a RawSettings, key: &str) -> Option<&'a str> {
    match raw.get(key)? {
        Value::String(s) => Some(s.as_str()),
        Value::Null => None,
        other => {
            tracing::debug!(key, value = %other, "Ignoring non-string setting");
            None
        }
    }
}

/// Read an on/off switch.
///
/// Accepts booleans, numbers (non-zero is on) and the strings
/// `yes`/`no`, `true`/`false`, `on`/`off`, `1`/`0`. An empty string is off.
pub(crate) fn switch(raw: &RawSettings, key: &str, default: bool) -> bool {
    let Some(value) = raw.get(key) else {
        return default;
    };
    let parsed = match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f.abs() > f64::EPSILON)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "on" | "1" => Some(true),
            "no" | "false" | "off" | "0" | "" => Some(false),
            _ => None,
        },
        Value::Null => return default,
        Value::Array(_) | Value::Object(_) => None,
    };
    parsed.unwrap_or_else(|| {
        tracing::debug!(key, value = %value, "Unrecognized switch value, using default");
        default
    })
}

/// Read a non-negative integer from a number or numeric string.
pub(crate) fn unsigned(raw: &RawSettings, key: &str) -> Option<u64> {
    let value = raw.get(key)?;
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) if s.trim().is_empty() => return None,
        Value::String(s) => s.trim().parse().ok(),
        Value::Null => return None,
        _ => None,
    };
    if parsed.is_none() {
        tracing::debug!(key, value = %value, "Ignoring non-numeric setting");
    }
    parsed
}

/// Read a set of item identifiers.
///
/// Accepts an array of numbers or numeric strings, or a single string of
/// identifiers separated by commas and/or whitespace. Unparseable entries
/// are skipped.
pub(crate) fn id_set(raw: &RawSettings, key: &str) -> BTreeSet<ItemId> {
    let mut ids = BTreeSet::new();
    match raw.get(key) {
        Some(Value::Array(values)) => {
            for value in values {
                match value {
                    Value::Number(n) => ids.extend(n.as_u64()),
                    Value::String(s) => ids.extend(parse_id_list(s)),
                    _ => tracing::debug!(key, value = %value, "Skipping invalid identifier"),
                }
            }
        }
        Some(Value::String(s)) => ids.extend(parse_id_list(s)),
        Some(Value::Number(n)) => ids.extend(n.as_u64()),
        Some(Value::Null) | None => {}
        Some(other) => tracing::debug!(key, value = %other, "Ignoring identifier list"),
    }
    ids
}

fn parse_id_list(list: &str) -> impl Iterator<Item = ItemId> + '_ {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse().ok())
}

/// Read a string value and map it through `parse`, falling back to `default`.
pub(crate) fn choice<T>(
    raw: &RawSettings,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
    default: T,
) -> T {
    let Some(value) = string(raw, key) else {
        return default;
    };
    parse(&value.trim().to_ascii_lowercase()).unwrap_or_else(|| {
        tracing::debug!(key, value, "Unrecognized choice, using default");
        default
    })
}
