//! Guest lists attached to an RSVP.
//!
//! Guests have been stored in two shapes over time:
//!
//! - an ordered list of names: `["Ana", "Ion"]`
//! - a legacy object: `{"count": 2, "names": "Ana, Ion"}`
//!
//! Both normalize to the ordered list. Anything else is an empty list.
//! Normalizing an already-normalized list returns it unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Guest data as submitted or as found in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuestsShape {
    /// Canonical shape.
    List(Vec<String>),
    /// `{count, names}` with comma-separated names.
    Legacy(LegacyGuests),
}

/// The legacy `{count, names}` guest object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyGuests {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<String>,
}

impl GuestsShape {
    /// Convert to the canonical ordered list of guest names.
    #[must_use]
    pub fn normalize(&self) -> Vec<String> {
        match self {
            Self::List(names) => names.clone(),
            Self::Legacy(legacy) => legacy.names.as_deref().map(split_names).unwrap_or_default(),
        }
    }
}

impl From<Vec<String>> for GuestsShape {
    fn from(names: Vec<String>) -> Self {
        Self::List(names)
    }
}

/// Normalize raw guest data of any stored shape.
///
/// - array: its string elements, unchanged and in order
/// - object with a string `names` field: split on commas, trimmed, empties dropped
/// - anything else: empty
#[must_use]
pub fn normalize_guests(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        Value::Object(map) => map
            .get("names")
            .and_then(Value::as_str)
            .map(split_names)
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn split_names(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Serde adapter that accepts any stored guest shape and yields the list.
///
/// # Errors
///
/// Only fails if the input is not valid JSON for the surrounding format.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(normalize_guests).unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_legacy_names_are_split_and_trimmed() {
        let raw = json!({"names": "Ana, Ion,, Radu"});
        assert_eq!(normalize_guests(&raw), vec!["Ana", "Ion", "Radu"]);
    }

    #[test]
    fn test_legacy_with_count_only_is_empty() {
        assert!(normalize_guests(&json!({"count": 3})).is_empty());
        assert!(normalize_guests(&json!({"count": 2, "names": ""})).is_empty());
    }

    #[test]
    fn test_list_is_used_as_is() {
        let raw = json!(["Ana", " Ion "]);
        assert_eq!(normalize_guests(&raw), vec!["Ana", " Ion "]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_guests(&json!({"count": 2, "names": "Ana ,Ion"}));
        let twice = normalize_guests(&serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);
        assert_eq!(GuestsShape::List(once.clone()).normalize(), once);
    }

    #[test]
    fn test_unknown_shapes_are_empty() {
        assert!(normalize_guests(&Value::Null).is_empty());
        assert!(normalize_guests(&json!(4)).is_empty());
        assert!(normalize_guests(&json!("Ana, Ion")).is_empty());
    }

    #[test]
    fn test_shape_deserializes_both_forms() {
        let list: GuestsShape = serde_json::from_str(r#"["Ana"]"#).unwrap();
        assert_eq!(list.normalize(), vec!["Ana"]);

        let legacy: GuestsShape = serde_json::from_str(r#"{"count":2,"names":"Ana, Ion"}"#).unwrap();
        assert_eq!(legacy.normalize(), vec!["Ana", "Ion"]);
    }

    #[test]
    fn test_deserialize_adapter() {
        #[derive(Deserialize)]
        struct Record {
            #[serde(default, deserialize_with = "deserialize")]
            guests: Vec<String>,
        }

        let legacy: Record = serde_json::from_str(r#"{"guests":{"names":"Ana,Ion"}}"#).unwrap();
        assert_eq!(legacy.guests, vec!["Ana", "Ion"]);

        let missing: Record = serde_json::from_str("{}").unwrap();
        assert!(missing.guests.is_empty());

        let null: Record = serde_json::from_str(r#"{"guests":null}"#).unwrap();
        assert!(null.guests.is_empty());
    }
}
