//! Row types for every table the service reads or writes.
//!
//! jsonb columns arrive as `serde_json::Value` and are converted into typed
//! lists at this boundary. Stored data is never trusted to be well-formed:
//! a non-array column reads as an empty list and undecodable items are dropped.

pub mod job;
pub mod motivation;
pub mod profile;
pub mod progress;
pub mod skill_gap;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Decodes a jsonb array column into a typed list.
pub fn decode_list<T: DeserializeOwned>(column: &str, value: Option<&Value>) -> Vec<T> {
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => return Vec::new(),
        Some(other) => {
            warn!("Column '{column}' holds a non-array value ({other}); reading as empty");
            return Vec::new();
        }
    };

    items
        .iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Dropping malformed item in '{column}': {e}");
                None
            }
        })
        .collect()
}

/// Encodes a typed list back into a jsonb value.
pub fn encode_list<T: Serialize>(items: &[T]) -> Value {
    serde_json::to_value(items).unwrap_or_else(|_| Value::Array(Vec::new()))
}

/// An achievement, completed course or learning resource attached to a
/// progress record. Older rows store bare strings; newer ones store objects.
/// Anything else is kept opaque so the list length stays accurate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackedItem {
    Named(String),
    Detailed {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        completed_at: Option<String>,
    },
    Other(Value),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_list_non_array_is_empty() {
        let value = json!({"python": true});
        let decoded: Vec<String> = decode_list("skills", Some(&value));
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_list_null_and_missing_are_empty() {
        let decoded: Vec<String> = decode_list("skills", Some(&Value::Null));
        assert!(decoded.is_empty());
        let decoded: Vec<String> = decode_list("skills", None);
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_list_drops_malformed_items() {
        let value = json!(["Rust", 42, "SQL", null]);
        let decoded: Vec<String> = decode_list("skills", Some(&value));
        assert_eq!(decoded, vec!["Rust".to_string(), "SQL".to_string()]);
    }

    #[test]
    fn test_tracked_items_keep_every_entry() {
        let value = json!([
            "First PR merged",
            {"title": "Certified", "url": "https://example.com/cert"},
            7,
            {"unexpected": "shape"}
        ]);
        let decoded: Vec<TrackedItem> = decode_list("achievements", Some(&value));
        assert_eq!(decoded.len(), 4);
        assert_eq!(decoded[0], TrackedItem::Named("First PR merged".into()));
        assert!(matches!(decoded[1], TrackedItem::Detailed { ref title, .. } if title == "Certified"));
        assert!(matches!(decoded[2], TrackedItem::Other(_)));
    }

    #[test]
    fn test_encode_list_round_trips_strings() {
        let skills = vec!["Rust".to_string(), "Go".to_string()];
        assert_eq!(encode_list(&skills), json!(["Rust", "Go"]));
    }
}
