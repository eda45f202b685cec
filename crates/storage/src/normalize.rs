//! Reconciles the two generations of stored session documents.
//!
//! Generation 1 sessions carry a single `player_id`, `content`, `trainer`
//! and `results`. Generation 2 sessions carry `player_ids`, `themes`,
//! `trainers` and `content_details`. [`normalize_session`] maps both onto the
//! generation 2 shape; it only ever works on the copy read from the store.

use serde_json::Value;

use crate::store::Document;

/// Canonical form of a raw session document.
///
/// After normalization `player_ids`, `themes` and `trainers` are arrays,
/// `content_details` is a string and the singular `player_id` is gone.
/// Normalizing a canonical document returns it unchanged.
pub fn normalize_session(mut doc: Document) -> Document {
    if !is_array(&doc, "themes") {
        let themes = legacy_label(&doc, "content");
        doc.insert("themes".into(), themes);
    }

    if !is_array(&doc, "trainers") {
        let trainers = legacy_label(&doc, "trainer");
        doc.insert("trainers".into(), trainers);
    }

    if !is_string(&doc, "content_details") {
        let details = doc
            .get("results")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        doc.insert("content_details".into(), Value::String(details));
    }

    let legacy_player = doc.remove("player_id");
    if !is_array(&doc, "player_ids") {
        let player_ids = match legacy_player {
            Some(Value::String(id)) => vec![Value::String(id)],
            _ => Vec::new(),
        };
        doc.insert("player_ids".into(), Value::Array(player_ids));
    }

    doc
}

fn is_array(doc: &Document, field: &str) -> bool {
    matches!(doc.get(field), Some(Value::Array(_)))
}

fn is_string(doc: &Document, field: &str) -> bool {
    matches!(doc.get(field), Some(Value::String(_)))
}

/// One-element array from a legacy single-label field, empty when blank.
fn legacy_label(doc: &Document, field: &str) -> Value {
    match doc.get(field).and_then(Value::as_str) {
        Some(label) if !label.trim().is_empty() => Value::Array(vec![Value::String(label.into())]),
        _ => Value::Array(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_legacy_session_is_lifted() {
        let raw = doc(json!({
            "id": "s1",
            "session_date": "2026-01-10",
            "content": "Shooting",
            "trainer": "Leo",
            "player_id": "p1",
            "results": "Good rhythm"
        }));

        let normalized = normalize_session(raw);

        assert_eq!(normalized["themes"], json!(["Shooting"]));
        assert_eq!(normalized["trainers"], json!(["Leo"]));
        assert_eq!(normalized["player_ids"], json!(["p1"]));
        assert_eq!(normalized["content_details"], "Good rhythm");
        assert!(!normalized.contains_key("player_id"));
    }

    #[test]
    fn test_blank_legacy_labels_become_empty_arrays() {
        let normalized = normalize_session(doc(json!({"id": "s1", "content": "  "})));

        assert_eq!(normalized["themes"], json!([]));
        assert_eq!(normalized["trainers"], json!([]));
        assert_eq!(normalized["content_details"], "");
    }

    #[test]
    fn test_missing_players_default_to_empty() {
        let normalized = normalize_session(doc(json!({"id": "s1", "themes": ["Défense"]})));

        assert_eq!(normalized["player_ids"], json!([]));
        assert_eq!(normalized["trainers"], json!([]));
    }

    #[test]
    fn test_canonical_session_is_untouched() {
        let canonical = doc(json!({
            "id": "s2",
            "player_ids": ["p1", "p2"],
            "session_date": "2026-02-01",
            "themes": ["Tir", "Dribble"],
            "trainers": ["Leo"],
            "content_details": "Drills",
            "notes": null
        }));

        assert_eq!(normalize_session(canonical.clone()), canonical);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw = doc(json!({"id": "s3", "content": "Passes", "player_id": "p9"}));

        let once = normalize_session(raw);
        let twice = normalize_session(once.clone());

        assert_eq!(once, twice);
    }
}
