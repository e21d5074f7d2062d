//! Client-side search over normalized records.
//!
//! A record matches when the lowercased, space-joined text of all its field
//! values contains the trimmed, lowercased search term. Nested objects and
//! arrays are flattened; nulls render as empty text.

use serde::Serialize;
use serde_json::Value;

/// Lowercased text of every field value in `record`, joined with spaces.
pub fn search_text<T: Serialize>(record: &T) -> String {
    let value = match serde_json::to_value(record) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Record not searchable: {}", e);
            return String::new();
        }
    };
    let mut parts = Vec::new();
    flatten(&value, &mut parts);
    parts.join(" ").to_lowercase()
}

fn flatten(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => out.push(String::new()),
        Value::Bool(b) => out.push(b.to_string()),
        Value::Number(n) => out.push(n.to_string()),
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => items.iter().for_each(|item| flatten(item, out)),
        Value::Object(map) => map.values().for_each(|item| flatten(item, out)),
    }
}

/// Normalizes a raw search term. An empty result matches everything.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Whether `record` matches an already normalized term.
pub fn matches<T: Serialize>(record: &T, normalized_term: &str) -> bool {
    normalized_term.is_empty() || search_text(record).contains(normalized_term)
}

/// Indices of the records matching `term`, in their original order.
pub fn filter_indices<T: Serialize>(records: &[T], term: &str) -> Vec<usize> {
    let term = normalize_term(term);
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(*record, &term))
        .map(|(index, _)| index)
        .collect()
}
