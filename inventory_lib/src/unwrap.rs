//! Response unwrapper: finds the list payload inside a response of unknown shape.

use serde_json::Value;

use crate::entity::EntityKind;

/// How many envelope levels are descended before giving up.
const MAX_ENVELOPE_DEPTH: usize = 4;

/// Returns the first array found in `response`, probing `keys` in order.
///
/// The response itself is returned when it already is an array. Envelope
/// values that are objects are searched recursively with the same keys, so
/// `{"data": {"content": [...]}}` yields the inner list. Anything else
/// yields an empty slice; this never fails.
pub fn unwrap_list_with<'a>(response: &'a Value, keys: &[&str]) -> &'a [Value] {
    match find_list(response, keys, 0) {
        Some(items) => items,
        None => {
            if !response.is_null() {
                tracing::debug!("No list payload found in response, treating as empty");
            }
            &[]
        }
    }
}

/// [`unwrap_list_with`] using the envelope table of an entity kind.
pub fn unwrap_list(response: &Value, kind: EntityKind) -> &[Value] {
    unwrap_list_with(response, kind.envelope_keys())
}

fn find_list<'a>(value: &'a Value, keys: &[&str], depth: usize) -> Option<&'a [Value]> {
    match value {
        Value::Array(items) => Some(items.as_slice()),
        Value::Object(map) if depth < MAX_ENVELOPE_DEPTH => keys
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(|inner| find_list(inner, keys, depth + 1)),
        _ => None,
    }
}

/// Returns the record inside a single-record response.
///
/// Create, update and auth endpoints answer either with the record itself or
/// with `{"data": {...}}`; a non-object `data` (e.g. a message string) is not
/// a record, so the response is returned unchanged.
pub fn unwrap_record(response: &Value) -> &Value {
    match response.get("data") {
        Some(inner) if inner.is_object() => inner,
        _ => response,
    }
}
