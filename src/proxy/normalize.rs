//! Response shape normalization.
//!
//! Backends have returned result collections under either `data` or an older
//! per-endpoint name. After normalization both names are present and hold
//! the same value.

use serde_json::Value;

pub const DATA_FIELD: &str = "data";

/// Mirror `data` and `alias` into each other when only one is present.
/// Non-object payloads and payloads carrying both fields are left alone.
pub fn normalize_collection(mut payload: Value, alias: &str) -> Value {
    if alias == DATA_FIELD {
        return payload;
    }
    if let Value::Object(map) = &mut payload {
        let (from, to) = match (map.contains_key(DATA_FIELD), map.contains_key(alias)) {
            (true, false) => (DATA_FIELD, alias),
            (false, true) => (alias, DATA_FIELD),
            _ => return payload,
        };
        if let Some(value) = map.get(from).cloned() {
            map.insert(to.to_string(), value);
        }
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_only_gains_data() {
        let payload = json!({"success": true, "activities": [{"id": "x"}]});
        let normalized = normalize_collection(payload, "activities");
        assert_eq!(
            normalized,
            json!({"success": true, "data": [{"id": "x"}], "activities": [{"id": "x"}]})
        );
    }

    #[test]
    fn data_only_gains_legacy() {
        let normalized = normalize_collection(json!({"data": [1, 2]}), "rubrics");
        assert_eq!(normalized["rubrics"], json!([1, 2]));
    }

    #[test]
    fn normalizing_twice_equals_once() {
        let payload = json!({"success": true, "activities": [{"id": "x"}], "message": "ok"});
        let once = normalize_collection(payload, "activities");
        let twice = normalize_collection(once.clone(), "activities");
        assert_eq!(once, twice);
    }

    #[test]
    fn conflicting_fields_are_untouched() {
        let payload = json!({"data": [1], "activities": [2]});
        assert_eq!(normalize_collection(payload.clone(), "activities"), payload);
    }

    #[test]
    fn non_objects_pass_through() {
        let payload = json!([{"id": "a"}]);
        assert_eq!(normalize_collection(payload.clone(), "activities"), payload);
        assert_eq!(normalize_collection(json!({"x": 1}), "activities"), json!({"x": 1}));
    }
}
