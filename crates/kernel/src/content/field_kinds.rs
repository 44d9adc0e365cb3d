//! Per-kind value handling for block fields.
//!
//! Each `FieldKind` maps to a `KindHandler`: a table of plain functions that
//! check a value's shape, normalize it for storage, and decide emptiness for
//! required-field checks. All handlers accept `null` as "no value".

use postwright_sdk::types::FieldKind;
use serde_json::Value;

/// Validate/serialize function set for one field kind.
pub struct KindHandler {
    /// Whether the value has a shape this kind accepts.
    pub accepts: fn(&Value) -> bool,
    /// Canonical stored form of an accepted value. Idempotent.
    pub normalize: fn(Value) -> Value,
    /// Whether an accepted value counts as empty for required checks.
    pub is_empty: fn(&Value) -> bool,
}

static TEXT: KindHandler = KindHandler {
    accepts: text_accepts,
    normalize: identity,
    is_empty: text_is_empty,
};

static IMAGE: KindHandler = KindHandler {
    accepts: image_accepts,
    normalize: identity,
    is_empty: image_is_empty,
};

static REFERENCE: KindHandler = KindHandler {
    accepts: reference_accepts,
    normalize: reference_normalize,
    is_empty: reference_is_empty,
};

/// Look up the handler for a field kind.
pub fn handler(kind: FieldKind) -> &'static KindHandler {
    match kind {
        FieldKind::Text | FieldKind::RichText | FieldKind::LongText => &TEXT,
        FieldKind::Image => &IMAGE,
        FieldKind::Reference => &REFERENCE,
    }
}

fn identity(value: Value) -> Value {
    value
}

/// Extract a string from a value that may be raw or wrapped in `{value: "..."}`.
fn extract_str(value: &Value) -> Option<&str> {
    value
        .as_str()
        .or_else(|| value.get("value").and_then(|v| v.as_str()))
}

fn text_accepts(value: &Value) -> bool {
    match value {
        Value::Null | Value::String(_) => true,
        Value::Object(obj) => {
            obj.get("value").is_some_and(Value::is_string)
                && obj.get("format").is_none_or(Value::is_string)
        }
        _ => false,
    }
}

fn text_is_empty(value: &Value) -> bool {
    extract_str(value).is_none_or(|s| s.trim().is_empty())
}

/// Path of an image value: a bare string, or the string `path` (falling
/// back to `url`) of an object.
fn image_path(value: &Value) -> Option<&str> {
    value.as_str().or_else(|| {
        value
            .get("path")
            .and_then(Value::as_str)
            .or_else(|| value.get("url").and_then(Value::as_str))
    })
}

fn image_accepts(value: &Value) -> bool {
    value.is_null() || image_path(value).is_some()
}

fn image_is_empty(value: &Value) -> bool {
    image_path(value).is_none_or(|s| s.trim().is_empty())
}

fn reference_accepts(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Number(n) => n.is_i64(),
        Value::String(s) => s.trim().is_empty() || s.trim().parse::<i64>().is_ok(),
        _ => false,
    }
}

fn reference_normalize(value: Value) -> Value {
    let parsed = match value.as_str().map(str::trim) {
        Some("") => Some(Value::Null),
        Some(s) => s.parse::<i64>().ok().map(Value::from),
        None => None,
    };
    parsed.unwrap_or(value)
}

fn reference_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_kinds_share_a_handler() {
        for kind in [FieldKind::Text, FieldKind::RichText, FieldKind::LongText] {
            let h = handler(kind);
            assert!((h.accepts)(&json!("hello")));
            assert!((h.accepts)(&json!(null)));
            assert!((h.accepts)(&json!({"value": "<p>hi</p>", "format": "filtered_html"})));
            assert!(!(h.accepts)(&json!(42)));
            assert!(!(h.accepts)(&json!(["a"])));
            assert!(!(h.accepts)(&json!({"value": 1})));
        }
    }

    #[test]
    fn text_emptiness_trims_whitespace() {
        let h = handler(FieldKind::Text);
        assert!((h.is_empty)(&json!(null)));
        assert!((h.is_empty)(&json!("   ")));
        assert!((h.is_empty)(&json!({"value": ""})));
        assert!(!(h.is_empty)(&json!("x")));
        assert!(!(h.is_empty)(&json!({"value": "x", "format": "plain_text"})));
    }

    #[test]
    fn image_accepts_path_or_object() {
        let h = handler(FieldKind::Image);
        assert!((h.accepts)(&json!("uploads/cat.jpg")));
        assert!((h.accepts)(&json!({"path": "uploads/cat.jpg"})));
        assert!((h.accepts)(&json!({"url": "https://example.com/cat.jpg"})));
        assert!(!(h.accepts)(&json!({"caption": "no path"})));
        assert!(!(h.accepts)(&json!(true)));
    }

    #[test]
    fn image_falls_back_to_url_when_path_is_not_a_string() {
        let h = handler(FieldKind::Image);
        let value = json!({"path": null, "url": "https://example.com/cat.jpg"});
        assert!((h.accepts)(&value));
        assert!(!(h.is_empty)(&value));
        assert!(!(h.accepts)(&json!({"path": 3})));
    }

    #[test]
    fn image_emptiness() {
        let h = handler(FieldKind::Image);
        assert!((h.is_empty)(&json!(null)));
        assert!((h.is_empty)(&json!("")));
        assert!((h.is_empty)(&json!({"path": " "})));
        assert!(!(h.is_empty)(&json!("uploads/cat.jpg")));
    }

    #[test]
    fn reference_normalizes_numeric_strings() {
        let h = handler(FieldKind::Reference);
        assert!((h.accepts)(&json!(12)));
        assert!((h.accepts)(&json!("12")));
        assert!(!(h.accepts)(&json!("twelve")));
        assert!(!(h.accepts)(&json!(1.5)));

        assert_eq!((h.normalize)(json!(" 12 ")), json!(12));
        assert_eq!((h.normalize)(json!("")), json!(null));
        assert_eq!((h.normalize)(json!(12)), json!(12));
    }

    #[test]
    fn normalize_is_idempotent() {
        for (kind, value) in [
            (FieldKind::Reference, json!("7")),
            (FieldKind::Text, json!("hi")),
            (FieldKind::Image, json!({"path": "a.png"})),
        ] {
            let h = handler(kind);
            let once = (h.normalize)(value);
            let twice = (h.normalize)(once.clone());
            assert_eq!(once, twice);
        }
    }
}
