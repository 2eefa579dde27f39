use crate::normalize::DOCUMENT_MARKER;
use serde_json::Value;

/// Whether a raw field value looks like a rich text document in any wire shape.
pub fn is_rich_text_document(value: &Value) -> bool {
    match value {
        Value::String(text) => text.contains(DOCUMENT_MARKER),
        Value::Object(map) => {
            if map.get("nodeType").and_then(Value::as_str) == Some("document") {
                return true;
            }
            match map.get("content") {
                Some(Value::String(inner)) => inner.contains(DOCUMENT_MARKER),
                Some(Value::Array(items)) => !items.is_empty(),
                _ => false,
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_all_wire_shapes() {
        let doc = json!({"nodeType": "document", "data": {}, "content": []});
        assert!(is_rich_text_document(&doc));
        assert!(is_rich_text_document(&Value::String(doc.to_string())));
        assert!(is_rich_text_document(&json!({"content": doc.to_string()})));
        assert!(is_rich_text_document(
            &json!({"data": {}, "content": [{"nodeType": "paragraph"}]})
        ));
    }

    #[test]
    fn rejects_plain_values() {
        assert!(!is_rich_text_document(&json!("just text")));
        assert!(!is_rich_text_document(&json!({"content": []})));
        assert!(!is_rich_text_document(&json!({"sys": {"id": "x"}})));
        assert!(!is_rich_text_document(&json!(12)));
        assert!(!is_rich_text_document(&Value::Null));
    }
}
