use rich_text_html::{
    RenderOptions, RenderWarning, WarningCode, is_rich_text_document, render_with_diagnostics,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const TITLE_FIELD: &str = "title";
pub const UNTITLED_ENTRY: &str = "Untitled Entry";

/// Render warning attributed to the field it came from.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldWarning {
    pub field: String,
    pub code: WarningCode,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl FieldWarning {
    fn from_render(field: &str, warning: RenderWarning) -> Self {
        Self {
            field: field.to_string(),
            code: warning.code,
            message: warning.message,
            path: warning.path,
        }
    }
}

/// Entry fields ready to be sent, with rich text already turned into HTML.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreparedFields {
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub warnings: Vec<FieldWarning>,
}

/// Flattens any field value to the string that goes into an HTML payload.
pub fn safe_field_value(key: &str, value: &Value, options: &RenderOptions) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Object(map) if is_document_object(map) || key_suggests_rich_text(key) => {
            render_with_diagnostics(value, options).html
        }
        other => other.to_string(),
    }
}

/// Converts every rich text field to HTML and makes sure a title is present.
pub fn prepare_entry_fields(
    mut fields: Map<String, Value>,
    entry_id: Option<&str>,
    options: &RenderOptions,
) -> PreparedFields {
    let mut warnings = Vec::new();

    for (field_id, value) in fields.iter_mut() {
        if !is_rich_text_document(value) {
            continue;
        }
        let output = render_with_diagnostics(&*value, options);
        tracing::debug!(
            field = %field_id,
            html_len = output.html.len(),
            warnings = output.warnings.len(),
            "converted rich text field to HTML"
        );
        warnings.extend(
            output
                .warnings
                .into_iter()
                .map(|warning| FieldWarning::from_render(field_id, warning)),
        );
        *value = Value::String(output.html);
    }

    if !has_title(&fields) {
        let title = entry_id
            .filter(|id| !id.is_empty())
            .map(|id| format!("Entry {id}"))
            .unwrap_or_else(|| UNTITLED_ENTRY.to_string());
        fields.insert(TITLE_FIELD.to_string(), Value::String(title));
    }

    PreparedFields { fields, warnings }
}

fn is_document_object(map: &Map<String, Value>) -> bool {
    map.get("nodeType").and_then(Value::as_str) == Some("document")
}

fn key_suggests_rich_text(key: &str) -> bool {
    key.to_ascii_lowercase().contains("richtext")
}

fn has_title(fields: &Map<String, Value>) -> bool {
    match fields.get(TITLE_FIELD) {
        None | Some(Value::Null) => false,
        Some(Value::String(title)) => !title.is_empty(),
        Some(_) => true,
    }
}
