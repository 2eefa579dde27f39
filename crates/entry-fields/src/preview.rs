//! Standalone HTML preview of a set of entry fields.

use crate::fields::{TITLE_FIELD, safe_field_value};
use rich_text_html::RenderOptions;
use serde_json::{Map, Value};

const EXTERNAL_ID_FIELD: &str = "external_id";

const STYLE: &str = "\
 <style>
 body { font-family: Arial, sans-serif; margin: 0; padding: 20px; }
 .content { max-width: 600px; margin: 0 auto; }
 img { max-width: 100%; height: auto; }
 .field { margin-bottom: 20px; }
 .field-label { font-weight: bold; margin-bottom: 5px; }
 .field-value { line-height: 1.5; }
 pre { background: #f5f5f5; padding: 10px; border-radius: 4px; overflow-x: auto; }
 </style>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Markup {
    /// Already HTML, inserted verbatim.
    Raw,
    Image,
    Escaped,
}

/// Lays out `fields` as a full HTML page.
///
/// The first field other than `title` and `external_id` names the page. A single
/// field renders as a bare value; several render as label and value pairs.
pub fn fields_to_html(fields: &Map<String, Value>, options: &RenderOptions) -> String {
    let keys: Vec<&str> = fields
        .keys()
        .map(String::as_str)
        .filter(|key| !is_reserved(key))
        .collect();
    let heading = keys.first().copied().unwrap_or_default();
    let escaped_heading = escape(heading);

    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n <meta charset=\"utf-8\">\n <title>{escaped_heading}</title>\n \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n{STYLE}\n</head>\n<body>\n <div class=\"content\">"
    );
    if !heading.is_empty() {
        html.push_str(&format!("\n <h1>{escaped_heading}</h1>"));
    }

    let mut included = Vec::new();
    let single = keys.len() == 1;
    for key in keys {
        let Some(value) = fields.get(key) else {
            continue;
        };
        let safe = safe_field_value(key, value, options);
        if safe.is_empty() {
            tracing::debug!(field = key, "skipping empty field");
            continue;
        }
        let alt = if heading.is_empty() { key } else { heading };
        let body = match classify(key, &safe) {
            Markup::Raw => safe,
            Markup::Image => {
                format!("<img src=\"{}\" alt=\"{}\" />", escape(&safe), escape(alt))
            }
            Markup::Escaped => escape(&safe),
        };
        if single {
            html.push_str(&format!("\n <div class=\"field-value\">{body}</div>"));
        } else {
            html.push_str(&format!(
                "\n <div class=\"field\">\n <div class=\"field-label\">{}</div>\n <div class=\"field-value\">{body}</div>\n </div>",
                escape(key)
            ));
        }
        included.push(key);
    }

    html.push_str("\n </div>\n</body>\n</html>");
    tracing::debug!(
        count = included.len(),
        fields = %included.join(", "),
        "generated HTML preview"
    );
    html
}

fn is_reserved(key: &str) -> bool {
    key == TITLE_FIELD || key == EXTERNAL_ID_FIELD
}

fn classify(key: &str, value: &str) -> Markup {
    if key.contains("richText") || (value.contains('<') && value.contains('>')) {
        Markup::Raw
    } else if looks_like_image_url(value) {
        Markup::Image
    } else {
        Markup::Escaped
    }
}

fn looks_like_image_url(value: &str) -> bool {
    value.starts_with("http")
        && (value.ends_with(".jpg")
            || value.ends_with(".png")
            || value.ends_with(".gif")
            || value.contains("/asset.")
            || value.contains("/images/"))
}

fn escape(text: &str) -> String {
    htmlescape::encode_minimal(text)
}
