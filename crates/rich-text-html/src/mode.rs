use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub const ESCAPE_ENV_VAR: &str = "RICH_TEXT_HTML_ESCAPE";

/// Whether text values and attributes are HTML-escaped on output.
///
/// `Legacy` keeps the historical behavior of inserting text verbatim, which some
/// email template consumers rely on for intentional inline markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EscapeMode {
    #[default]
    Legacy,
    Escape,
}

impl EscapeMode {
    /// Parse an escape mode string (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" | "raw" | "off" | "none" => Some(Self::Legacy),
            "escape" | "html" | "on" => Some(Self::Escape),
            _ => None,
        }
    }

    pub(crate) fn apply<'a>(self, text: &'a str) -> Cow<'a, str> {
        match self {
            EscapeMode::Legacy => Cow::Borrowed(text),
            EscapeMode::Escape => Cow::Owned(htmlescape::encode_minimal(text)),
        }
    }
}
