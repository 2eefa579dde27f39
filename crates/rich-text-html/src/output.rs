use serde::{Deserialize, Serialize};

/// Machine readable category of a render warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    ParseFallback,
    UnsupportedInput,
    UnknownNodeKind,
    UnknownMark,
    ConversionError,
    DepthExceeded,
    InlineAtDocumentRoot,
}

/// Warning emitted while rendering a rich text value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderWarning {
    pub code: WarningCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// HTML produced by the renderer plus everything it had to work around.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOutput {
    pub html: String,
    #[serde(default)]
    pub warnings: Vec<RenderWarning>,
}

impl RenderOutput {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Warnings matching `code`, in the order they were raised.
    pub fn warnings_with(&self, code: WarningCode) -> impl Iterator<Item = &RenderWarning> {
        self.warnings
            .iter()
            .filter(move |warning| warning.code == code)
    }
}
