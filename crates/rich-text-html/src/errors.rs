use crate::output::WarningCode;
use thiserror::Error;

/// Problems met while turning a field value into HTML.
///
/// These never reach the caller of [`crate::render`]; each one is recovered
/// locally and reported as a [`crate::RenderWarning`].
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("input is not valid JSON, passing it through as text: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported input of type {0}, rendering its JSON text")]
    UnsupportedInput(&'static str),

    #[error("unhandled rich text node type `{0}`")]
    UnknownNodeKind(String),

    #[error("unknown mark `{0}` ignored")]
    UnknownMark(String),

    #[error("cannot convert node: {0}")]
    Conversion(String),

    #[error("node nested deeper than {0} levels dropped")]
    DepthExceeded(usize),

    #[error("inline node `{0}` found directly under the document")]
    InlineAtDocumentRoot(String),
}

impl RenderError {
    pub fn code(&self) -> WarningCode {
        match self {
            RenderError::Parse(_) => WarningCode::ParseFallback,
            RenderError::UnsupportedInput(_) => WarningCode::UnsupportedInput,
            RenderError::UnknownNodeKind(_) => WarningCode::UnknownNodeKind,
            RenderError::UnknownMark(_) => WarningCode::UnknownMark,
            RenderError::Conversion(_) => WarningCode::ConversionError,
            RenderError::DepthExceeded(_) => WarningCode::DepthExceeded,
            RenderError::InlineAtDocumentRoot(_) => WarningCode::InlineAtDocumentRoot,
        }
    }
}
