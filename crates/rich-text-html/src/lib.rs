//! Canonical Contentful rich text to HTML renderer.
//! This crate normalizes the wire shapes a rich text field can arrive in, builds a
//! strongly typed node tree and renders it to an HTML fragment without ever failing.

mod context;

pub mod config;
pub mod detect;
pub mod errors;
pub mod mode;
pub mod node;
pub mod normalize;
pub mod output;
pub mod renderer;
pub mod resolve;

pub use config::{ConfigError, RenderOptions, RendererConfig};
pub use detect::is_rich_text_document;
pub use errors::RenderError;
pub use mode::EscapeMode;
pub use node::{EmbeddedKind, Mark, NodeKind, RichNode};
pub use normalize::{Normalized, RichTextInput, normalize};
pub use output::{RenderOutput, RenderWarning, WarningCode};
pub use renderer::{DocumentRenderer, HtmlRenderer, render, render_with_diagnostics};
pub use resolve::{
    EmbeddedRef, EmbeddedResolver, TitleLookup, collect_embedded_entry_ids, render_resolved,
    resolve_embedded,
};
