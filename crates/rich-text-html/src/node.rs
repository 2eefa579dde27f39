//! Strongly typed rich text tree.
//!
//! Every wire-level `nodeType` is mapped onto a [`NodeKind`] once, during
//! normalization, so rendering never has to probe JSON shapes again.

use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Inline text decoration.
///
/// The declaration order is the nesting priority: earlier marks wrap later ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
    Superscript,
    Subscript,
    Strikethrough,
}

impl Mark {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "bold" => Some(Self::Bold),
            "italic" => Some(Self::Italic),
            "underline" => Some(Self::Underline),
            "code" => Some(Self::Code),
            "superscript" => Some(Self::Superscript),
            "subscript" => Some(Self::Subscript),
            "strikethrough" | "strike-through" | "strike" => Some(Self::Strikethrough),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Bold => "strong",
            Self::Italic => "em",
            Self::Underline => "u",
            Self::Code => "code",
            Self::Superscript => "sup",
            Self::Subscript => "sub",
            Self::Strikethrough => "strike",
        }
    }
}

/// The four reference node types that point at other entries or assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbeddedKind {
    EntryBlock,
    AssetBlock,
    EntryInline,
    AssetInline,
}

impl EmbeddedKind {
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "embedded-entry-block" => Some(Self::EntryBlock),
            "embedded-asset-block" => Some(Self::AssetBlock),
            "embedded-entry-inline" => Some(Self::EntryInline),
            "embedded-asset-inline" => Some(Self::AssetInline),
            _ => None,
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            Self::EntryBlock => "embedded-entry-block",
            Self::AssetBlock => "embedded-asset-block",
            Self::EntryInline => "embedded-entry-inline",
            Self::AssetInline => "embedded-asset-inline",
        }
    }

    pub fn is_block(self) -> bool {
        matches!(self, Self::EntryBlock | Self::AssetBlock)
    }

    pub fn is_entry(self) -> bool {
        matches!(self, Self::EntryBlock | Self::EntryInline)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Document,
    Paragraph,
    /// Level 1 through 6.
    Heading(u8),
    UnorderedList,
    OrderedList,
    ListItem,
    Blockquote,
    Hr,
    Hyperlink,
    Text {
        value: String,
        marks: BTreeSet<Mark>,
    },
    Embedded(EmbeddedKind),
    /// A `nodeType` outside the recognized table.
    Unknown(String),
    /// A node whose shape could not be converted; kept verbatim for the fallback output.
    Malformed(Value),
}

impl NodeKind {
    /// Maps a container or leaf `nodeType`. `text` is built separately since it carries a payload.
    pub fn from_wire(name: &str) -> Self {
        match name {
            "document" => Self::Document,
            "paragraph" => Self::Paragraph,
            "unordered-list" => Self::UnorderedList,
            "ordered-list" => Self::OrderedList,
            "list-item" => Self::ListItem,
            "blockquote" => Self::Blockquote,
            "hr" => Self::Hr,
            "hyperlink" => Self::Hyperlink,
            other => {
                if let Some(level) = heading_level(other) {
                    Self::Heading(level)
                } else if let Some(kind) = EmbeddedKind::from_wire(other) {
                    Self::Embedded(kind)
                } else {
                    Self::Unknown(other.to_string())
                }
            }
        }
    }

    pub fn is_block(&self) -> bool {
        match self {
            Self::Document
            | Self::Paragraph
            | Self::Heading(_)
            | Self::UnorderedList
            | Self::OrderedList
            | Self::ListItem
            | Self::Blockquote
            | Self::Hr => true,
            Self::Embedded(kind) => kind.is_block(),
            // Unknown kinds are reported on their own; don't double count them.
            Self::Unknown(_) | Self::Malformed(_) => true,
            Self::Hyperlink | Self::Text { .. } => false,
        }
    }

    /// Kinds whose `content` is never rendered.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Self::Hr | Self::Text { .. } | Self::Embedded(_) | Self::Unknown(_) | Self::Malformed(_)
        )
    }

    pub fn label(&self) -> String {
        match self {
            Self::Document => "document".into(),
            Self::Paragraph => "paragraph".into(),
            Self::Heading(level) => format!("heading-{level}"),
            Self::UnorderedList => "unordered-list".into(),
            Self::OrderedList => "ordered-list".into(),
            Self::ListItem => "list-item".into(),
            Self::Blockquote => "blockquote".into(),
            Self::Hr => "hr".into(),
            Self::Hyperlink => "hyperlink".into(),
            Self::Text { .. } => "text".into(),
            Self::Embedded(kind) => kind.wire_name().into(),
            Self::Unknown(name) => name.clone(),
            Self::Malformed(_) => "malformed".into(),
        }
    }
}

fn heading_level(name: &str) -> Option<u8> {
    let digit = name.strip_prefix("heading-")?;
    match digit {
        "1" | "2" | "3" | "4" | "5" | "6" => digit.parse().ok(),
        _ => None,
    }
}

/// One node of a normalized rich text document.
#[derive(Debug, Clone, PartialEq)]
pub struct RichNode {
    pub kind: NodeKind,
    pub data: Map<String, Value>,
    pub content: Vec<RichNode>,
}

impl RichNode {
    pub fn new(kind: NodeKind, content: Vec<RichNode>) -> Self {
        Self {
            kind,
            data: Map::new(),
            content,
        }
    }

    pub fn document(content: Vec<RichNode>) -> Self {
        Self::new(NodeKind::Document, content)
    }

    pub fn text(value: impl Into<String>, marks: impl IntoIterator<Item = Mark>) -> Self {
        Self::new(
            NodeKind::Text {
                value: value.into(),
                marks: marks.into_iter().collect(),
            },
            Vec::new(),
        )
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    /// A non-empty string attribute from `data`.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    /// `data.target.sys.<field>` as used by entry and asset links.
    pub fn target_sys(&self, field: &str) -> Option<&str> {
        self.data
            .get("target")?
            .get("sys")?
            .get(field)?
            .as_str()
    }
}
