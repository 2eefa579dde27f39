//! Wire shape normalization.
//!
//! A rich text field reaches us as a JSON string, a parsed document, a parsed
//! object wrapping a serialized document in `content`, or a bare
//! `{data, content}` object. All of them end up as one [`RichNode`] tree.

use crate::context::RenderContext;
use crate::errors::RenderError;
use crate::node::{Mark, NodeKind, RichNode};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Substring identifying a serialized document hidden inside a string.
pub const DOCUMENT_MARKER: &str = "\"nodeType\":\"document\"";

/// How many serialized documents may be nested inside each other.
const MAX_NESTED_DOCUMENTS: usize = 4;

/// Raw field value handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RichTextInput<'a> {
    /// The field has no value at all.
    Missing,
    Text(&'a str),
    Value(&'a Value),
}

impl<'a> From<&'a str> for RichTextInput<'a> {
    fn from(value: &'a str) -> Self {
        RichTextInput::Text(value)
    }
}

impl<'a> From<&'a String> for RichTextInput<'a> {
    fn from(value: &'a String) -> Self {
        RichTextInput::Text(value)
    }
}

impl<'a> From<&'a Value> for RichTextInput<'a> {
    fn from(value: &'a Value) -> Self {
        RichTextInput::Value(value)
    }
}

impl<'a> From<Option<&'a Value>> for RichTextInput<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        value.map_or(RichTextInput::Missing, RichTextInput::Value)
    }
}

/// Result of normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Empty,
    /// Text that is not a document; returned to the caller unchanged.
    Opaque(String),
    Tree(RichNode),
}

/// Normalizes `input` with default limits, discarding diagnostics.
pub fn normalize(input: RichTextInput<'_>) -> Normalized {
    let mut ctx = RenderContext::new(crate::config::DEFAULT_MAX_DEPTH);
    normalize_with(input, &mut ctx)
}

pub(crate) fn normalize_with(input: RichTextInput<'_>, ctx: &mut RenderContext) -> Normalized {
    match input {
        RichTextInput::Missing => Normalized::Empty,
        RichTextInput::Text(text) => normalize_text(text, ctx, 0),
        RichTextInput::Value(value) => normalize_value(value, ctx, 0),
    }
}

fn normalize_text(text: &str, ctx: &mut RenderContext, nesting: usize) -> Normalized {
    if text.is_empty() {
        return Normalized::Empty;
    }
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => normalize_value(&value, ctx, nesting),
        Ok(Value::String(inner)) => Normalized::Opaque(inner),
        Ok(_) => Normalized::Opaque(text.to_string()),
        Err(err) => {
            ctx.record(RenderError::Parse(err));
            Normalized::Opaque(text.to_string())
        }
    }
}

fn normalize_value(value: &Value, ctx: &mut RenderContext, nesting: usize) -> Normalized {
    let map = match value {
        Value::Null => return Normalized::Empty,
        Value::String(text) => return normalize_text(text, ctx, nesting),
        Value::Object(map) => map,
        Value::Bool(false) => return Normalized::Empty,
        Value::Number(number) if number.as_f64() == Some(0.0) => return Normalized::Empty,
        Value::Bool(_) => return unsupported(value, "boolean", ctx),
        Value::Number(_) => return unsupported(value, "number", ctx),
        Value::Array(_) => return unsupported(value, "array", ctx),
    };

    if let Some(Value::String(inner)) = map.get("content") {
        if inner.contains(DOCUMENT_MARKER) {
            if nesting >= MAX_NESTED_DOCUMENTS {
                ctx.record(RenderError::Conversion(format!(
                    "serialized documents nested more than {MAX_NESTED_DOCUMENTS} levels"
                )));
                return Normalized::Opaque(inner.clone());
            }
            return normalize_text(inner, ctx, nesting + 1);
        }
    }

    if !has_node_type(map) {
        if let Some(Value::Array(children)) = map.get("content") {
            let content = convert_children(children, ctx);
            return Normalized::Tree(RichNode::document(content).with_data(data_of(map)));
        }
    }

    match convert_node(value, ctx) {
        Some(tree) => Normalized::Tree(tree),
        None => Normalized::Empty,
    }
}

fn unsupported(value: &Value, label: &'static str, ctx: &mut RenderContext) -> Normalized {
    ctx.record(RenderError::UnsupportedInput(label));
    Normalized::Opaque(value.to_string())
}

fn has_node_type(map: &Map<String, Value>) -> bool {
    match map.get("nodeType") {
        None | Some(Value::Null) => false,
        Some(Value::String(name)) => !name.is_empty(),
        Some(_) => true,
    }
}

fn data_of(map: &Map<String, Value>) -> Map<String, Value> {
    map.get("data")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

fn convert_children(children: &[Value], ctx: &mut RenderContext) -> Vec<RichNode> {
    children
        .iter()
        .enumerate()
        .filter_map(|(index, child)| ctx.child(index, |ctx| convert_node(child, ctx)))
        .collect()
}

/// Converts one JSON node. `None` means the node sits below the depth limit and was dropped.
fn convert_node(value: &Value, ctx: &mut RenderContext) -> Option<RichNode> {
    if ctx.depth() > ctx.max_depth() {
        ctx.record(RenderError::DepthExceeded(ctx.max_depth()));
        return None;
    }

    let Some(map) = value.as_object() else {
        return Some(malformed(value, "node is not an object", ctx));
    };

    let node_type = match map.get("nodeType") {
        None | Some(Value::Null) => "",
        Some(Value::String(name)) => name.as_str(),
        Some(_) => return Some(malformed(value, "nodeType is not a string", ctx)),
    };

    if node_type == "text" {
        return Some(convert_text(value, map, ctx));
    }

    let kind = NodeKind::from_wire(node_type);
    let content = if kind.is_leaf() {
        Vec::new()
    } else {
        match map.get("content") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(children)) => convert_children(children, ctx),
            Some(_) => return Some(malformed(value, "content is not an array", ctx)),
        }
    };

    Some(RichNode::new(kind, content).with_data(data_of(map)))
}

fn convert_text(value: &Value, map: &Map<String, Value>, ctx: &mut RenderContext) -> RichNode {
    let text = match map.get("value") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(_) => return malformed(value, "text value is not a string", ctx),
    };
    let marks = match map.get("marks") {
        None | Some(Value::Null) => BTreeSet::new(),
        Some(Value::Array(marks)) => convert_marks(marks, ctx),
        Some(_) => return malformed(value, "marks is not an array", ctx),
    };
    RichNode::new(NodeKind::Text { value: text, marks }, Vec::new()).with_data(data_of(map))
}

fn convert_marks(marks: &[Value], ctx: &mut RenderContext) -> BTreeSet<Mark> {
    let mut set = BTreeSet::new();
    for mark in marks {
        let name = mark
            .get("type")
            .and_then(Value::as_str)
            .or_else(|| mark.as_str());
        match name.and_then(Mark::parse) {
            Some(parsed) => {
                set.insert(parsed);
            }
            None => {
                let label = name.map_or_else(|| mark.to_string(), str::to_string);
                ctx.record(RenderError::UnknownMark(label));
            }
        }
    }
    set
}

fn malformed(value: &Value, reason: &str, ctx: &mut RenderContext) -> RichNode {
    tracing::warn!(reason, "malformed rich text node, falling back to its JSON text");
    ctx.record(RenderError::Conversion(reason.to_string()));
    RichNode::new(NodeKind::Malformed(value.clone()), Vec::new())
}
