//! Embedded entry and asset resolution.
//!
//! The renderer never fetches referenced records. Callers that can look them up
//! implement [`EmbeddedResolver`] and swap embedded nodes for plain text before
//! rendering; anything left unresolved renders as the placeholder.

use crate::{
    config::RenderOptions,
    node::{EmbeddedKind, NodeKind, RichNode},
    normalize::RichTextInput,
    output::RenderOutput,
    renderer::HtmlRenderer,
};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

pub const UNTITLED: &str = "Untitled";

/// What an embedded node points at.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedRef<'a> {
    pub kind: EmbeddedKind,
    pub target_id: Option<&'a str>,
    pub link_type: Option<&'a str>,
    pub data: &'a Map<String, Value>,
}

impl<'a> EmbeddedRef<'a> {
    fn from_node(kind: EmbeddedKind, node: &'a RichNode) -> Self {
        Self {
            kind,
            target_id: node.target_sys("id"),
            link_type: node.target_sys("linkType"),
            data: &node.data,
        }
    }
}

/// Supplies the plain text that replaces an embedded node.
pub trait EmbeddedResolver {
    /// `None` leaves the node in place.
    fn resolve(&self, embed: &EmbeddedRef<'_>) -> Option<String>;
}

impl<F> EmbeddedResolver for F
where
    F: Fn(&EmbeddedRef<'_>) -> Option<String>,
{
    fn resolve(&self, embed: &EmbeddedRef<'_>) -> Option<String> {
        self(embed)
    }
}

/// Resolves embedded entries to titles fetched ahead of time.
///
/// Entries missing from the table resolve to the fallback title; assets are left alone.
#[derive(Debug, Clone)]
pub struct TitleLookup {
    titles: HashMap<String, String>,
    fallback: String,
}

impl TitleLookup {
    pub fn new(titles: HashMap<String, String>) -> Self {
        Self {
            titles,
            fallback: UNTITLED.to_string(),
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

impl EmbeddedResolver for TitleLookup {
    fn resolve(&self, embed: &EmbeddedRef<'_>) -> Option<String> {
        if !embed.kind.is_entry() {
            return None;
        }
        let title = embed
            .target_id
            .and_then(|id| self.titles.get(id))
            .unwrap_or(&self.fallback);
        Some(title.clone())
    }
}

/// Ids of every embedded entry (block or inline), first occurrence first.
pub fn collect_embedded_entry_ids(tree: &RichNode) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    collect_into(tree, &mut seen, &mut ids);
    ids
}

fn collect_into(node: &RichNode, seen: &mut HashSet<String>, ids: &mut Vec<String>) {
    if let NodeKind::Embedded(kind) = node.kind {
        if kind.is_entry() {
            if let Some(id) = node.target_sys("id") {
                if seen.insert(id.to_string()) {
                    ids.push(id.to_string());
                }
            }
        }
    }
    for child in &node.content {
        collect_into(child, seen, ids);
    }
}

/// Replaces resolvable embedded nodes with text. Block embeds become a paragraph.
pub fn resolve_embedded<R>(tree: RichNode, resolver: &R) -> RichNode
where
    R: EmbeddedResolver + ?Sized,
{
    let RichNode {
        kind,
        data,
        content,
    } = tree;

    if let NodeKind::Embedded(embedded) = kind {
        let node = RichNode {
            kind,
            data,
            content,
        };
        let resolved = resolver.resolve(&EmbeddedRef::from_node(embedded, &node));
        return match resolved {
            Some(text) if embedded.is_block() => {
                RichNode::new(NodeKind::Paragraph, vec![RichNode::text(text, [])])
            }
            Some(text) => RichNode::text(text, []),
            None => {
                tracing::debug!(
                    node_type = embedded.wire_name(),
                    "embedded node left unresolved"
                );
                node
            }
        };
    }

    let content = content
        .into_iter()
        .map(|child| resolve_embedded(child, resolver))
        .collect();
    RichNode {
        kind,
        data,
        content,
    }
}

/// Normalizes, resolves embedded nodes through `resolver` and renders.
pub fn render_resolved<'a, R>(
    input: impl Into<RichTextInput<'a>>,
    resolver: &R,
    options: &RenderOptions,
) -> RenderOutput
where
    R: EmbeddedResolver + ?Sized,
{
    HtmlRenderer::new(options.clone())
        .render_transformed(input.into(), |tree| resolve_embedded(tree, resolver))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{Normalized, normalize};
    use serde_json::json;

    fn entry_link(kind: &str, id: &str) -> Value {
        json!({
            "nodeType": kind,
            "data": {"target": {"sys": {"id": id, "type": "Link", "linkType": "Entry"}}},
            "content": []
        })
    }

    fn sample() -> Value {
        json!({
            "nodeType": "document",
            "data": {},
            "content": [
                entry_link("embedded-entry-block", "hero"),
                {
                    "nodeType": "paragraph",
                    "data": {},
                    "content": [
                        {"nodeType": "text", "value": "See ", "marks": []},
                        entry_link("embedded-entry-inline", "author"),
                        entry_link("embedded-entry-inline", "hero")
                    ]
                },
                {
                    "nodeType": "embedded-asset-block",
                    "data": {"target": {"sys": {"id": "img", "linkType": "Asset"}}}
                }
            ]
        })
    }

    #[test]
    fn collects_unique_entry_ids_in_order() {
        let Normalized::Tree(tree) = normalize((&sample()).into()) else {
            panic!("expected tree");
        };
        assert_eq!(collect_embedded_entry_ids(&tree), vec!["hero", "author"]);
    }

    #[test]
    fn title_lookup_replaces_entries_and_keeps_assets() {
        let lookup = TitleLookup::new(HashMap::from([(
            "hero".to_string(),
            "Hero Banner".to_string(),
        )]));
        let output = render_resolved(&sample(), &lookup, &RenderOptions::default());
        assert_eq!(
            output.html,
            "<p>Hero Banner</p><p>See UntitledHero Banner</p>[Embedded content]"
        );
    }

    #[test]
    fn closures_work_as_resolvers() {
        let resolver = |embed: &EmbeddedRef<'_>| {
            (embed.link_type == Some("Asset"))
                .then(|| format!("asset:{}", embed.target_id.unwrap_or("?")))
        };
        let output = render_resolved(&sample(), &resolver, &RenderOptions::default());
        assert!(output.html.ends_with("<p>asset:img</p>"));
        assert!(output.html.starts_with("[Embedded content]"));
    }

    #[test]
    fn resolvers_see_raw_node_data() {
        let resolver = |embed: &EmbeddedRef<'_>| {
            embed
                .data
                .get("target")
                .and_then(|target| target.pointer("/sys/type"))
                .and_then(Value::as_str)
                .map(|sys_type| format!("{}:{sys_type}", embed.kind.wire_name()))
        };
        let output = render_resolved(&sample(), &resolver, &RenderOptions::default());
        assert_eq!(
            output.html,
            "<p>embedded-entry-block:Link</p>\
             <p>See embedded-entry-inline:Linkembedded-entry-inline:Link</p>\
             [Embedded content]"
        );
    }

    #[test]
    fn custom_fallback_title() {
        let lookup = TitleLookup::new(HashMap::new()).with_fallback("Missing");
        let tree = RichNode::document(vec![RichNode::new(
            NodeKind::Embedded(EmbeddedKind::EntryInline),
            Vec::new(),
        )]);
        let resolved = resolve_embedded(tree, &lookup);
        assert_eq!(resolved.content[0], RichNode::text("Missing", []));
    }
}
