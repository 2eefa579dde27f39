use crate::{
    config::RenderOptions,
    context::RenderContext,
    errors::RenderError,
    node::{NodeKind, RichNode},
    normalize::{Normalized, RichTextInput, normalize_with},
    output::RenderOutput,
};

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Trait describing a renderer that turns a rich text field value into markup.
pub trait DocumentRenderer {
    fn render_output(&self, input: RichTextInput<'_>) -> RenderOutput;

    /// Markup only, warnings dropped.
    fn render_html(&self, input: RichTextInput<'_>) -> String {
        self.render_output(input).html
    }
}

/// Renders normalized rich text documents to an HTML fragment.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl DocumentRenderer for HtmlRenderer {
    fn render_output(&self, input: RichTextInput<'_>) -> RenderOutput {
        self.render_transformed(input, |tree| tree)
    }
}

impl HtmlRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Normalizes `input`, lets `transform` rewrite the tree, then renders it.
    pub fn render_transformed(
        &self,
        input: RichTextInput<'_>,
        transform: impl FnOnce(RichNode) -> RichNode,
    ) -> RenderOutput {
        let mut ctx = RenderContext::new(self.options.max_depth);
        let html = match normalize_with(input, &mut ctx) {
            Normalized::Empty => String::new(),
            Normalized::Opaque(text) => text,
            Normalized::Tree(tree) => {
                let tree = transform(tree);
                let mut out = String::new();
                self.write_node(&tree, &mut ctx, &mut out);
                out
            }
        };
        RenderOutput {
            html,
            warnings: ctx.into_warnings(),
        }
    }

    /// Renders an already normalized tree.
    pub fn render_tree(&self, tree: &RichNode) -> RenderOutput {
        let mut ctx = RenderContext::new(self.options.max_depth);
        let mut out = String::new();
        self.write_node(tree, &mut ctx, &mut out);
        RenderOutput {
            html: out,
            warnings: ctx.into_warnings(),
        }
    }

    fn write_node(&self, node: &RichNode, ctx: &mut RenderContext, out: &mut String) {
        if ctx.depth() > ctx.max_depth() {
            ctx.record(RenderError::DepthExceeded(ctx.max_depth()));
            return;
        }
        match &node.kind {
            NodeKind::Document => {
                for (index, child) in node.content.iter().enumerate() {
                    ctx.child(index, |ctx| {
                        if !child.kind.is_block() {
                            ctx.record(RenderError::InlineAtDocumentRoot(child.kind.label()));
                        }
                        self.write_node(child, ctx, out);
                    });
                }
            }
            NodeKind::Paragraph => self.write_element("p", node, ctx, out),
            NodeKind::Heading(level) => {
                let tag = HEADING_TAGS
                    .get(usize::from(*level).saturating_sub(1))
                    .copied()
                    .unwrap_or("h6");
                self.write_element(tag, node, ctx, out);
            }
            NodeKind::UnorderedList => self.write_element("ul", node, ctx, out),
            NodeKind::OrderedList => self.write_element("ol", node, ctx, out),
            NodeKind::ListItem => self.write_element("li", node, ctx, out),
            NodeKind::Blockquote => self.write_element("blockquote", node, ctx, out),
            NodeKind::Hr => out.push_str("<hr>"),
            NodeKind::Hyperlink => self.write_link(node, ctx, out),
            NodeKind::Text { value, marks } => {
                for mark in marks {
                    out.push('<');
                    out.push_str(mark.tag());
                    out.push('>');
                }
                out.push_str(&self.options.escape.apply(value));
                for mark in marks.iter().rev() {
                    out.push_str("</");
                    out.push_str(mark.tag());
                    out.push('>');
                }
            }
            NodeKind::Embedded(_) => out.push_str(&self.options.embedded_placeholder),
            NodeKind::Unknown(name) => {
                tracing::warn!(node_type = %name, "unhandled rich text node type");
                ctx.record(RenderError::UnknownNodeKind(name.clone()));
            }
            NodeKind::Malformed(raw) => {
                let dump = serde_json::to_string(raw).unwrap_or_default();
                out.push_str(&self.options.escape.apply(&dump));
            }
        }
    }

    fn write_element(
        &self,
        tag: &str,
        node: &RichNode,
        ctx: &mut RenderContext,
        out: &mut String,
    ) {
        out.push('<');
        out.push_str(tag);
        out.push('>');
        self.write_children(node, ctx, out);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }

    fn write_link(&self, node: &RichNode, ctx: &mut RenderContext, out: &mut String) {
        let href = node.data_str("uri").unwrap_or("#");
        out.push_str("<a href=\"");
        out.push_str(&self.options.escape.apply(href));
        out.push('"');
        if let Some(title) = node.data_str("title") {
            out.push_str(" title=\"");
            out.push_str(&self.options.escape.apply(title));
            out.push('"');
        }
        out.push('>');
        self.write_children(node, ctx, out);
        out.push_str("</a>");
    }

    fn write_children(&self, node: &RichNode, ctx: &mut RenderContext, out: &mut String) {
        for (index, child) in node.content.iter().enumerate() {
            ctx.child(index, |ctx| self.write_node(child, ctx, out));
        }
    }
}

/// Renders any supported field value to HTML with default options.
///
/// Never fails: unparseable strings come back unchanged, unknown nodes render as
/// nothing and malformed nodes as their JSON text.
pub fn render<'a>(input: impl Into<RichTextInput<'a>>) -> String {
    HtmlRenderer::default().render_html(input.into())
}

/// Same as [`render`] but with explicit options and the collected warnings.
pub fn render_with_diagnostics<'a>(
    input: impl Into<RichTextInput<'a>>,
    options: &RenderOptions,
) -> RenderOutput {
    HtmlRenderer::new(options.clone()).render_output(input.into())
}
