use rich_text_html::{
    RenderOptions, RichTextInput, WarningCode, render, render_with_diagnostics,
};
use serde_json::{Value, json};

fn text(value: &str, marks: &[&str]) -> Value {
    let marks: Vec<Value> = marks.iter().map(|mark| json!({ "type": mark })).collect();
    json!({"nodeType": "text", "value": value, "marks": marks, "data": {}})
}

fn block(node_type: &str, content: Vec<Value>) -> Value {
    json!({"nodeType": node_type, "data": {}, "content": content})
}

fn document(content: Vec<Value>) -> Value {
    block("document", content)
}

#[test]
fn plain_text_passes_through() {
    assert_eq!(render("hello"), "hello");
}

#[test]
fn existing_html_passes_through() {
    assert_eq!(render("<p>hi</p>"), "<p>hi</p>");
}

#[test]
fn single_paragraph_document() {
    let doc = document(vec![block("paragraph", vec![text("Hi", &[])])]);
    assert_eq!(render(&doc), "<p>Hi</p>");
}

#[test]
fn mark_order_ignores_source_order() {
    let italic_first = text("Hi", &["italic", "bold"]);
    let bold_first = text("Hi", &["bold", "italic"]);
    assert_eq!(render(&italic_first), "<strong><em>Hi</em></strong>");
    assert_eq!(render(&bold_first), render(&italic_first));
}

#[test]
fn strikethrough_spellings_unify() {
    for spelling in ["strike", "strike-through", "strikethrough"] {
        assert_eq!(render(&text("x", &[spelling])), "<strike>x</strike>");
    }
}

#[test]
fn implicit_document_matches_explicit() {
    let content = vec![
        block("heading-1", vec![text("Title", &[])]),
        block("paragraph", vec![text("Body", &["underline"])]),
    ];
    let implicit = json!({"data": {}, "content": content.clone()});
    let explicit = document(content);
    assert_eq!(render(&implicit), render(&explicit));
    assert_eq!(render(&explicit), "<h1>Title</h1><p><u>Body</u></p>");
}

#[test]
fn unknown_kind_renders_nothing_and_siblings_survive() {
    let doc = document(vec![
        block("paragraph", vec![text("before", &[])]),
        json!({"nodeType": "bogus-type"}),
        block("paragraph", vec![text("after", &[])]),
    ]);
    let output = render_with_diagnostics(&doc, &RenderOptions::default());
    assert_eq!(output.html, "<p>before</p><p>after</p>");
    let unknown: Vec<_> = output.warnings_with(WarningCode::UnknownNodeKind).collect();
    assert_eq!(unknown.len(), 1);
    assert_eq!(unknown[0].path.as_deref(), Some("/content/1"));
}

#[test]
fn embedded_kinds_render_placeholder() {
    for kind in [
        "embedded-entry-block",
        "embedded-asset-block",
        "embedded-entry-inline",
        "embedded-asset-inline",
    ] {
        let node = json!({
            "nodeType": kind,
            "data": {"target": {"sys": {"id": "abc", "type": "Link"}}},
            "content": [text("ignored", &[])]
        });
        assert_eq!(render(&node), "[Embedded content]");
    }
}

#[test]
fn null_and_missing_render_empty() {
    assert_eq!(render(&Value::Null), "");
    assert_eq!(render(RichTextInput::Missing), "");
    assert_eq!(render(None::<&Value>), "");
}

#[test]
fn stringified_nested_document() {
    let inner = document(vec![block("paragraph", vec![text("Nested", &["code"])])]);
    let outer = json!({"content": inner.to_string()}).to_string();
    assert_eq!(render(outer.as_str()), "<p><code>Nested</code></p>");
}

#[test]
fn lists_links_quotes_and_rules() {
    let doc = document(vec![
        block(
            "unordered-list",
            vec![
                block("list-item", vec![block("paragraph", vec![text("one", &[])])]),
                block(
                    "list-item",
                    vec![block(
                        "ordered-list",
                        vec![block("list-item", vec![text("nested", &[])])],
                    )],
                ),
            ],
        ),
        block("blockquote", vec![block("paragraph", vec![text("quoted", &["superscript"])])]),
        json!({"nodeType": "hr", "data": {}, "content": []}),
        block(
            "paragraph",
            vec![
                json!({
                    "nodeType": "hyperlink",
                    "data": {"uri": "https://example.com", "title": "Example"},
                    "content": [text("titled", &[])]
                }),
                json!({
                    "nodeType": "hyperlink",
                    "data": {},
                    "content": [text("bare", &["subscript"])]
                }),
            ],
        ),
    ]);
    assert_eq!(
        render(&doc),
        concat!(
            "<ul><li><p>one</p></li><li><ol><li>nested</li></ol></li></ul>",
            "<blockquote><p><sup>quoted</sup></p></blockquote>",
            "<hr>",
            "<p><a href=\"https://example.com\" title=\"Example\">titled</a>",
            "<a href=\"#\"><sub>bare</sub></a></p>"
        )
    );
}

#[test]
fn all_heading_levels() {
    let doc = document(
        (1..=6)
            .map(|level| block(&format!("heading-{level}"), vec![text("h", &[])]))
            .collect(),
    );
    assert_eq!(
        render(&doc),
        "<h1>h</h1><h2>h</h2><h3>h</h3><h4>h</h4><h5>h</h5><h6>h</h6>"
    );
}

#[test]
fn text_is_not_escaped_by_default() {
    let doc = document(vec![block("paragraph", vec![text("<b>a & b</b>", &[])])]);
    assert_eq!(render(&doc), "<p><b>a & b</b></p>");
}

#[test]
fn escape_mode_escapes_text_and_attributes() {
    let doc = document(vec![block(
        "paragraph",
        vec![json!({
            "nodeType": "hyperlink",
            "data": {"uri": "https://x.test/?a=1&b=2", "title": "say \"hi\""},
            "content": [text("<tag>", &["bold"])]
        })],
    )]);
    let output = render_with_diagnostics(&doc, &RenderOptions::escaped());
    assert_eq!(
        output.html,
        "<p><a href=\"https://x.test/?a=1&amp;b=2\" title=\"say &quot;hi&quot;\"><strong>&lt;tag&gt;</strong></a></p>"
    );
}

#[test]
fn malformed_nodes_fall_back_to_json() {
    let doc = document(vec![
        json!({"nodeType": "paragraph", "content": "not-a-list"}),
        block("paragraph", vec![text("fine", &[])]),
    ]);
    let output = render_with_diagnostics(&doc, &RenderOptions::default());
    assert_eq!(
        output.html,
        "{\"nodeType\":\"paragraph\",\"content\":\"not-a-list\"}<p>fine</p>"
    );
    assert_eq!(
        output.warnings_with(WarningCode::ConversionError).count(),
        1
    );
}

#[test]
fn unknown_marks_are_ignored_with_warning() {
    let output = render_with_diagnostics(&text("x", &["blink", "bold"]), &RenderOptions::default());
    assert_eq!(output.html, "<strong>x</strong>");
    assert_eq!(output.warnings[0].code, WarningCode::UnknownMark);
}

#[test]
fn depth_limit_drops_deep_nodes() {
    let mut node = text("deep", &[]);
    for _ in 0..5 {
        node = block("blockquote", vec![node]);
    }
    let doc = document(vec![node]);

    let shallow = render_with_diagnostics(&doc, &RenderOptions::default().with_max_depth(3));
    assert_eq!(
        shallow.html,
        "<blockquote><blockquote><blockquote></blockquote></blockquote></blockquote>"
    );
    assert_eq!(shallow.warnings_with(WarningCode::DepthExceeded).count(), 1);

    let full = render_with_diagnostics(&doc, &RenderOptions::default());
    assert!(full.html.contains("deep"));
    assert!(!full.has_warnings());
}

#[test]
fn scalars_render_as_json_text() {
    let output = render_with_diagnostics(&json!(42), &RenderOptions::default());
    assert_eq!(output.html, "42");
    assert_eq!(output.warnings[0].code, WarningCode::UnsupportedInput);
}

#[test]
fn falsy_scalars_render_empty() {
    for value in [json!(false), json!(0), json!("")] {
        let output = render_with_diagnostics(&value, &RenderOptions::default());
        assert_eq!(output.html, "", "{value}");
        assert!(!output.has_warnings(), "{value}");
    }
}

#[test]
fn json_encoded_string_is_unwrapped() {
    assert_eq!(render("\"quoted\""), "quoted");
    assert_eq!(render(&json!("\"quoted\"")), "quoted");
}

#[test]
fn missing_text_value_renders_empty() {
    let node = json!({"nodeType": "paragraph", "content": [{"nodeType": "text", "marks": [{"type": "bold"}]}]});
    assert_eq!(render(&node), "<p><strong></strong></p>");
}
