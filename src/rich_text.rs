//! Rich text fields from the CMS.
//!
//! The CMS stores formatted copy as an array of blocks, each holding plain
//! text plus a list of spans that mark up ranges of it:
//!
//! ```json
//! [
//!   { "type": "heading2", "text": "Who we are", "spans": [] },
//!   { "type": "paragraph", "text": "We teach code.",
//!     "spans": [{ "start": 9, "end": 13, "type": "strong" }] }
//! ]
//! ```
//!
//! Span offsets count UTF-16 code units, matching the editor that produced
//! them. Some fields are authored as a plain string instead of blocks; those
//! are treated as markdown and rendered with pulldown-cmark. Raw HTML inside
//! markdown is escaped and shows up as text.
//!
//! Rendering never fails. Unknown block types render their text bare, unknown
//! span types leave their range unwrapped, and out-of-range offsets are
//! clamped to the text.

use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Event, Parser, html as md_html};
use serde::Deserialize;

/// A rich text field: CMS blocks or a markdown string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RichText {
    Blocks(Vec<Block>),
    Markdown(String),
}

impl Default for RichText {
    fn default() -> Self {
        RichText::Blocks(Vec::new())
    }
}

/// One block of a rich text field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Block {
    /// `heading1`..`heading6`, `paragraph`, `preformatted`, `list-item`,
    /// `o-list-item`, `image`, or `embed`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub spans: Vec<Span>,
    /// Image blocks only.
    #[serde(default)]
    pub url: Option<String>,
    /// Image blocks only.
    #[serde(default)]
    pub alt: Option<String>,
    /// Embed blocks only.
    #[serde(default)]
    pub oembed: Option<Embed>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Embed {
    #[serde(default)]
    pub embed_url: Option<String>,
    /// Provider markup, inserted as-is.
    #[serde(default)]
    pub html: Option<String>,
}

/// A formatted range of a block's text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    /// `strong`, `em`, `hyperlink`, or `label`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Option<SpanData>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpanData {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

impl RichText {
    /// True when the field holds no visible text or media.
    pub fn is_empty(&self) -> bool {
        match self {
            RichText::Blocks(blocks) => blocks
                .iter()
                .all(|b| b.text.trim().is_empty() && b.url.is_none() && b.oembed.is_none()),
            RichText::Markdown(s) => s.trim().is_empty(),
        }
    }

    /// Flatten to plain text: block texts joined by newlines.
    pub fn as_text(&self) -> String {
        match self {
            RichText::Blocks(blocks) => blocks
                .iter()
                .map(|b| b.text.as_str())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
            RichText::Markdown(s) => s.trim().to_string(),
        }
    }

    pub fn render(&self) -> Markup {
        match self {
            RichText::Blocks(blocks) => render_blocks(blocks),
            RichText::Markdown(s) => render_markdown(s),
        }
    }
}

/// Plain text of an optional field, empty when absent.
pub fn text_of(field: Option<&RichText>) -> String {
    field.map(RichText::as_text).unwrap_or_default()
}

fn render_markdown(source: &str) -> Markup {
    let parser = Parser::new(source).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    PreEscaped(body_html)
}

// ============================================================================
// Blocks
// ============================================================================

/// Consecutive list items share one list element.
enum Group<'a> {
    List { ordered: bool, items: Vec<&'a Block> },
    Single(&'a Block),
}

fn list_kind(block: &Block) -> Option<bool> {
    match block.kind.as_str() {
        "list-item" => Some(false),
        "o-list-item" => Some(true),
        _ => None,
    }
}

fn group_blocks(blocks: &[Block]) -> Vec<Group<'_>> {
    let mut groups: Vec<Group<'_>> = Vec::new();
    for block in blocks {
        let Some(kind) = list_kind(block) else {
            groups.push(Group::Single(block));
            continue;
        };
        if let Some(Group::List { ordered, items }) = groups.last_mut() {
            if *ordered == kind {
                items.push(block);
                continue;
            }
        }
        groups.push(Group::List {
            ordered: kind,
            items: vec![block],
        });
    }
    groups
}

fn render_blocks(blocks: &[Block]) -> Markup {
    html! {
        @for group in group_blocks(blocks) {
            @match group {
                Group::List { ordered: true, items } => {
                    ol {
                        @for item in items {
                            li { (render_spans(&item.text, &item.spans)) }
                        }
                    }
                }
                Group::List { ordered: false, items } => {
                    ul {
                        @for item in items {
                            li { (render_spans(&item.text, &item.spans)) }
                        }
                    }
                }
                Group::Single(block) => {
                    (render_block(block))
                }
            }
        }
    }
}

fn render_block(block: &Block) -> Markup {
    let inline = render_spans(&block.text, &block.spans);
    match block.kind.as_str() {
        "heading1" => html! { h1 { (inline) } },
        "heading2" => html! { h2 { (inline) } },
        "heading3" => html! { h3 { (inline) } },
        "heading4" => html! { h4 { (inline) } },
        "heading5" => html! { h5 { (inline) } },
        "heading6" => html! { h6 { (inline) } },
        "paragraph" => html! { p { (inline) } },
        "preformatted" => html! { pre { (inline) } },
        "image" => html! {
            @if let Some(url) = &block.url {
                p.block-img {
                    img src=(url) alt=(block.alt.as_deref().unwrap_or_default());
                }
            }
        },
        "embed" => html! {
            @if let Some(embed) = &block.oembed {
                div.embed data-oembed=[embed.embed_url.as_deref()] {
                    @if let Some(markup) = &embed.html {
                        (PreEscaped(markup))
                    }
                }
            }
        },
        _ => inline,
    }
}

// ============================================================================
// Spans
// ============================================================================

/// Convert a UTF-16 offset into a byte index on a char boundary, clamped.
fn utf16_to_byte(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for (idx, ch) in text.char_indices() {
        if units >= offset {
            return idx;
        }
        units += ch.len_utf16();
    }
    text.len()
}

/// Render text with its spans applied.
///
/// The text is cut at every span boundary and each piece is wrapped in the
/// spans covering it, in declaration order. Overlapping spans therefore
/// produce well-formed (if repetitive) markup.
fn render_spans(text: &str, spans: &[Span]) -> Markup {
    if spans.is_empty() {
        return html! { (text) };
    }

    let ranges: Vec<(usize, usize, &Span)> = spans
        .iter()
        .filter_map(|span| {
            let start = utf16_to_byte(text, span.start);
            let end = utf16_to_byte(text, span.end);
            (start < end).then_some((start, end, span))
        })
        .collect();

    let mut cuts = vec![0, text.len()];
    for (start, end, _) in &ranges {
        cuts.push(*start);
        cuts.push(*end);
    }
    cuts.sort_unstable();
    cuts.dedup();

    html! {
        @for pair in cuts.windows(2) {
            @let (from, to) = (pair[0], pair[1]);
            @let active: Vec<&Span> = ranges
                .iter()
                .filter(|(start, end, _)| *start <= from && to <= *end)
                .map(|(_, _, span)| *span)
                .collect();
            (wrap(&active, &text[from..to]))
        }
    }
}

fn wrap(spans: &[&Span], text: &str) -> Markup {
    let Some((outer, inner)) = spans.split_first() else {
        return html! { (text) };
    };
    let content = wrap(inner, text);
    let data = outer.data.as_ref();
    match outer.kind.as_str() {
        "strong" => html! { strong { (content) } },
        "em" => html! { em { (content) } },
        "hyperlink" => match data.and_then(|d| d.url.as_deref()) {
            Some(url) => html! {
                a href=(url) target=[data.and_then(|d| d.target.as_deref())] { (content) }
            },
            None => content,
        },
        "label" => html! {
            span class=[data.and_then(|d| d.label.as_deref())] { (content) }
        },
        _ => content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rich(value: serde_json::Value) -> RichText {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn plain_string_is_markdown() {
        let field = rich(json!("Hello **world**"));
        assert!(matches!(field, RichText::Markdown(_)));
        let html = field.render().into_string();
        assert!(html.contains("<strong>world</strong>"));
    }

    #[test]
    fn as_text_joins_blocks() {
        let field = rich(json!([
            { "type": "heading1", "text": "Title", "spans": [] },
            { "type": "paragraph", "text": "Body", "spans": [] }
        ]));
        assert_eq!(field.as_text(), "Title\nBody");
    }

    #[test]
    fn as_text_of_markdown_is_trimmed_source() {
        assert_eq!(rich(json!("  X \n")).as_text(), "X");
        assert_eq!(text_of(None), "");
    }

    #[test]
    fn headings_and_paragraphs() {
        let html = rich(json!([
            { "type": "heading2", "text": "Who", "spans": [] },
            { "type": "paragraph", "text": "We teach.", "spans": [] }
        ]))
        .render()
        .into_string();
        assert_eq!(html, "<h2>Who</h2><p>We teach.</p>");
    }

    #[test]
    fn consecutive_list_items_are_grouped() {
        let html = rich(json!([
            { "type": "list-item", "text": "a", "spans": [] },
            { "type": "list-item", "text": "b", "spans": [] },
            { "type": "o-list-item", "text": "c", "spans": [] },
            { "type": "paragraph", "text": "d", "spans": [] },
            { "type": "list-item", "text": "e", "spans": [] }
        ]))
        .render()
        .into_string();
        assert_eq!(
            html,
            "<ul><li>a</li><li>b</li></ul><ol><li>c</li></ol><p>d</p><ul><li>e</li></ul>"
        );
    }

    #[test]
    fn strong_span_wraps_range() {
        let html = rich(json!([{
            "type": "paragraph",
            "text": "We teach code.",
            "spans": [{ "start": 9, "end": 13, "type": "strong" }]
        }]))
        .render()
        .into_string();
        assert_eq!(html, "<p>We teach <strong>code</strong>.</p>");
    }

    #[test]
    fn hyperlink_span_uses_url() {
        let html = rich(json!([{
            "type": "paragraph",
            "text": "GitHub",
            "spans": [{
                "start": 0, "end": 6, "type": "hyperlink",
                "data": { "link_type": "Web", "url": "https://github.com/x", "target": "_blank" }
            }]
        }]))
        .render()
        .into_string();
        assert_eq!(
            html,
            r#"<p><a href="https://github.com/x" target="_blank">GitHub</a></p>"#
        );
    }

    #[test]
    fn hyperlink_without_url_is_unwrapped() {
        let html = rich(json!([{
            "type": "paragraph",
            "text": "dead",
            "spans": [{ "start": 0, "end": 4, "type": "hyperlink", "data": {} }]
        }]))
        .render()
        .into_string();
        assert_eq!(html, "<p>dead</p>");
    }

    #[test]
    fn overlapping_spans_stay_well_formed() {
        let html = rich(json!([{
            "type": "paragraph",
            "text": "abcd",
            "spans": [
                { "start": 0, "end": 3, "type": "strong" },
                { "start": 2, "end": 4, "type": "em" }
            ]
        }]))
        .render()
        .into_string();
        assert_eq!(
            html,
            "<p><strong>ab</strong><strong><em>c</em></strong><em>d</em></p>"
        );
    }

    #[test]
    fn span_offsets_count_utf16_units() {
        // The emoji is two UTF-16 units and four UTF-8 bytes.
        let html = rich(json!([{
            "type": "paragraph",
            "text": "🚀 go",
            "spans": [{ "start": 3, "end": 5, "type": "em" }]
        }]))
        .render()
        .into_string();
        assert_eq!(html, "<p>🚀 <em>go</em></p>");
    }

    #[test]
    fn out_of_range_spans_are_clamped() {
        let html = rich(json!([{
            "type": "paragraph",
            "text": "short",
            "spans": [{ "start": 2, "end": 99, "type": "strong" }]
        }]))
        .render()
        .into_string();
        assert_eq!(html, "<p>sh<strong>ort</strong></p>");
    }

    #[test]
    fn text_is_escaped() {
        let html = rich(json!([
            { "type": "paragraph", "text": "<script>alert(1)</script>", "spans": [] }
        ]))
        .render()
        .into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn markdown_raw_html_is_escaped() {
        let html = RichText::Markdown("<script>alert(1)</script>".into())
            .render()
            .into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));

        let html = RichText::Markdown("Say <b>hi</b> **now**".into())
            .render()
            .into_string();
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
        assert!(html.contains("<strong>now</strong>"));
    }

    #[test]
    fn image_block_renders_img() {
        let html = rich(json!([
            { "type": "image", "url": "https://cdn.example/a.png", "alt": "A" }
        ]))
        .render()
        .into_string();
        assert!(html.contains(r#"<img src="https://cdn.example/a.png" alt="A">"#));
    }

    #[test]
    fn unknown_block_type_renders_text() {
        let html = rich(json!([{ "type": "mystery", "text": "still here", "spans": [] }]))
            .render()
            .into_string();
        assert_eq!(html, "still here");
    }

    #[test]
    fn is_empty_detects_blank_fields() {
        assert!(RichText::default().is_empty());
        assert!(rich(json!([{ "type": "paragraph", "text": "  ", "spans": [] }])).is_empty());
        assert!(!rich(json!("x")).is_empty());
    }
}
