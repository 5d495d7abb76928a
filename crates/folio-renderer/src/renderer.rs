//! Generic markdown renderer with pluggable backend.

use std::borrow::Cow;
use std::fmt::Write;
use std::marker::PhantomData;

use folio_sections::{IdGenerator, slugify};

use crate::ast::{Block, Inline};
use crate::backend::RenderBackend;
use crate::block::parse_blocks_with_warnings;
use crate::html::HtmlBackend;
use crate::util::{escape_html, escape_text, is_safe_url};

/// Result of rendering markdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Constructs that were left as text (unterminated fences, unknown
    /// admonition tags).
    pub warnings: Vec<String>,
}

/// Generic markdown renderer with pluggable backend.
///
/// Parses the body into [`Block`]s, then walks the tree writing paragraphs,
/// lists and inline formatting itself and delegating the rest to `B`.
/// Top-level blocks are separated by a newline.
///
/// By default source text is trusted: text, code and raw HTML lines pass
/// through unescaped. Enable [`with_escape_html`](Self::with_escape_html) for
/// untrusted input.
pub struct MarkdownRenderer<B: RenderBackend> {
    escape_html: bool,
    dedupe_ids: bool,
    base_path: Option<String>,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a renderer for trusted input.
    #[must_use]
    pub fn new() -> Self {
        Self {
            escape_html: false,
            dedupe_ids: false,
            base_path: None,
            _backend: PhantomData,
        }
    }

    /// Escape text, code, attribute values and raw HTML lines, and replace
    /// link and image URLs with unsafe schemes by `#`.
    #[must_use]
    pub fn with_escape_html(mut self, enabled: bool) -> Self {
        self.escape_html = enabled;
        self
    }

    /// Suffix repeated heading ids (`faq`, `faq-1`, ...).
    ///
    /// Matches `SectionOptions::dedupe_ids` in `folio-sections`, so anchors
    /// and section ids stay in agreement when both are enabled.
    #[must_use]
    pub fn with_dedupe_ids(mut self, enabled: bool) -> Self {
        self.dedupe_ids = enabled;
        self
    }

    /// Set base path for resolving relative `.md` links.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Render a document body.
    ///
    /// Never fails: unrecognized constructs are emitted as text and reported
    /// in [`RenderResult::warnings`].
    pub fn render(&self, body: &str) -> RenderResult {
        let (blocks, warnings) = parse_blocks_with_warnings(body);
        for warning in &warnings {
            tracing::warn!(%warning, "Markdown construct rendered as text");
        }

        let html = self.render_blocks(&blocks);
        tracing::debug!(
            blocks = blocks.len(),
            bytes = html.len(),
            "Rendered markdown"
        );

        RenderResult { html, warnings }
    }

    /// Serialize already-parsed blocks.
    #[must_use]
    pub fn render_blocks(&self, blocks: &[Block]) -> String {
        let mut out = String::with_capacity(4096);
        let mut writer = Writer {
            renderer: self,
            ids: self.dedupe_ids.then(IdGenerator::new),
            depth: 0,
        };
        writer.blocks(blocks, &mut out);
        out
    }

    fn text<'s>(&self, s: &'s str) -> Cow<'s, str> {
        if self.escape_html {
            escape_text(s)
        } else {
            Cow::Borrowed(s)
        }
    }

    fn attr<'s>(&self, s: &'s str) -> Cow<'s, str> {
        if self.escape_html {
            escape_html(s)
        } else {
            Cow::Borrowed(s)
        }
    }

    /// Attribute value for a link or image URL.
    fn url<'s>(&self, s: &'s str) -> Cow<'s, str> {
        if self.escape_html && !is_safe_url(s) {
            tracing::debug!(url = s, "Dropped unsafe URL");
            return Cow::Borrowed("#");
        }
        self.attr(s)
    }
}

/// Per-call serialization state.
struct Writer<'r, B: RenderBackend> {
    renderer: &'r MarkdownRenderer<B>,
    ids: Option<IdGenerator>,
    /// Nesting depth inside quotes and admonitions.
    depth: usize,
}

impl<B: RenderBackend> Writer<'_, B> {
    fn blocks(&mut self, blocks: &[Block], out: &mut String) {
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            self.block(block, out);
        }
    }

    fn nested(&mut self, blocks: &[Block], out: &mut String) {
        self.depth += 1;
        self.blocks(blocks, out);
        self.depth -= 1;
    }

    fn block(&mut self, block: &Block, out: &mut String) {
        match block {
            Block::Heading {
                level,
                text,
                content,
            } => {
                let slug = slugify(text);
                // Quoted headings are not sections, so they don't consume ids.
                let id = match &mut self.ids {
                    Some(ids) if self.depth == 0 => ids.unique(slug),
                    _ => slug,
                };
                let mut inner = String::new();
                self.inlines(content, &mut inner);
                B::heading(*level, &id, &inner, out);
            }
            Block::Paragraph(content) => {
                out.push_str("<p>");
                self.inlines(content, out);
                out.push_str("</p>");
            }
            Block::CodeBlock { language, code } => {
                let lang = language.as_deref().map(|l| self.renderer.attr(l));
                B::code_block(lang.as_deref(), &self.renderer.text(code), out);
            }
            Block::List { start, items } => {
                let close = match start {
                    None => {
                        out.push_str("<ul>");
                        "</ul>"
                    }
                    Some(1) => {
                        out.push_str("<ol>");
                        "</ol>"
                    }
                    Some(n) => {
                        write!(out, r#"<ol start="{n}">"#).unwrap();
                        "</ol>"
                    }
                };
                for item in items {
                    out.push_str("<li>");
                    self.inlines(item, out);
                    out.push_str("</li>");
                }
                out.push_str(close);
            }
            Block::Admonition { kind, children } => {
                B::admonition_start(*kind, out);
                self.nested(children, out);
                B::admonition_end(*kind, out);
            }
            Block::BlockQuote(children) => {
                B::blockquote_start(out);
                self.nested(children, out);
                B::blockquote_end(out);
            }
            Block::Html(line) => {
                if self.renderer.escape_html {
                    write!(out, "<p>{}</p>", escape_text(line.trim())).unwrap();
                } else {
                    out.push_str(line);
                }
            }
            Block::Rule => B::horizontal_rule(out),
        }
    }

    fn inlines(&self, nodes: &[Inline], out: &mut String) {
        for node in nodes {
            self.inline(node, out);
        }
    }

    fn inline(&self, node: &Inline, out: &mut String) {
        match node {
            Inline::Text(text) => out.push_str(&self.renderer.text(text)),
            Inline::Code(code) => {
                write!(out, "<code>{}</code>", self.renderer.text(code)).unwrap();
            }
            Inline::Strong(children) => {
                out.push_str("<strong>");
                self.inlines(children, out);
                out.push_str("</strong>");
            }
            Inline::Emphasis(children) => {
                out.push_str("<em>");
                self.inlines(children, out);
                out.push_str("</em>");
            }
            Inline::Link { href, children } => {
                let href = B::transform_link(href, self.renderer.base_path.as_deref());
                write!(out, r#"<a href="{}">"#, self.renderer.url(&href)).unwrap();
                self.inlines(children, out);
                out.push_str("</a>");
            }
            Inline::Image { src, alt } => {
                B::image(&self.renderer.url(src), &self.renderer.attr(alt), out);
            }
        }
    }
}

/// Render a document body to HTML with default (trusted) settings.
///
/// # Example
///
/// ```
/// use folio_renderer::render_to_html;
///
/// let html = render_to_html("# Hi\n**bold** and *italic*");
/// assert_eq!(
///     html,
///     "<h1 id=\"hi\">Hi</h1>\n<p><strong>bold</strong> and <em>italic</em></p>"
/// );
/// ```
pub fn render_to_html(body: &str) -> String {
    MarkdownRenderer::<HtmlBackend>::new().render(body).html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(body: &str) -> String {
        render_to_html(body)
    }

    #[test]
    fn test_emphasis_once_each() {
        let html = render("**bold** and *italic*");
        assert_eq!(html.matches("<strong>bold</strong>").count(), 1);
        assert_eq!(html.matches("<em>italic</em>").count(), 1);
    }

    #[test]
    fn test_rerender_does_not_rewrap() {
        let once = render("**bold** and *italic*");
        assert_eq!(render(&once), once);
    }

    #[test]
    fn test_list_is_single_container() {
        let html = render("* one\n* two\n* three");
        assert_eq!(html, "<ul><li>one</li><li>two</li><li>three</li></ul>");
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 3);
    }

    #[test]
    fn test_ordered_list_start() {
        assert_eq!(render("1. a\n2. b"), "<ol><li>a</li><li>b</li></ol>");
        assert_eq!(render("4. d"), r#"<ol start="4"><li>d</li></ol>"#);
    }

    #[test]
    fn test_image_without_link() {
        let html = render("![alt](img.png)");
        assert_eq!(html, r#"<p><img src="img.png" alt="alt"></p>"#);
        assert!(!html.contains("<a"));
    }

    #[test]
    fn test_admonition_variants_distinct() {
        let warning = render("> [!WARNING]\n> text");
        assert!(warning.contains(r#"class="admonition note-warning""#));
        assert!(warning.contains("<p>text</p>"));
        assert!(!warning.contains("note-info"));
        assert!(!warning.contains("note-tip"));

        assert!(render("> [!NOTE]\n> text").contains("note-info"));
        assert!(render("> [!TIP]\n> text").contains("note-tip"));
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render("See [here](http://x)."),
            r#"<p>See <a href="http://x">here</a>.</p>"#
        );
    }

    #[test]
    fn test_heading_ids() {
        assert_eq!(
            render("# Getting Started\n## What's New?"),
            "<h1 id=\"getting-started\">Getting Started</h1>\n<h2 id=\"whats-new\">What's New?</h2>"
        );
    }

    #[test]
    fn test_duplicate_heading_ids_kept_by_default() {
        let html = render("## FAQ\n## FAQ");
        assert_eq!(html.matches(r#"id="faq""#).count(), 2);
    }

    #[test]
    fn test_duplicate_heading_ids_deduped() {
        let html = MarkdownRenderer::<HtmlBackend>::new()
            .with_dedupe_ids(true)
            .render("## FAQ\n## FAQ\n## FAQ")
            .html;
        assert!(html.contains(r#"id="faq""#));
        assert!(html.contains(r#"id="faq-1""#));
        assert!(html.contains(r#"id="faq-2""#));
    }

    #[test]
    fn test_code_block_is_verbatim() {
        assert_eq!(
            render("```html\n<b>x</b> & y\n```"),
            r#"<pre><code class="language-html"><b>x</b> & y</code></pre>"#
        );
    }

    #[test]
    fn test_inline_code_is_verbatim() {
        assert_eq!(render("use `<br>` here"), "<p>use <code><br></code> here</p>");
    }

    #[test]
    fn test_escape_mode_escapes_code() {
        let renderer = MarkdownRenderer::<HtmlBackend>::new().with_escape_html(true);
        assert_eq!(
            renderer.render("```html\n<b>x</b>\n```").html,
            r#"<pre><code class="language-html">&lt;b&gt;x&lt;/b&gt;</code></pre>"#
        );
        assert_eq!(
            renderer.render("use `<br>` here").html,
            "<p>use <code>&lt;br&gt;</code> here</p>"
        );
    }

    #[test]
    fn test_escape_mode_drops_unsafe_urls() {
        let renderer = MarkdownRenderer::<HtmlBackend>::new().with_escape_html(true);
        let html = renderer
            .render("[click](javascript:alert(document.cookie))\n![x](data:image/svg+xml,y)")
            .html;
        assert!(!html.contains("javascript:"), "{html}");
        assert!(!html.contains("data:"), "{html}");
        assert!(html.contains(r##"<a href="#">click</a>"##), "{html}");
        assert!(html.contains(r##"<img src="#" alt="x">"##), "{html}");

        let html = renderer.render("[ok](https://x.dev) [mail](mailto:a@x.dev)").html;
        assert_eq!(
            html,
            r#"<p><a href="https://x.dev">ok</a> <a href="mailto:a@x.dev">mail</a></p>"#
        );
    }

    #[test]
    fn test_trusted_mode_keeps_urls() {
        assert_eq!(
            render("[run](javascript:go)"),
            r#"<p><a href="javascript:go">run</a></p>"#
        );
    }

    #[test]
    fn test_deep_quote_renders() {
        let html = render(&(">".repeat(100_000) + " x"));
        assert_eq!(html.matches("<blockquote>").count(), crate::MAX_QUOTE_DEPTH);
        assert!(html.ends_with(&format!("x</p>{}", "</blockquote>".repeat(crate::MAX_QUOTE_DEPTH))));
    }

    #[test]
    fn test_admonition_body_ends_at_next_quote_line() {
        assert_eq!(
            render("> [!NOTE]\n> first\n> second"),
            r#"<div class="admonition note-info"><div class="admonition-title">Note</div><div class="admonition-content"><p>first</p></div></div>
<blockquote><p>second</p></blockquote>"#
        );
    }

    #[test]
    fn test_unterminated_fence_warns() {
        let result = MarkdownRenderer::<HtmlBackend>::new().render("```\ncode");
        assert_eq!(result.html, "<p>```</p>\n<p>code</p>");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_raw_html_passes_through_by_default() {
        assert_eq!(
            render("<div class=\"cta\">Buy</div>\n<script>x()</script>"),
            "<div class=\"cta\">Buy</div>\n<p><script>x()</script></p>"
        );
    }

    #[test]
    fn test_escape_mode() {
        let html = MarkdownRenderer::<HtmlBackend>::new()
            .with_escape_html(true)
            .render("<div>hi</div>\n<script>x()</script> & [a](\"x\")")
            .html;
        assert_eq!(
            html,
            "<p>&lt;div&gt;hi&lt;/div&gt;</p>\n<p>&lt;script&gt;x()&lt;/script&gt; &amp; <a href=\"&quot;x&quot;\">a</a></p>"
        );
    }

    #[test]
    fn test_escape_mode_image_attributes() {
        let html = MarkdownRenderer::<HtmlBackend>::new()
            .with_escape_html(true)
            .render(r#"![a "b"](x.png)"#)
            .html;
        assert_eq!(html, r#"<p><img src="x.png" alt="a &quot;b&quot;"></p>"#);
    }

    #[test]
    fn test_base_path_links() {
        let html = MarkdownRenderer::<HtmlBackend>::new()
            .with_base_path("/blog")
            .render("[next](./part-2.md) [ext](https://x.dev)")
            .html;
        assert_eq!(
            html,
            r#"<p><a href="/blog/part-2">next</a> <a href="https://x.dev">ext</a></p>"#
        );
    }

    #[test]
    fn test_blockquote_and_rule() {
        assert_eq!(
            render("> quoted\n\n---"),
            "<blockquote><p>quoted</p></blockquote>\n<hr>"
        );
    }

    #[test]
    fn test_admonition_markup() {
        assert_eq!(
            render("> [!TIP]\n> Use **cargo**"),
            r#"<div class="admonition note-tip"><div class="admonition-title">Tip</div><div class="admonition-content"><p>Use <strong>cargo</strong></p></div></div>"#
        );
    }

    #[test]
    fn test_empty_body() {
        let result = MarkdownRenderer::<HtmlBackend>::default().render("");
        assert_eq!(result, RenderResult::default());
    }
}
