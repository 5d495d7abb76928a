//! Render backend trait for format-specific output.

use std::borrow::Cow;

use crate::ast::AdmonitionKind;

/// Backend for format-specific rendering.
///
/// Paragraphs, lists and inline formatting are written by
/// [`MarkdownRenderer`](crate::MarkdownRenderer) itself. Elements whose markup
/// differs between targets are delegated here.
///
/// Arguments arrive already prepared for the output: the renderer escapes
/// text, code and attributes when escape mode is on, so backends write them
/// as-is.
pub trait RenderBackend {
    /// Write a heading with its anchor id and rendered inner markup.
    fn heading(level: u8, id: &str, inner: &str, out: &mut String);

    /// Write a fenced code block. `content` is the source text, escaped
    /// only in escape mode.
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Open a plain blockquote.
    fn blockquote_start(out: &mut String);

    /// Close a plain blockquote.
    fn blockquote_end(out: &mut String);

    /// Open an admonition container.
    fn admonition_start(kind: AdmonitionKind, out: &mut String);

    /// Close an admonition container.
    fn admonition_end(kind: AdmonitionKind, out: &mut String);

    /// Write an image element.
    fn image(src: &str, alt: &str, out: &mut String);

    /// Transform a link URL (e.g. resolve relative `.md` paths).
    fn transform_link<'a>(url: &'a str, base_path: Option<&str>) -> Cow<'a, str>;

    /// Write a horizontal rule.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }
}
