//! HTML backend for markdown rendering.

use std::borrow::Cow;
use std::fmt::Write;

use crate::ast::AdmonitionKind;
use crate::backend::RenderBackend;

/// HTML render backend.
///
/// Produces:
/// - `<hN id="...">` headings
/// - `<pre><code class="language-...">` for code blocks
/// - `<div class="admonition note-...">` callouts
/// - `<img>` for images
/// - Post-relative `.md` link resolution
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn heading(level: u8, id: &str, inner: &str, out: &mut String) {
        write!(out, r#"<h{level} id="{id}">{inner}</h{level}>"#).unwrap();
    }

    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        if let Some(lang) = lang {
            write!(
                out,
                r#"<pre><code class="language-{lang}">{content}</code></pre>"#
            )
            .unwrap();
        } else {
            write!(out, "<pre><code>{content}</code></pre>").unwrap();
        }
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn admonition_start(kind: AdmonitionKind, out: &mut String) {
        write!(
            out,
            r#"<div class="admonition {}"><div class="admonition-title">{}</div><div class="admonition-content">"#,
            kind.css_class(),
            kind.label()
        )
        .unwrap();
    }

    fn admonition_end(_kind: AdmonitionKind, out: &mut String) {
        out.push_str("</div></div>");
    }

    fn image(src: &str, alt: &str, out: &mut String) {
        write!(out, r#"<img src="{src}" alt="{alt}">"#).unwrap();
    }

    fn transform_link<'a>(url: &'a str, base_path: Option<&str>) -> Cow<'a, str> {
        match base_path {
            Some(base) => Cow::Owned(resolve_link(url, base)),
            None => Cow::Borrowed(url),
        }
    }
}

/// Resolve a post link against the base path posts are served from.
///
/// - `./other.md` with base `/blog` → `/blog/other`
/// - `../about.md` with base `/blog/2024` → `/blog/about`
/// - `series/index.md` with base `/blog` → `/blog/series`
///
/// External links, fragment-only links and non-markdown links are returned
/// unchanged.
#[allow(clippy::case_sensitive_file_extension_comparisons)]
fn resolve_link(url: &str, base_path: &str) -> String {
    if url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("//")
        || url.starts_with("mailto:")
        || url.starts_with("tel:")
        || url.starts_with('#')
    {
        return url.to_owned();
    }

    if !url.ends_with(".md") && !url.contains(".md#") {
        return url.to_owned();
    }

    let (path_part, fragment) = match url.find('#') {
        Some(hash_pos) => (&url[..hash_pos], &url[hash_pos..]),
        None => (url, ""),
    };

    let resolved = if path_part.starts_with('/') {
        path_part.trim_start_matches('/').to_owned()
    } else {
        resolve_relative_path(path_part, base_path)
    };

    let clean = resolved.strip_suffix(".md").unwrap_or(&resolved);
    let clean = clean.strip_suffix("/index").unwrap_or(clean);

    format!("/{clean}{fragment}")
}

/// Join `relative` onto the `base` directory, applying `.` and `..`.
fn resolve_relative_path(relative: &str, base: &str) -> String {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();

    for component in relative.split('/') {
        match component {
            "" | "." => {}
            // Popping an empty stack clamps at the root.
            ".." => {
                segments.pop();
            }
            _ => segments.push(component),
        }
    }

    segments.join("/")
}
