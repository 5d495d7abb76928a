//! Markdown subset renderer with pluggable backends.
//!
//! Rendering runs in two stages: a line-oriented parser builds a tree of
//! [`Block`] and [`Inline`] nodes, then [`MarkdownRenderer`] serializes the
//! tree through a [`RenderBackend`]. [`HtmlBackend`] produces the HTML used
//! for display.
//!
//! The dialect covers headings, fenced code, bullet and ordered lists,
//! admonitions (`> [!NOTE]`, `> [!WARNING]`, `> [!TIP]`), blockquotes,
//! horizontal rules, images, links, emphasis and code spans. Each remaining
//! line becomes its own paragraph.
//!
//! # Example
//!
//! ```
//! use folio_renderer::{HtmlBackend, MarkdownRenderer};
//!
//! let result = MarkdownRenderer::<HtmlBackend>::new()
//!     .with_base_path("/blog")
//!     .render("> [!NOTE]\n> Read [part two](./part-2.md) next.");
//! assert!(result.html.contains(r#"class="admonition note-info""#));
//! assert!(result.html.contains(r#"<a href="/blog/part-2">part two</a>"#));
//! ```

mod ast;
mod backend;
mod block;
mod html;
mod inline;
mod renderer;
mod util;

pub use ast::{AdmonitionKind, Block, Inline};
pub use backend::RenderBackend;
pub use block::{MAX_QUOTE_DEPTH, parse_blocks, parse_blocks_with_warnings};
pub use html::HtmlBackend;
pub use inline::{MAX_INLINE_DEPTH, parse_inline};
pub use renderer::{MarkdownRenderer, RenderResult, render_to_html};
pub use util::{escape_html, escape_text, is_safe_url};
