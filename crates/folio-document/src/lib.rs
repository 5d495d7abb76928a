//! Front matter, sections and HTML for a Folio post in one pass.
//!
//! Raw post text is split once: the front matter block feeds
//! [`FrontMatter`], and the remaining body feeds both the section splitter
//! and the renderer. Neither step can fail; diagnostics are returned as
//! warnings.
//!
//! # Example
//!
//! ```
//! use folio_document::parse_document;
//!
//! let doc = parse_document("---\ntitle: Demo\n---\n# Intro\ntext\n## Details");
//! assert_eq!(doc.front_matter.title, "Demo");
//! assert_eq!(doc.sections.len(), 2);
//! ```

use chrono::{Local, NaiveDate};
use folio_config::RenderConfig;
use folio_meta::{FrontMatter, split_front_matter};
use folio_renderer::{HtmlBackend, MarkdownRenderer};
use folio_sections::{Section, SectionOptions, parse_sections_with};
use serde::Serialize;

pub use folio_meta;
pub use folio_renderer;
pub use folio_sections;

/// Options for parsing and rendering a post.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Escape text and raw HTML in the rendered output.
    pub escape_html: bool,
    /// Suffix repeated section and heading ids.
    pub dedupe_ids: bool,
    /// Base path for resolving relative `.md` links.
    pub base_path: Option<String>,
    /// Date used for a missing `date` key. `None` means the local date.
    pub today: Option<NaiveDate>,
}

impl DocumentOptions {
    /// Pin the default date, for reproducible output.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn section_options(&self) -> SectionOptions {
        SectionOptions {
            dedupe_ids: self.dedupe_ids,
        }
    }
}

impl From<&RenderConfig> for DocumentOptions {
    fn from(config: &RenderConfig) -> Self {
        Self {
            escape_html: config.escape_html,
            dedupe_ids: config.dedupe_section_ids,
            base_path: config.base_path.clone(),
            today: None,
        }
    }
}

/// Metadata and sections of a post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    /// Front matter with defaults filled in.
    pub front_matter: FrontMatter,
    /// Heading sections of the body, in document order.
    pub sections: Vec<Section>,
}

/// Metadata, sections and HTML of a post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    /// Front matter with defaults filled in.
    pub front_matter: FrontMatter,
    /// Heading sections of the body, in document order.
    pub sections: Vec<Section>,
    /// Rendered body HTML.
    pub html: String,
    /// Constructs the renderer left as text.
    pub warnings: Vec<String>,
}

/// Parse front matter and sections with default options.
pub fn parse_document(raw: &str) -> ParsedDocument {
    parse_document_with(raw, &DocumentOptions::default())
}

/// Parse front matter and sections.
///
/// Sections are computed over the body only, so front matter lines never
/// appear in section content.
pub fn parse_document_with(raw: &str, options: &DocumentOptions) -> ParsedDocument {
    let split = split_front_matter(raw);
    ParsedDocument {
        front_matter: FrontMatter::parse_with_date(raw, options.today()),
        sections: parse_sections_with(split.body(), &options.section_options()),
    }
}

/// Parse and render a post.
///
/// # Example
///
/// ```
/// use folio_document::{DocumentOptions, render_document};
///
/// let options = DocumentOptions {
///     base_path: Some("/blog".to_owned()),
///     ..Default::default()
/// };
/// let doc = render_document("# Hi\n[next](./next.md)", &options);
/// assert!(doc.html.contains(r#"<a href="/blog/next">next</a>"#));
/// assert_eq!(doc.front_matter.title, "Untitled");
/// ```
pub fn render_document(raw: &str, options: &DocumentOptions) -> RenderedDocument {
    let ParsedDocument {
        front_matter,
        sections,
    } = parse_document_with(raw, options);

    let mut renderer = MarkdownRenderer::<HtmlBackend>::new()
        .with_escape_html(options.escape_html)
        .with_dedupe_ids(options.dedupe_ids);
    if let Some(base_path) = &options.base_path {
        renderer = renderer.with_base_path(base_path.as_str());
    }
    let result = renderer.render(split_front_matter(raw).body());

    tracing::debug!(
        title = %front_matter.title,
        sections = sections.len(),
        warnings = result.warnings.len(),
        "Rendered document"
    );

    RenderedDocument {
        front_matter,
        sections,
        html: result.html,
        warnings: result.warnings,
    }
}
