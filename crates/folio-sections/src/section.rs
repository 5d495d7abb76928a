//! Heading-delimited section splitting.

use std::sync::LazyLock;

use regex::Regex;

use crate::slug::{IdGenerator, slugify};

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]+(\S.*)$").expect("invalid heading regex"));

const FENCE: &str = "```";

/// One heading-delimited region of a document body.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    /// Anchor id derived from the title.
    pub id: String,
    /// Heading text, trimmed.
    pub title: String,
    /// Heading depth (1-6).
    pub level: u8,
    /// Raw text from the heading line up to the next heading, trimmed.
    pub content: String,
}

/// Options for [`parse_sections_with`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SectionOptions {
    /// Suffix repeated ids (`faq`, `faq-1`, ...) instead of keeping duplicates.
    pub dedupe_ids: bool,
}

/// Heading found on a single line.
struct HeadingLine {
    /// Byte offset of the line start within the body.
    offset: usize,
    level: u8,
    title: String,
}

/// Split a document body into sections, one per heading.
///
/// Text before the first heading is not part of any section. Duplicate
/// titles produce duplicate ids.
///
/// # Examples
///
/// ```
/// use folio_sections::parse_sections;
///
/// let sections = parse_sections("# A\nhello\n## B\nworld");
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[0].content, "# A\nhello");
/// assert_eq!(sections[1].id, "b");
/// assert_eq!(sections[1].level, 2);
/// ```
pub fn parse_sections(body: &str) -> Vec<Section> {
    parse_sections_with(body, &SectionOptions::default())
}

/// Split a document body into sections with explicit options.
pub fn parse_sections_with(body: &str, options: &SectionOptions) -> Vec<Section> {
    let headings = scan_headings(body);
    let mut ids = IdGenerator::new();
    let mut sections = Vec::with_capacity(headings.len());

    for (index, heading) in headings.iter().enumerate() {
        // Trailing edge: this section ends where the next heading starts.
        let end = headings.get(index + 1).map_or(body.len(), |next| next.offset);
        let base_id = slugify(&heading.title);
        let id = if options.dedupe_ids {
            ids.unique(base_id)
        } else {
            base_id
        };

        sections.push(Section {
            id,
            title: heading.title.clone(),
            level: heading.level,
            content: body[heading.offset..end].trim().to_owned(),
        });
    }

    tracing::debug!(count = sections.len(), "Split document into sections");
    sections
}

/// Find heading lines, skipping anything inside closed code fences.
fn scan_headings(body: &str) -> Vec<HeadingLine> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for raw_line in body.split_inclusive('\n') {
        lines.push((offset, raw_line.trim_end_matches(['\n', '\r'])));
        offset += raw_line.len();
    }

    let mut headings = Vec::new();
    let mut idx = 0;
    while idx < lines.len() {
        let (line_start, line) = lines[idx];
        idx += 1;

        if line.trim_start().starts_with(FENCE) {
            // An unterminated fence is ordinary text.
            if let Some(close) = lines[idx..].iter().position(|(_, l)| l.trim() == FENCE) {
                idx += close + 1;
                continue;
            }
        }

        if let Some(caps) = HEADING_RE.captures(line) {
            // The regex bounds the marker run to 1-6 characters.
            #[allow(clippy::cast_possible_truncation)]
            let level = caps[1].len() as u8;
            headings.push(HeadingLine {
                offset: line_start,
                level,
                title: caps[2].trim().to_owned(),
            });
        }
    }

    headings
}
