//! Locating the `---` delimited block at the start of a document.

/// Delimiter line that opens and closes a front matter block.
pub const DELIMITER: &str = "---";

/// A document split into its front matter block and body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrontMatterSplit<'a> {
    /// Text between the delimiter lines, if a complete block was found.
    block: Option<&'a str>,
    /// Everything after the closing delimiter line (or the whole input).
    body: &'a str,
}

impl<'a> FrontMatterSplit<'a> {
    /// Check if a complete delimiter pair was found.
    pub fn has_front_matter(&self) -> bool {
        self.block.is_some()
    }

    /// Raw text between the delimiters, without the delimiter lines.
    pub fn block(&self) -> Option<&'a str> {
        self.block
    }

    /// Body content after the front matter.
    pub fn body(&self) -> &'a str {
        self.body
    }
}

/// Split raw document text into front matter block and body.
///
/// The first line must be exactly `---` and a later line must be exactly
/// `---` for a block to be recognized. Anything else leaves the whole input
/// as body.
///
/// # Example
///
/// ```
/// use folio_meta::split_front_matter;
///
/// let split = split_front_matter("---\ntitle: Test\n---\n# Heading");
/// assert_eq!(split.block(), Some("title: Test"));
/// assert_eq!(split.body(), "# Heading");
///
/// let split = split_front_matter("# No metadata");
/// assert!(!split.has_front_matter());
/// assert_eq!(split.body(), "# No metadata");
/// ```
pub fn split_front_matter(raw: &str) -> FrontMatterSplit<'_> {
    let without_front_matter = FrontMatterSplit {
        block: None,
        body: raw,
    };

    let content = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = content.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return without_front_matter;
    };
    if !is_delimiter(first) {
        return without_front_matter;
    }

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines {
        if is_delimiter(line) {
            let block = content[block_start..offset].trim_end_matches(['\n', '\r']);
            return FrontMatterSplit {
                block: Some(block),
                body: &content[offset + line.len()..],
            };
        }
        offset += line.len();
    }

    tracing::debug!("Front matter opening delimiter found but no closing delimiter");
    without_front_matter
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == DELIMITER
}
