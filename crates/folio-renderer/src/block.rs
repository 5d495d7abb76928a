//! Line-oriented block parser.
//!
//! Blocks are recognized in this priority order: fenced code, headings,
//! quote blocks (admonitions or plain quotes), horizontal rules, lists,
//! raw HTML lines, then paragraphs. Every non-blank line that matches
//! nothing else becomes its own paragraph.
//!
//! Quotes nest at most [`MAX_QUOTE_DEPTH`] levels; a deeper quote line is
//! paragraph text.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{AdmonitionKind, Block};
use crate::inline::parse_inline;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]+(\S.*)$").expect("invalid heading regex"));
static ADMONITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[!([A-Za-z]+)\][ \t]*(.*)$").expect("invalid admonition regex"));
static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*(?:\*{3,}|-{3,}|_{3,})[ \t]*$").expect("invalid rule regex"));
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*[*+-][ \t]+(.*)$").expect("invalid bullet regex"));
static ORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*(\d+)\.[ \t]+(.*)$").expect("invalid ordered regex"));
static HTML_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[ \t]*</?(?:p|div|h[1-6]|ul|ol|li|pre|blockquote|table|hr|img|section|figure)(?:[\s/>]|$)",
    )
    .expect("invalid html block regex")
});

const FENCE: &str = "```";

/// Deepest quote nesting parsed as blocks.
pub const MAX_QUOTE_DEPTH: usize = 32;

/// Parse a document body into blocks.
///
/// # Example
///
/// ```
/// use folio_renderer::{Block, parse_blocks};
///
/// let blocks = parse_blocks("# Title\n* a\n* b");
/// assert!(matches!(blocks[0], Block::Heading { level: 1, .. }));
/// assert!(matches!(&blocks[1], Block::List { start: None, items } if items.len() == 2));
/// ```
pub fn parse_blocks(body: &str) -> Vec<Block> {
    BlockParser::new(body).parse().0
}

/// Parse blocks and collect diagnostics for constructs that were left as text.
pub fn parse_blocks_with_warnings(body: &str) -> (Vec<Block>, Vec<String>) {
    BlockParser::new(body).parse()
}

struct BlockParser<'a> {
    lines: Vec<&'a str>,
    idx: usize,
    /// Added to warning line numbers for nested parses.
    line_base: usize,
    /// Quote nesting level of these lines.
    depth: usize,
    blocks: Vec<Block>,
    warnings: Vec<String>,
}

impl<'a> BlockParser<'a> {
    fn new(body: &'a str) -> Self {
        Self::with_lines(body.lines().collect(), 0, 0)
    }

    fn with_lines(lines: Vec<&'a str>, line_base: usize, depth: usize) -> Self {
        Self {
            lines,
            idx: 0,
            line_base,
            depth,
            blocks: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn parse(mut self) -> (Vec<Block>, Vec<String>) {
        while self.idx < self.lines.len() {
            let line = self.lines[self.idx];

            if line.trim().is_empty() {
                self.idx += 1;
                continue;
            }
            if line.trim_start().starts_with(FENCE) && self.code_block() {
                continue;
            }
            if let Some(caps) = HEADING_RE.captures(line) {
                let text = caps[2].trim().to_owned();
                // The regex bounds the marker run to 1-6 characters.
                #[allow(clippy::cast_possible_truncation)]
                let level = caps[1].len() as u8;
                self.blocks.push(Block::Heading {
                    level,
                    content: parse_inline(&text),
                    text,
                });
                self.idx += 1;
                continue;
            }
            if self.depth < MAX_QUOTE_DEPTH && quote_content(line).is_some() {
                self.quote();
                continue;
            }
            if RULE_RE.is_match(line) {
                self.blocks.push(Block::Rule);
                self.idx += 1;
                continue;
            }
            if BULLET_RE.is_match(line) || ORDERED_RE.is_match(line) {
                self.list();
                continue;
            }
            if HTML_BLOCK_RE.is_match(line) {
                self.blocks.push(Block::Html(line.to_owned()));
                self.idx += 1;
                continue;
            }

            self.blocks.push(Block::Paragraph(parse_inline(line.trim())));
            self.idx += 1;
        }

        (self.blocks, self.warnings)
    }

    /// Consume a fenced code block. Returns `false` if the fence never closes.
    fn code_block(&mut self) -> bool {
        let open = self.lines[self.idx].trim_start();
        let info = open[FENCE.len()..].trim();
        let language = info.split_whitespace().next().map(str::to_owned);

        let close = self.lines[self.idx + 1..]
            .iter()
            .position(|l| l.trim() == FENCE)
            .map(|offset| self.idx + 1 + offset);

        let Some(close) = close else {
            let line_no = self.line_base + self.idx + 1;
            tracing::debug!(line = line_no, "Unterminated code fence left as text");
            self.warnings
                .push(format!("line {line_no}: unterminated code fence"));
            return false;
        };

        let code = self.lines[self.idx + 1..close].join("\n");
        self.blocks.push(Block::CodeBlock { language, code });
        self.idx = close + 1;
        true
    }

    fn quote(&mut self) {
        let start = self.idx;
        let first = quote_content(self.lines[start]).unwrap_or_default();

        if let Some(caps) = ADMONITION_RE.captures(first) {
            if let Some(kind) = AdmonitionKind::from_tag(&caps[1]) {
                self.admonition(kind, caps.get(2).map_or("", |m| m.as_str()));
                return;
            }
            let line_no = self.line_base + start + 1;
            tracing::debug!(tag = &caps[1], line = line_no, "Unknown admonition tag");
            self.warnings.push(format!(
                "line {line_no}: unknown admonition type '{}', rendered as a quote",
                &caps[1]
            ));
        }

        let mut inner = Vec::new();
        while let Some(content) = self.lines.get(self.idx).copied().and_then(quote_content) {
            // A later tag line starts its own admonition.
            if self.idx > start && ADMONITION_RE.is_match(content) {
                break;
            }
            inner.push(content);
            self.idx += 1;
        }
        let children = self.nested(inner, start);
        self.blocks.push(Block::BlockQuote(children));
    }

    /// Tag line at `self.idx` and its body: text after the tag, or else the
    /// next quoted line. The body ends at a blank line, a heading, the next
    /// quote line or end of text; later quote lines are parsed on their own.
    fn admonition(&mut self, kind: AdmonitionKind, trailing: &'a str) {
        let start = self.idx;
        let mut inner = Vec::new();
        self.idx += 1;

        if trailing.trim().is_empty() {
            let body = self.lines.get(self.idx).copied().and_then(quote_content);
            if let Some(content) = body
                && !content.trim().is_empty()
                && !HEADING_RE.is_match(content)
                && !ADMONITION_RE.is_match(content)
            {
                inner.push(content);
                self.idx += 1;
            }
        } else {
            inner.push(trailing);
        }

        let children = self.nested(inner, start);
        self.blocks.push(Block::Admonition { kind, children });
    }

    fn nested(&mut self, lines: Vec<&'a str>, start: usize) -> Vec<Block> {
        let (blocks, warnings) =
            BlockParser::with_lines(lines, self.line_base + start, self.depth + 1).parse();
        self.warnings.extend(warnings);
        blocks
    }

    fn list(&mut self) {
        let ordered_start = ORDERED_RE
            .captures(self.lines[self.idx])
            .map(|caps| caps[1].parse::<u64>().unwrap_or(1));
        let item_re: &Regex = if ordered_start.is_some() {
            &ORDERED_RE
        } else {
            &BULLET_RE
        };
        let content_group = if ordered_start.is_some() { 2 } else { 1 };

        let mut items = Vec::new();
        while let Some(line) = self.lines.get(self.idx).copied() {
            // A rule line like `***` never continues a list.
            if RULE_RE.is_match(line) {
                break;
            }
            let Some(caps) = item_re.captures(line) else {
                break;
            };
            items.push(parse_inline(caps[content_group].trim()));
            self.idx += 1;
        }

        self.blocks.push(Block::List {
            start: ordered_start,
            items,
        });
    }
}

/// Text after the `>` marker (and one optional space) of a quote line.
fn quote_content(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}
