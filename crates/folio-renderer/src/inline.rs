//! Inline parser: emphasis, code spans, links and images.
//!
//! Images are recognized before links and strong before emphasis by
//! construction: each opener is matched at the position where it starts,
//! so `![alt](src)` can never be read as a link and `**x**` is never split
//! into two single-delimiter runs.

use crate::ast::Inline;

/// Bytes that may start an inline construct.
const SPECIAL: &[u8] = b"\\`![*_";

/// Deepest nesting of emphasis and link labels; delimiters past it are text.
pub const MAX_INLINE_DEPTH: usize = 32;

/// Parse one line (or label) of inline markdown.
///
/// # Example
///
/// ```
/// use folio_renderer::{Inline, parse_inline};
///
/// let nodes = parse_inline("**bold** text");
/// assert_eq!(
///     nodes,
///     vec![
///         Inline::Strong(vec![Inline::Text("bold".to_owned())]),
///         Inline::Text(" text".to_owned()),
///     ]
/// );
/// ```
pub fn parse_inline(text: &str) -> Vec<Inline> {
    InlineParser::new(text, 0).parse()
}

struct InlineParser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    nodes: Vec<Inline>,
    text: String,
    depth: usize,
}

impl<'a> InlineParser<'a> {
    fn new(src: &'a str, depth: usize) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            nodes: Vec::new(),
            text: String::new(),
            depth,
        }
    }

    fn nested(&self, src: &str) -> Vec<Inline> {
        InlineParser::new(src, self.depth + 1).parse()
    }

    fn can_nest(&self) -> bool {
        self.depth < MAX_INLINE_DEPTH
    }

    fn parse(mut self) -> Vec<Inline> {
        while self.pos < self.bytes.len() {
            let consumed = match self.bytes[self.pos] {
                b'\\' => self.escaped_char(),
                b'`' => self.code_span(),
                b'!' => self.image(),
                b'[' => self.link(),
                delim @ (b'*' | b'_') => self.emphasis(delim),
                _ => false,
            };
            if !consumed {
                self.text_run();
            }
        }
        self.flush_text();
        self.nodes
    }

    /// Copy at least one character, then everything up to the next special byte.
    fn text_run(&mut self) {
        let start = self.pos;
        let first_len = self.src[start..].chars().next().map_or(1, char::len_utf8);
        let mut end = start + first_len;
        while end < self.bytes.len() && !SPECIAL.contains(&self.bytes[end]) {
            end += 1;
        }
        self.text.push_str(&self.src[start..end]);
        self.pos = end;
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.nodes.push(Inline::Text(std::mem::take(&mut self.text)));
        }
    }

    fn push(&mut self, node: Inline) {
        self.flush_text();
        self.nodes.push(node);
    }

    /// `\*` and friends produce the literal punctuation character.
    fn escaped_char(&mut self) -> bool {
        match self.bytes.get(self.pos + 1) {
            Some(next) if next.is_ascii_punctuation() => {
                self.text.push(char::from(*next));
                self.pos += 2;
                true
            }
            _ => false,
        }
    }

    fn code_span(&mut self) -> bool {
        let start = self.pos + 1;
        match self.src[start..].find('`') {
            Some(len) if len > 0 => {
                let code = self.src[start..start + len].to_owned();
                self.push(Inline::Code(code));
                self.pos = start + len + 1;
                true
            }
            _ => false,
        }
    }

    fn image(&mut self) -> bool {
        if self.bytes.get(self.pos + 1) != Some(&b'[') {
            return false;
        }
        let Some(target) = self.bracket_target(self.pos + 1) else {
            return false;
        };
        self.push(Inline::Image {
            src: target.url.to_owned(),
            alt: target.label.to_owned(),
        });
        self.pos = target.end;
        true
    }

    fn link(&mut self) -> bool {
        if !self.can_nest() {
            return false;
        }
        let Some(target) = self.bracket_target(self.pos) else {
            return false;
        };
        self.push(Inline::Link {
            href: target.url.to_owned(),
            children: self.nested(target.label),
        });
        self.pos = target.end;
        true
    }

    /// Parse `[label](url)` starting at the `[` at `open`.
    fn bracket_target(&self, open: usize) -> Option<BracketTarget<'a>> {
        let mut depth = 0usize;
        let mut i = open;
        let close = loop {
            match self.bytes.get(i)? {
                b'\\' => i += 1,
                b'[' => depth += 1,
                b']' => {
                    depth -= 1;
                    if depth == 0 {
                        break i;
                    }
                }
                _ => {}
            }
            i += 1;
        };

        if self.bytes.get(close + 1) != Some(&b'(') {
            return None;
        }
        let url_start = close + 2;
        let url_len = self.src[url_start..].find(')')?;
        let url = self.src[url_start..url_start + url_len].trim();
        if url.is_empty() {
            return None;
        }

        Some(BracketTarget {
            label: &self.src[open + 1..close],
            url,
            end: url_start + url_len + 1,
        })
    }

    fn emphasis(&mut self, delim: u8) -> bool {
        // `snake_case` is text, not emphasis.
        if !self.can_nest() || (delim == b'_' && self.alphanumeric_before(self.pos)) {
            return false;
        }

        if self.bytes.get(self.pos + 1) == Some(&delim) {
            let inner_start = self.pos + 2;
            if let Some(close) = self.find_double_close(delim, inner_start) {
                let children = self.nested(&self.src[inner_start..close]);
                self.push(Inline::Strong(children));
                self.pos = close + 2;
                return true;
            }
            return false;
        }

        let inner_start = self.pos + 1;
        if let Some(close) = self.find_single_close(delim, inner_start) {
            let children = self.nested(&self.src[inner_start..close]);
            self.push(Inline::Emphasis(children));
            self.pos = close + 1;
            return true;
        }
        false
    }

    fn find_double_close(&self, delim: u8, from: usize) -> Option<usize> {
        if !self.opens_at(from) {
            return None;
        }
        let mut j = from + 1;
        while j + 1 < self.bytes.len() {
            match self.bytes[j] {
                b'\\' => j += 2,
                b if b == delim && self.bytes[j + 1] == delim && self.closes_after(j) => {
                    // In a run like `***`, close on the last pair.
                    let mut close = j;
                    while self.bytes.get(close + 2) == Some(&delim) {
                        close += 1;
                    }
                    if delim == b'_' && self.alphanumeric_at(close + 2) {
                        return None;
                    }
                    return Some(close);
                }
                _ => j += 1,
            }
        }
        None
    }

    fn find_single_close(&self, delim: u8, from: usize) -> Option<usize> {
        if !self.opens_at(from) || self.bytes[from] == delim {
            return None;
        }
        let mut j = from + 1;
        while j < self.bytes.len() {
            match self.bytes[j] {
                b'\\' => j += 2,
                b if b == delim => {
                    if self.bytes.get(j + 1) == Some(&delim) {
                        // Nested strong run; skip it whole.
                        while self.bytes.get(j) == Some(&delim) {
                            j += 1;
                        }
                        continue;
                    }
                    if self.closes_after(j) && !(delim == b'_' && self.alphanumeric_at(j + 1)) {
                        return Some(j);
                    }
                    j += 1;
                }
                _ => j += 1,
            }
        }
        None
    }

    /// Content may not start with whitespace.
    fn opens_at(&self, idx: usize) -> bool {
        self.bytes
            .get(idx)
            .is_some_and(|b| !b.is_ascii_whitespace())
    }

    /// Content may not end with whitespace.
    fn closes_after(&self, delim_idx: usize) -> bool {
        !self.bytes[delim_idx - 1].is_ascii_whitespace()
    }

    fn alphanumeric_before(&self, idx: usize) -> bool {
        self.src[..idx]
            .chars()
            .next_back()
            .is_some_and(char::is_alphanumeric)
    }

    fn alphanumeric_at(&self, idx: usize) -> bool {
        self.src
            .get(idx..)
            .and_then(|rest| rest.chars().next())
            .is_some_and(char::is_alphanumeric)
    }
}

struct BracketTarget<'a> {
    label: &'a str,
    url: &'a str,
    /// Byte offset just past the closing `)`.
    end: usize,
}
