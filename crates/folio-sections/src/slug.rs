//! Anchor id generation for headings.

use std::collections::HashMap;

/// Convert heading text to an anchor-safe slug.
///
/// Lowercases the text, replaces every whitespace run with a single `-` and
/// drops anything outside `[a-z0-9-]`. Existing dashes are kept as-is, so
/// `"A - B"` becomes `"a---b"`.
///
/// # Examples
///
/// ```
/// use folio_sections::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("What's New?"), "whats-new");
/// assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
/// ```
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            if !in_whitespace {
                result.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            result.push(c);
        }
    }

    result
}

/// Hands out unique ids by suffixing repeats (`faq`, `faq-1`, `faq-2`).
#[derive(Debug, Default)]
pub struct IdGenerator {
    counts: HashMap<String, usize>,
}

impl IdGenerator {
    /// Create an empty generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `base` on first use, `base-N` for the N-th repeat.
    pub fn unique(&mut self, base: String) -> String {
        let count = self.counts.entry(base.clone()).or_insert(0);
        *count += 1;

        if *count == 1 {
            base
        } else {
            format!("{base}-{}", *count - 1)
        }
    }
}
