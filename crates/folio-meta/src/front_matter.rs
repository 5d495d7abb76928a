//! Front matter record with fixed defaults.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::split::split_front_matter;

/// Title used when a document does not supply one.
pub const DEFAULT_TITLE: &str = "Untitled";
/// Category used when a document does not supply one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";
/// Format of the default `date` value.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Document metadata parsed from a leading `key: value` block.
///
/// Known keys are typed fields; any other key lands in [`extra`](Self::extra)
/// with its value untouched. The record is always complete: fields the
/// document never sets keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    /// Post title.
    pub title: String,
    /// Short summary.
    pub description: String,
    /// Publication date as written in the document.
    pub date: String,
    /// Post category.
    pub category: String,
    /// Keys outside the known set, in key order.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl FrontMatter {
    /// Default record for a document parsed on `today`.
    #[must_use]
    pub fn defaults(today: NaiveDate) -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            description: String::new(),
            date: today.format(DATE_FORMAT).to_string(),
            category: DEFAULT_CATEGORY.to_owned(),
            extra: BTreeMap::new(),
        }
    }

    /// Parse front matter, taking the default date from `today`.
    ///
    /// Use this instead of [`parse_front_matter`] when results must not
    /// depend on the wall clock.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use folio_meta::FrontMatter;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    /// let meta = FrontMatter::parse_with_date("# No metadata", today);
    /// assert_eq!(meta.title, "Untitled");
    /// assert_eq!(meta.date, "2024-05-01");
    /// ```
    #[must_use]
    pub fn parse_with_date(raw: &str, today: NaiveDate) -> Self {
        let mut meta = Self::defaults(today);
        if let Some(block) = split_front_matter(raw).block() {
            for line in block.lines() {
                let Some((key, value)) = line.split_once(':') else {
                    tracing::debug!(line, "Skipping front matter line without ':'");
                    continue;
                };
                let key = key.trim();
                if key.is_empty() {
                    tracing::debug!(line, "Skipping front matter line with empty key");
                    continue;
                }
                meta.set(key, value.trim());
            }
        }
        meta
    }

    /// Set a key, routing known keys to their fields.
    pub fn set(&mut self, key: &str, value: &str) {
        let value = value.to_owned();
        match key {
            "title" => self.title = value,
            "description" => self.description = value,
            "date" => self.date = value,
            "category" => self.category = value,
            _ => {
                self.extra.insert(key.to_owned(), value);
            }
        }
    }

    /// Look up any key, known or extra.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "title" => Some(&self.title),
            "description" => Some(&self.description),
            "date" => Some(&self.date),
            "category" => Some(&self.category),
            _ => self.extra.get(key).map(String::as_str),
        }
    }

    /// All entries: known keys first, then extra keys in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        [
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("date", self.date.as_str()),
            ("category", self.category.as_str()),
        ]
        .into_iter()
        .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

/// Parse front matter, taking the default date from the local clock.
///
/// Never fails: missing or malformed blocks fall back to defaults.
///
/// # Example
///
/// ```
/// use folio_meta::parse_front_matter;
///
/// let meta = parse_front_matter("---\ntitle: Foo\ncustom: bar\n---\nbody");
/// assert_eq!(meta.title, "Foo");
/// assert_eq!(meta.get("custom"), Some("bar"));
/// assert_eq!(meta.category, "Uncategorized");
/// ```
pub fn parse_front_matter(raw: &str) -> FrontMatter {
    FrontMatter::parse_with_date(raw, Local::now().date_naive())
}
