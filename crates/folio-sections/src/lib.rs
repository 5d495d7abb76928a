//! Heading-delimited section splitting for Folio documents.
//!
//! A document body is divided into a flat, ordered list of [`Section`]s, one
//! per markdown heading. Sections feed table-of-contents navigation, so their
//! ids use the same [`slugify`] rule the renderer uses for heading anchors.
//!
//! # Example
//!
//! ```
//! use folio_sections::parse_sections;
//!
//! let sections = parse_sections("# Intro\nSee below.\n## Details\n* a");
//! let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
//! assert_eq!(ids, ["intro", "details"]);
//! ```

mod section;
mod slug;

pub use section::{Section, SectionOptions, parse_sections, parse_sections_with};
pub use slug::{IdGenerator, slugify};
