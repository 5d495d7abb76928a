//! Front matter extraction for Folio documents.
//!
//! A document may open with a metadata block:
//!
//! ```text
//! ---
//! title: Launch week
//! date: 2024-05-01
//! category: News
//! author: Sam
//! ---
//! # Body starts here
//! ```
//!
//! Each line is split at its first `:`. Parsing never fails; missing or
//! malformed blocks fall back to [`FrontMatter::defaults`].

mod front_matter;
mod split;

pub use front_matter::{
    DATE_FORMAT, DEFAULT_CATEGORY, DEFAULT_TITLE, FrontMatter, parse_front_matter,
};
pub use split::{DELIMITER, FrontMatterSplit, split_front_matter};
