//! Storage trait and error types.
//!
//! # Slug Convention
//!
//! Posts are addressed by slug, not file path:
//! - `"hello-world"` - a post at the content root
//! - `"2024/launch"` - a post in a subdirectory
//!
//! A slug is one or more `/`-separated segments of ASCII letters, digits,
//! `-` and `_`. Implementations map slugs to their own storage layout.

use std::path::PathBuf;

/// Storage error.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No post exists for the slug.
    #[error("Post not found: {0}")]
    NotFound(String),
    /// The slug is malformed or tries to leave the content root.
    #[error("Invalid slug '{slug}': {reason}")]
    InvalidSlug {
        /// Slug as given by the caller.
        slug: String,
        /// What is wrong with it.
        reason: String,
    },
    /// Underlying I/O failure.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Original error.
        #[source]
        source: std::io::Error,
    },
}

/// Source of raw post text.
pub trait Storage: Send + Sync {
    /// Read the raw text of a post.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidSlug`] for malformed slugs,
    /// [`StorageError::NotFound`] if no post exists, or
    /// [`StorageError::Io`] if reading fails.
    fn read(&self, slug: &str) -> Result<String, StorageError>;

    /// List every post slug in sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be enumerated.
    fn list(&self) -> Result<Vec<String>, StorageError>;

    /// Check if a post exists. Errors count as "doesn't exist".
    fn exists(&self, slug: &str) -> bool {
        self.read(slug).is_ok()
    }
}

/// Check a slug against the naming convention.
///
/// # Errors
///
/// Returns [`StorageError::InvalidSlug`] describing the first problem found.
pub fn validate_slug(slug: &str) -> Result<(), StorageError> {
    let invalid = |reason: String| StorageError::InvalidSlug {
        slug: slug.to_owned(),
        reason,
    };

    if slug.is_empty() {
        return Err(invalid("slug is empty".to_owned()));
    }
    for segment in slug.split('/') {
        if segment.is_empty() {
            return Err(invalid("empty path segment".to_owned()));
        }
        if let Some(c) = segment
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(invalid(format!("character '{c}' is not allowed")));
        }
    }
    Ok(())
}
