//! Mock storage implementation for testing.

use std::collections::BTreeMap;

use crate::storage::{Storage, StorageError, validate_slug};

/// In-memory storage for tests.
///
/// # Example
///
/// ```
/// use folio_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new().with_post("hello", "# Hello");
/// assert_eq!(storage.read("hello").unwrap(), "# Hello");
/// assert_eq!(storage.list().unwrap(), vec!["hello"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MockStorage {
    posts: BTreeMap<String, String>,
}

impl MockStorage {
    /// Create an empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a post.
    #[must_use]
    pub fn with_post(mut self, slug: impl Into<String>, content: impl Into<String>) -> Self {
        self.posts.insert(slug.into(), content.into());
        self
    }
}

impl Storage for MockStorage {
    fn read(&self, slug: &str) -> Result<String, StorageError> {
        validate_slug(slug)?;
        self.posts
            .get(slug)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(slug.to_owned()))
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.posts.keys().cloned().collect())
    }
}
