//! Filesystem storage implementation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::storage::{Storage, StorageError, validate_slug};

/// Markdown file extension.
const EXTENSION: &str = "md";

/// Filesystem storage rooted at a content directory.
///
/// The post `slug` lives at `<source_dir>/<slug>.md`. Hidden and
/// underscore-prefixed files and directories are skipped when listing.
///
/// # Example
///
/// ```no_run
/// use folio_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new("content");
/// for slug in storage.list()? {
///     println!("{slug}");
/// }
/// # Ok::<(), folio_storage::StorageError>(())
/// ```
#[derive(Clone, Debug)]
pub struct FsStorage {
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create storage over `source_dir`.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    /// Content root.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// File path a slug maps to.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidSlug`] for malformed slugs.
    pub fn path_for(&self, slug: &str) -> Result<PathBuf, StorageError> {
        validate_slug(slug)?;
        let mut path = self.source_dir.clone();
        path.extend(slug.split('/'));
        path.set_extension(EXTENSION);
        Ok(path)
    }

    /// Collect slugs of markdown files under `dir`, prefixed with `prefix`.
    fn scan_directory(
        &self,
        dir: &Path,
        prefix: &str,
        slugs: &mut Vec<String>,
    ) -> Result<(), StorageError> {
        let entries = fs::read_dir(dir).map_err(|source| StorageError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || name.starts_with('_') {
                continue;
            }

            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                self.scan_directory(&path, &format!("{prefix}{name}/"), slugs)?;
                continue;
            }
            if path.extension().is_none_or(|e| e != EXTENSION) {
                continue;
            }

            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy()) else {
                continue;
            };
            let slug = format!("{prefix}{stem}");
            if validate_slug(&slug).is_err() {
                tracing::debug!(path = %path.display(), "Skipping file with unaddressable name");
                continue;
            }
            slugs.push(slug);
        }

        Ok(())
    }
}

impl Storage for FsStorage {
    fn read(&self, slug: &str) -> Result<String, StorageError> {
        let path = self.path_for(slug)?;
        tracing::debug!(slug, path = %path.display(), "Reading post");

        fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StorageError::NotFound(slug.to_owned())
            } else {
                StorageError::Io { path, source }
            }
        })
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        if !self.source_dir.is_dir() {
            tracing::warn!(
                dir = %self.source_dir.display(),
                "Content directory does not exist"
            );
            return Ok(Vec::new());
        }

        let mut slugs = Vec::new();
        self.scan_directory(&self.source_dir, "", &mut slugs)?;
        slugs.sort();
        Ok(slugs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    #[test]
    fn test_read_existing_post() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("hello.md"), "# Hello").unwrap();

        let storage = FsStorage::new(temp_dir.path());
        assert_eq!(storage.read("hello").unwrap(), "# Hello");
        assert!(storage.exists("hello"));
    }

    #[test]
    fn test_read_nested_post() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("2024")).unwrap();
        fs::write(temp_dir.path().join("2024/launch.md"), "launch").unwrap();

        let storage = FsStorage::new(temp_dir.path());
        assert_eq!(storage.read("2024/launch").unwrap(), "launch");
    }

    #[test]
    fn test_read_missing_post() {
        let temp_dir = tempfile::tempdir().unwrap();

        let storage = FsStorage::new(temp_dir.path());
        let err = storage.read("missing").unwrap_err();
        assert!(matches!(err, StorageError::NotFound(ref slug) if slug == "missing"));
        assert!(!storage.exists("missing"));
    }

    #[test]
    fn test_read_rejects_path_traversal() {
        let temp_dir = tempfile::tempdir().unwrap();

        let storage = FsStorage::new(temp_dir.path());
        let err = storage.read("../etc/passwd").unwrap_err();
        assert!(matches!(err, StorageError::InvalidSlug { .. }));
    }

    #[test]
    fn test_read_directory_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir(temp_dir.path().join("folder.md")).unwrap();

        let storage = FsStorage::new(temp_dir.path());
        let err = storage.read("folder").unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn test_path_for() {
        let storage = FsStorage::new("/srv/posts");
        assert_eq!(
            storage.path_for("2024/launch").unwrap(),
            PathBuf::from("/srv/posts/2024/launch.md")
        );
    }

    #[test]
    fn test_list_sorted_and_recursive() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("zeta.md"), "").unwrap();
        fs::write(root.join("alpha.md"), "").unwrap();
        fs::create_dir(root.join("2024")).unwrap();
        fs::write(root.join("2024/launch.md"), "").unwrap();

        let storage = FsStorage::new(root);
        assert_eq!(
            storage.list().unwrap(),
            vec!["2024/launch", "alpha", "zeta"]
        );
    }

    #[test]
    fn test_list_skips_non_posts() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("post.md"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::write(root.join(".hidden.md"), "").unwrap();
        fs::write(root.join("_draft.md"), "").unwrap();
        fs::write(root.join("has space.md"), "").unwrap();
        fs::create_dir(root.join("_partials")).unwrap();
        fs::write(root.join("_partials/footer.md"), "").unwrap();

        let storage = FsStorage::new(root);
        assert_eq!(storage.list().unwrap(), vec!["post"]);
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let storage = FsStorage::new("/nonexistent/folio/content");
        assert!(storage.list().unwrap().is_empty());
    }
}
