//! Post storage abstraction for Folio.
//!
//! The [`Storage`] trait fetches raw post text by slug, keeping the
//! rendering pipeline free of I/O. Provided backends:
//! - [`FsStorage`] reads `<source_dir>/<slug>.md` from the local filesystem
//! - [`MockStorage`] holds posts in memory (behind the `mock` feature)

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, validate_slug};
