//! CLI command implementations.

mod list;
mod meta;
mod render;
mod sections;

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_storage::{FsStorage, Storage};

use crate::error::CliError;

pub(crate) use list::ListArgs;
pub(crate) use meta::MetaArgs;
pub(crate) use render::RenderArgs;
pub(crate) use sections::SectionsArgs;

/// Which post to read: a slug from the content directory or a file path.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub(crate) struct InputArgs {
    /// Post slug under the content directory (e.g. `2024/launch`).
    slug: Option<String>,

    /// Read the post from a file instead.
    #[arg(long)]
    file: Option<PathBuf>,
}

impl InputArgs {
    /// Name of the post for diagnostics.
    fn label(&self) -> String {
        match &self.file {
            Some(path) => path.display().to_string(),
            None => self.slug.clone().unwrap_or_default(),
        }
    }

    /// Fetch the raw post text.
    fn read(&self, config: &Config) -> Result<String, CliError> {
        if let Some(path) = &self.file {
            tracing::info!(path = %path.display(), "Reading post file");
            return Ok(std::fs::read_to_string(path)?);
        }
        let slug = self.slug.as_deref().unwrap_or_default();
        let storage = FsStorage::new(config.content_resolved.source_dir.clone());
        Ok(storage.read(slug)?)
    }
}

/// Config file and content directory options.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Post source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,
}

impl ConfigArgs {
    /// Load config with the given settings layered on top.
    fn load(&self, settings: CliSettings) -> Result<Config, CliError> {
        let settings = CliSettings {
            source_dir: self.source_dir.clone(),
            ..settings
        };
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}

/// Write `value` as pretty JSON followed by a newline.
fn write_json<W: Write>(out: &mut W, value: &impl serde::Serialize) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
