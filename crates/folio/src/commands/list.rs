//! `folio list` command implementation.

use std::io::Write;

use clap::Args;
use folio_config::CliSettings;
use folio_document::folio_meta::parse_front_matter;
use folio_storage::{FsStorage, Storage};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl ListArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        self.run(&mut stdout.lock(), &Output::new())
    }

    /// Print `slug<TAB>date<TAB>title` per post.
    fn run<W: Write>(&self, out: &mut W, output: &Output) -> Result<(), CliError> {
        let config = self.config.load(CliSettings::default())?;
        let storage = FsStorage::new(config.content_resolved.source_dir.clone());

        for slug in storage.list()? {
            let raw = match storage.read(&slug) {
                Ok(raw) => raw,
                Err(err) => {
                    output.skipped(&slug, &err);
                    continue;
                }
            };
            let meta = parse_front_matter(&raw);
            writeln!(out, "{slug}\t{}\t{}", meta.date, meta.title)?;
        }
        Ok(())
    }
}
