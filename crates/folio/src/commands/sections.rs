//! `folio sections` command implementation.

use std::io::Write;

use clap::Args;
use folio_config::CliSettings;
use folio_document::{DocumentOptions, parse_document_with};

use super::{ConfigArgs, InputArgs, write_json};
use crate::error::CliError;

/// Arguments for the sections command.
#[derive(Args)]
pub(crate) struct SectionsArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    config: ConfigArgs,

    /// Suffix repeated section ids (`faq`, `faq-1`).
    #[arg(long)]
    dedupe_ids: bool,
}

impl SectionsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        self.run(&mut stdout.lock())
    }

    fn run<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        let config = self.config.load(CliSettings {
            dedupe_section_ids: self.dedupe_ids.then_some(true),
            ..CliSettings::default()
        })?;
        let raw = self.input.read(&config)?;

        let document = parse_document_with(&raw, &DocumentOptions::from(&config.render));
        write_json(out, &document.sections)
    }
}
