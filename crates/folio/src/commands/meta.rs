//! `folio meta` command implementation.

use std::io::Write;

use clap::Args;
use folio_config::CliSettings;
use folio_document::folio_meta::parse_front_matter;

use super::{ConfigArgs, InputArgs, write_json};
use crate::error::CliError;

/// Arguments for the meta command.
#[derive(Args)]
pub(crate) struct MetaArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    config: ConfigArgs,
}

impl MetaArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        self.run(&mut stdout.lock())
    }

    fn run<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        let config = self.config.load(CliSettings::default())?;
        let raw = self.input.read(&config)?;
        write_json(out, &parse_front_matter(&raw))
    }
}
