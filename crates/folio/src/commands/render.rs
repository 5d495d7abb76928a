//! `folio render` command implementation.

use std::io::Write;

use clap::{Args, ValueEnum};
use folio_config::CliSettings;
use folio_document::{DocumentOptions, render_document};

use super::{ConfigArgs, InputArgs, write_json};
use crate::error::CliError;
use crate::output::Output;

/// Output format for rendered posts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Body HTML only.
    #[default]
    Html,
    /// Front matter, sections, HTML and warnings as JSON.
    Json,
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    config: ConfigArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    format: Format,

    /// Escape text and raw HTML (for untrusted posts).
    #[arg(long)]
    escape_html: bool,

    /// Suffix repeated heading ids (`faq`, `faq-1`).
    #[arg(long)]
    dedupe_ids: bool,

    /// Base path for resolving relative `.md` links (overrides config).
    #[arg(long)]
    base_path: Option<String>,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        self.run(&mut stdout.lock(), &Output::new())
    }

    fn run<W: Write>(&self, out: &mut W, output: &Output) -> Result<(), CliError> {
        let config = self.config.load(CliSettings {
            escape_html: self.escape_html.then_some(true),
            dedupe_section_ids: self.dedupe_ids.then_some(true),
            base_path: self.base_path.clone(),
            ..CliSettings::default()
        })?;
        let raw = self.input.read(&config)?;

        let document = render_document(&raw, &DocumentOptions::from(&config.render));

        match self.format {
            Format::Html => {
                output.post_warnings(&self.input.label(), &document.warnings);
                writeln!(out, "{}", document.html)?;
            }
            Format::Json => write_json(out, &document)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cli;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn render_args(argv: &[&str]) -> RenderArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            crate::Commands::Render(args) => args,
            _ => panic!("expected render command"),
        }
    }

    fn write_post(dir: &tempfile::TempDir, body: &str) -> String {
        let path = dir.path().join("post.md");
        std::fs::write(&path, body).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn write_config(dir: &tempfile::TempDir, toml: &str) -> String {
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, toml).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_render_file_as_html() {
        let dir = tempfile::tempdir().unwrap();
        let post = write_post(&dir, "---\ntitle: T\n---\n# Hi\n* a\n* b");
        let config = write_config(&dir, "");

        let args = render_args(&["folio", "render", "--file", &post, "--config", &config]);
        let mut out = Vec::new();
        args.run(&mut out, &Output::new()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<h1 id=\"hi\">Hi</h1>\n<ul><li>a</li><li>b</li></ul>\n"
        );
    }

    #[test]
    fn test_render_slug_as_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("posts")).unwrap();
        std::fs::write(
            dir.path().join("posts/launch.md"),
            "---\ntitle: Launch\n---\n## News\n[more](./faq.md)",
        )
        .unwrap();
        let config = write_config(
            &dir,
            "[content]\nsource_dir = \"posts\"\n\n[render]\nbase_path = \"/blog\"\n",
        );

        let args = render_args(&["folio", "render", "launch", "--format", "json", "-c", &config]);
        let mut out = Vec::new();
        args.run(&mut out, &Output::new()).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["front_matter"]["title"], "Launch");
        assert_eq!(json["sections"][0]["id"], "news");
        assert!(
            json["html"]
                .as_str()
                .unwrap()
                .contains(r#"<a href="/blog/faq">more</a>"#)
        );
    }

    #[test]
    fn test_render_escape_flag() {
        let dir = tempfile::tempdir().unwrap();
        let post = write_post(&dir, "<div>x</div>");
        let config = write_config(&dir, "");

        let args = render_args(&[
            "folio",
            "render",
            "--file",
            &post,
            "--config",
            &config,
            "--escape-html",
        ]);
        let mut out = Vec::new();
        args.run(&mut out, &Output::new()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<p>&lt;div&gt;x&lt;/div&gt;</p>\n"
        );
    }

    #[test]
    fn test_render_missing_slug_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(&dir, "");

        let args = render_args(&["folio", "render", "nope", "--config", &config]);
        let mut out = Vec::new();
        let err = args.run(&mut out, &Output::new()).unwrap_err();

        assert!(matches!(err, CliError::Storage(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_render_requires_one_input() {
        assert!(Cli::try_parse_from(["folio", "render"]).is_err());
        assert!(Cli::try_parse_from(["folio", "render", "a", "--file", "b.md"]).is_err());
    }
}
