//! Folio CLI - blog content pipeline.
//!
//! Provides commands for:
//! - `render`: Render a post to HTML (or JSON with metadata and sections)
//! - `sections`: Print a post's heading sections as JSON
//! - `meta`: Print a post's front matter as JSON
//! - `list`: List posts with date and title

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ListArgs, MetaArgs, RenderArgs, SectionsArgs};
use output::Output;

/// Folio - blog content pipeline.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a post to HTML.
    Render(RenderArgs),
    /// Print a post's sections as JSON.
    Sections(SectionsArgs),
    /// Print a post's front matter as JSON.
    Meta(MetaArgs),
    /// List posts in the content directory.
    List(ListArgs),
}

/// `--verbose` means INFO; otherwise `RUST_LOG`, falling back to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Sections(args) => args.execute(),
        Commands::Meta(args) => args.execute(),
        Commands::List(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&err);
        std::process::exit(1);
    }
}
