/* src/cli/core/src/main.rs */

mod check;
mod config;
mod render;
mod site;
mod translate;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use folio::Locale;
use tracing_subscriber::EnvFilter;

/// Log filter variable; falls back to `warn`.
const LOG_ENV: &str = "FOLIO_LOG";

#[derive(Parser)]
#[command(name = "folio", about = "Render localized pages from a shared layout", version)]
struct Cli {
  /// Site directory (overrides `[site] dir` in folio.toml)
  #[arg(short, long, global = true)]
  dir: Option<PathBuf>,
  /// Path to folio.toml (auto-detected if omitted)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Render one page for one locale
  Render {
    page: String,
    /// Locale tag (defaults to `[render] default_locale`)
    #[arg(short, long)]
    locale: Option<Locale>,
    /// JSON file with the page data
    #[arg(long)]
    data: Option<PathBuf>,
    /// Output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
  },
  /// Format a single message from a page's translations
  Translate {
    page: String,
    key: String,
    /// Message arguments; JSON scalars are passed typed, anything else as text
    args: Vec<String>,
    #[arg(short, long)]
    locale: Option<Locale>,
  },
  /// Compile every page for every locale it declares
  Check,
}

fn init_tracing() {
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();
  let site = site::open_site(cli.dir, cli.config)?;

  match cli.command {
    Command::Render { page, locale, data, out } => {
      render::run_render(&site, &page, locale, data.as_deref(), out.as_deref())?;
    }
    Command::Translate { page, key, args, locale } => {
      translate::run_translate(&site, &page, &key, locale, &args)?;
    }
    Command::Check => check::run_check(&site)?,
  }
  Ok(())
}
