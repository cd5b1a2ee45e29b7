/* src/cli/core/src/site.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio::{FunctionError, Functions, Locale, Template, load_site_with_options};
use serde_json::Value;

use crate::config::{FolioConfig, load_folio_config, locate_folio_config};

/// A loaded site plus the settings the CLI needs around it.
pub struct Site {
  pub dir: PathBuf,
  pub template: Template,
  pub default_locale: Option<Locale>,
}

impl Site {
  /// Explicit locale, else `render.default_locale` from folio.toml.
  pub fn locale(&self, explicit: Option<Locale>) -> Result<Locale> {
    explicit
      .or_else(|| self.default_locale.clone())
      .context("no locale given: pass --locale or set render.default_locale in folio.toml")
  }
}

/// Functions every site gets from the CLI host.
pub fn builtin_functions() -> Functions {
  Functions::new()
    .with("upper", |args| Ok(Value::String(string_arg(args, "upper")?.to_uppercase())))
    .with("lower", |args| Ok(Value::String(string_arg(args, "lower")?.to_lowercase())))
}

fn string_arg<'a>(args: &'a [Value], name: &str) -> Result<&'a str, FunctionError> {
  args
    .first()
    .and_then(Value::as_str)
    .ok_or_else(|| FunctionError(format!("{name} expects one string argument")))
}

/// Resolve config (explicit path, else discovered upward from cwd), then the
/// site dir (explicit, else `site.dir` relative to the config file, else
/// cwd), and load it.
pub fn open_site(dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Site> {
  let (config, config_dir) = match config_path {
    Some(path) => (load_folio_config(&path)?, parent_dir(&path)),
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      discover_config(&cwd)?
    }
  };

  let dir = match dir {
    Some(d) => d,
    None => config_dir.join(&config.site.dir),
  };
  tracing::debug!(dir = %dir.display(), "opening site");

  let template = load_site_with_options(&dir, builtin_functions(), config.render.options())
    .with_context(|| format!("failed to load site from {}", dir.display()))?;

  Ok(Site { dir, template, default_locale: config.render.default_locale })
}

/// Config found upward from `start`, else defaults rooted at `start`. Only a
/// missing file falls back; I/O and parse failures propagate.
fn discover_config(start: &Path) -> Result<(FolioConfig, PathBuf)> {
  match locate_folio_config(start)? {
    Some(path) => Ok((load_folio_config(&path)?, parent_dir(&path))),
    None => Ok((FolioConfig::default(), start.to_path_buf())),
  }
}

fn parent_dir(path: &Path) -> PathBuf {
  path.parent().map(Path::to_path_buf).unwrap_or_default()
}
