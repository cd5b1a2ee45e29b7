/* src/cli/core/src/config/types.rs */

use anyhow::{Result, bail};
use folio::{Locale, RenderOptions};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolioConfig {
  #[serde(default)]
  pub site: SiteSection,
  #[serde(default)]
  pub render: RenderSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
  /// Site directory, relative to the config file
  #[serde(default = "default_site_dir")]
  pub dir: String,
}

impl Default for SiteSection {
  fn default() -> Self {
    Self { dir: default_site_dir() }
  }
}

fn default_site_dir() -> String {
  ".".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderSection {
  #[serde(default = "default_true")]
  pub strict: bool,
  #[serde(default = "default_true")]
  pub escape_html: bool,
  pub default_locale: Option<Locale>,
}

impl Default for RenderSection {
  fn default() -> Self {
    Self { strict: true, escape_html: true, default_locale: None }
  }
}

fn default_true() -> bool {
  true
}

impl RenderSection {
  pub fn options(&self) -> RenderOptions {
    RenderOptions { strict: self.strict, escape_html: self.escape_html }
  }
}

impl FolioConfig {
  pub fn validate(&self) -> Result<()> {
    if self.site.dir.trim().is_empty() {
      bail!("site.dir must not be empty");
    }
    Ok(())
  }
}
