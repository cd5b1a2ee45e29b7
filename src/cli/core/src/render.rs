/* src/cli/core/src/render.rs */

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use folio::Locale;
use serde_json::Value;

use crate::site::Site;

/// Read page data from a JSON file; no file means an empty object.
pub fn read_data(path: Option<&Path>) -> Result<Value> {
  let Some(path) = path else {
    return Ok(Value::Object(serde_json::Map::new()));
  };
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn run_render(
  site: &Site,
  page: &str,
  locale: Option<Locale>,
  data: Option<&Path>,
  out: Option<&Path>,
) -> Result<()> {
  let locale = site.locale(locale)?;
  let data = read_data(data)?;

  match out {
    Some(path) => {
      let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
      let mut writer = BufWriter::new(file);
      site.template.render(&mut writer, page, &locale, &data)?;
      writer.flush().with_context(|| format!("failed to write {}", path.display()))?;
    }
    None => {
      let mut stdout = std::io::stdout().lock();
      site.template.render(&mut stdout, page, &locale, &data)?;
      stdout.flush().context("failed to flush stdout")?;
    }
  }
  tracing::debug!(page, %locale, "rendered");
  Ok(())
}
