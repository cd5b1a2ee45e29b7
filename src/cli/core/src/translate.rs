/* src/cli/core/src/translate.rs */

use std::io::Write;

use anyhow::{Context, Result};
use folio::Locale;
use serde_json::Value;

use crate::site::Site;

/// CLI arguments are JSON when they parse as such (`3`, `true`), plain
/// strings otherwise.
pub fn parse_arg(raw: &str) -> Value {
  match serde_json::from_str::<Value>(raw) {
    Ok(v @ (Value::Number(_) | Value::Bool(_) | Value::Null)) => v,
    _ => Value::String(raw.to_string()),
  }
}

pub fn translate_message(
  site: &Site,
  page: &str,
  key: &str,
  locale: Option<Locale>,
  args: &[String],
) -> Result<String> {
  let locale = site.locale(locale)?;
  let args: Vec<Value> = args.iter().map(|a| parse_arg(a)).collect();
  Ok(site.template.translate(page, key, &locale, &args)?)
}

pub fn run_translate(
  site: &Site,
  page: &str,
  key: &str,
  locale: Option<Locale>,
  args: &[String],
) -> Result<()> {
  let text = translate_message(site, page, key, locale, args)?;
  let mut stdout = std::io::stdout().lock();
  writeln!(stdout, "{text}").context("failed to write stdout")?;
  Ok(())
}
