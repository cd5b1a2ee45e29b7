/* src/cli/core/src/check.rs */

use anyhow::{Result, bail};

use crate::site::Site;
use crate::ui;

/// Outcome of compiling every (page, locale) pair of a site.
#[derive(Debug, Default)]
pub struct CheckReport {
  pub compiled: usize,
  pub failures: Vec<String>,
}

pub fn check_site(site: &Site) -> CheckReport {
  let mut report = CheckReport::default();
  for page in site.template.page_names() {
    let languages = match site.template.languages(&page) {
      Ok(l) => l,
      Err(e) => {
        report.failures.push(format!("{page}: {e}"));
        continue;
      }
    };
    for locale in languages {
      match site.template.prepare(&page, &locale) {
        Ok(()) => report.compiled += 1,
        Err(e) => {
          let cause = std::error::Error::source(&e).map(ToString::to_string).unwrap_or_default();
          report.failures.push(format!("{page} [{locale}]: {e}: {cause}"));
        }
      }
    }
  }
  report
}

pub fn run_check(site: &Site) -> Result<()> {
  ui::banner("check");
  let report = check_site(site);
  if report.compiled == 0 && report.failures.is_empty() {
    ui::warn(&format!("no pages under {}", site.dir.display()));
  }
  for failure in &report.failures {
    ui::fail(failure);
  }
  if report.failures.is_empty() {
    ui::ok(&format!("{} units compiled from {}", report.compiled, site.dir.display()));
    return Ok(());
  }
  ui::detail(&format!("{} compiled, {} failed", report.compiled, report.failures.len()));
  bail!("{} page(s) failed to compile", report.failures.len())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;
  use crate::site::open_site;
  use crate::site::tests::write_site;

  #[test]
  fn clean_site_compiles_every_pair() {
    let tmp = tempfile::tempdir().unwrap();
    write_site(tmp.path());
    let site = open_site(Some(tmp.path().to_path_buf()), Some(empty_config(tmp.path()))).unwrap();
    let report = check_site(&site);
    assert_eq!(report.compiled, 2);
    assert!(report.failures.is_empty());
  }

  #[test]
  fn broken_fragment_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    write_site(tmp.path());
    fs::write(tmp.path().join("pages/broken.html"), "{{#if x}}").unwrap();
    fs::create_dir_all(tmp.path().join("locales/broken")).unwrap();
    fs::write(tmp.path().join("locales/broken/en.json"), "{}").unwrap();

    let site = open_site(Some(tmp.path().to_path_buf()), Some(empty_config(tmp.path()))).unwrap();
    let report = check_site(&site);
    assert_eq!(report.compiled, 2);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].starts_with("broken [en]"), "{}", report.failures[0]);
    assert!(run_check(&site).is_err());
  }

  #[test]
  fn demo_site_is_clean() {
    let demo = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../demo/basic");
    let site = open_site(None, Some(demo.join("folio.toml"))).unwrap();
    let report = check_site(&site);
    assert!(report.failures.is_empty(), "{:?}", report.failures);
    assert_eq!(report.compiled, 2);

    let data = crate::render::read_data(Some(&demo.join("data.json"))).unwrap();
    let fi = "fi".parse().unwrap();
    let html = site.template.render_to_string("testpage", &fi, &data).unwrap();
    assert!(html.contains("<title>Hello, world! | Folio-esittely</title>"), "{html}");
    assert!(html.contains("Template testaa asioita Monday"), "{html}");
    assert!(html.contains("ETUSIVU"), "{html}");
  }

  fn empty_config(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("folio.toml");
    fs::write(&path, "").unwrap();
    path
  }
}
