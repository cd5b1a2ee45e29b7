/* src/server/core/rust/src/loader/tests.rs */

use std::fs;
use std::path::Path;

use folio_catalog::{Locale, TranslationSource};
use serde_json::json;

use super::site::{LoadError, load_catalog_dir, load_site, load_site_with_options};
use crate::config::RenderOptions;
use crate::errors::ErrorKind;
use crate::functions::Functions;

fn write(base: &Path, rel: &str, content: &str) {
  let path = base.join(rel);
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(path, content).unwrap();
}

fn en() -> Locale {
  Locale::new("en").unwrap()
}

fn sample_site() -> tempfile::TempDir {
  let dir = tempfile::tempdir().unwrap();
  let base = dir.path();
  write(base, "layout.html", r#"<html><title>{{T "site"}}</title>{{> content}}</html>"#);
  write(base, "pages/home.html", r#"<p>{{T "welcome" name}}</p>"#);
  write(base, "pages/about.html", r#"<p>{{T "about"}}</p>"#);
  write(base, "pages/notes.txt", "ignored");
  write(base, "locales/_shared/en.json", r#"{"site": "Folio", "welcome": "shared"}"#);
  write(base, "locales/_shared/fi.json", r#"{"site": "Folio FI"}"#);
  write(base, "locales/home/en.json", r#"{"welcome": "Welcome, %s"}"#);
  write(base, "locales/about/en.json", r#"{"about": "About us"}"#);
  dir
}

#[test]
fn loads_pages_sorted() {
  let dir = sample_site();
  let tpl = load_site(dir.path(), Functions::new()).unwrap();
  assert_eq!(tpl.page_names(), vec!["about".to_string(), "home".to_string()]);
}

#[test]
fn page_messages_override_shared() {
  let dir = sample_site();
  let tpl = load_site(dir.path(), Functions::new()).unwrap();
  let out = tpl.render_to_string("home", &en(), &json!({"name": "Ann"})).unwrap();
  assert_eq!(out, "<html><title>Folio</title><p>Welcome, Ann</p></html>");
}

#[test]
fn shared_locales_reach_every_page() {
  let dir = sample_site();
  let tpl = load_site(dir.path(), Functions::new()).unwrap();
  let fi = Locale::new("fi").unwrap();
  assert_eq!(tpl.languages("about").unwrap(), vec![en(), fi.clone()]);
  assert_eq!(tpl.translate("about", "site", &fi, &[]).unwrap(), "Folio FI");
}

#[test]
fn options_are_applied() {
  let dir = sample_site();
  let options = RenderOptions { strict: false, ..RenderOptions::default() };
  let tpl = load_site_with_options(dir.path(), Functions::new(), options).unwrap();
  let out = tpl.render_to_string("home", &en(), &json!({})).unwrap();
  assert_eq!(out, "<html><title>Folio</title><p>Welcome, </p></html>");
}

#[test]
fn missing_layout_is_io_error() {
  let dir = tempfile::tempdir().unwrap();
  let err = load_site(dir.path(), Functions::new()).unwrap_err();
  assert!(matches!(err, LoadError::Io { ref path, .. } if path.ends_with("layout.html")));
}

#[test]
fn page_without_locales_fails_registration() {
  let dir = tempfile::tempdir().unwrap();
  write(dir.path(), "layout.html", "{{> content}}");
  write(dir.path(), "pages/lonely.html", "hi");
  let err = load_site(dir.path(), Functions::new()).unwrap_err();
  match err {
    LoadError::Register(e) => {
      assert_eq!(e.kind(), ErrorKind::Configuration);
      assert_eq!(e.page(), "lonely");
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn invalid_catalog_reports_path() {
  let dir = tempfile::tempdir().unwrap();
  write(dir.path(), "layout.html", "{{> content}}");
  write(dir.path(), "pages/home.html", "hi");
  write(dir.path(), "locales/home/en.json", r#"{"n": 1}"#);
  let err = load_site(dir.path(), Functions::new()).unwrap_err();
  assert!(matches!(err, LoadError::Catalog { ref path, .. } if path.ends_with("en.json")));
}

#[test]
fn catalog_dir_missing_is_empty() {
  let dir = tempfile::tempdir().unwrap();
  let catalog = load_catalog_dir(&dir.path().join("nope")).unwrap();
  assert!(catalog.languages().is_empty());
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_page_name_is_reported() {
  use std::ffi::OsStr;
  use std::os::unix::ffi::OsStrExt;

  let dir = sample_site();
  let bad = dir.path().join("pages").join(OsStr::from_bytes(b"bad\xff.html"));
  fs::write(&bad, "<p>x</p>").unwrap();

  let err = load_site(dir.path(), Functions::new()).unwrap_err();
  match err {
    LoadError::Io { path, source } => {
      assert_eq!(path, bad);
      assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
    }
    other => panic!("expected Io, got {other:?}"),
  }
}
