/* src/server/core/rust/src/loader/site.rs */

use std::path::{Path, PathBuf};

use folio_catalog::{Catalog, CatalogError, Locale};
use thiserror::Error;

use crate::config::RenderOptions;
use crate::errors::FolioError;
use crate::functions::Functions;
use crate::template::Template;

/// Locale directory whose messages every page inherits.
pub const SHARED_LOCALES_DIR: &str = "_shared";

#[derive(Debug, Error)]
pub enum LoadError {
  #[error("failed to read {}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("invalid catalog {}", path.display())]
  Catalog {
    path: PathBuf,
    #[source]
    source: CatalogError,
  },
  #[error(transparent)]
  Register(#[from] FolioError),
}

fn read(path: &Path) -> Result<String, LoadError> {
  std::fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })
}

/// Files in `dir` with the given extension, sorted by path. A missing
/// directory yields nothing.
fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, LoadError> {
  if !dir.is_dir() {
    return Ok(Vec::new());
  }
  let entries =
    std::fs::read_dir(dir).map_err(|source| LoadError::Io { path: dir.to_path_buf(), source })?;
  let mut files = Vec::new();
  for entry in entries {
    let path = entry.map_err(|source| LoadError::Io { path: dir.to_path_buf(), source })?.path();
    if path.is_file() && path.extension().is_some_and(|e| e == ext) {
      files.push(path);
    }
  }
  files.sort();
  Ok(files)
}

/// Page names and locale tags come from file stems, so they must be UTF-8.
fn file_stem(path: &Path) -> Result<&str, LoadError> {
  path.file_stem().and_then(|s| s.to_str()).ok_or_else(|| LoadError::Io {
    path: path.to_path_buf(),
    source: std::io::Error::new(std::io::ErrorKind::InvalidData, "file name is not valid UTF-8"),
  })
}

/// Read every `<locale>.json` in `dir` into one catalog.
pub fn load_catalog_dir(dir: &Path) -> Result<Catalog, LoadError> {
  let mut catalog = Catalog::new();
  for path in files_with_extension(dir, "json")? {
    let locale = Locale::new(file_stem(&path)?)
      .map_err(|source| LoadError::Catalog { path: path.clone(), source })?;
    let content = read(&path)?;
    let count = catalog
      .load_json(&locale, &content)
      .map_err(|source| LoadError::Catalog { path: path.clone(), source })?;
    tracing::trace!(path = %path.display(), %locale, count, "loaded messages");
  }
  Ok(catalog)
}

pub fn load_site(dir: impl AsRef<Path>, functions: Functions) -> Result<Template, LoadError> {
  load_site_with_options(dir, functions, RenderOptions::default())
}

pub fn load_site_with_options(
  dir: impl AsRef<Path>,
  functions: Functions,
  options: RenderOptions,
) -> Result<Template, LoadError> {
  let base = dir.as_ref();
  let layout = read(&base.join("layout.html"))?;
  let template = Template::builder(layout).functions(functions).options(options).build();

  let locales_dir = base.join("locales");
  let shared = load_catalog_dir(&locales_dir.join(SHARED_LOCALES_DIR))?;

  for path in files_with_extension(&base.join("pages"), "html")? {
    let name = file_stem(&path)?.to_string();
    let fragment = read(&path)?;
    let mut catalog = shared.clone();
    catalog.merge(&load_catalog_dir(&locales_dir.join(&name))?);
    template.add_page(name, fragment, catalog)?;
  }

  tracing::debug!(dir = %base.display(), pages = template.page_names().len(), "loaded site");
  Ok(template)
}
