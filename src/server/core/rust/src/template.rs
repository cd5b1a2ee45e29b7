/* src/server/core/rust/src/template.rs */

use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use folio_catalog::{Locale, TranslationSource};
use serde::Serialize;
use serde_json::Value;

use crate::cache::UnitCache;
use crate::compile::{CompiledUnit, compile};
use crate::config::{RenderOptions, TemplateBuilder};
use crate::errors::FolioError;
use crate::functions::Functions;
use crate::page::{Layout, PageDef};

/// A shared layout, the pages that use it, and the compiled unit cache.
///
/// `Template` is `Send + Sync`; share it behind `Arc` and call
/// [`render`](Self::render) from any number of threads. Register pages
/// before render traffic starts.
pub struct Template {
  layout: Layout,
  options: RenderOptions,
  pages: RwLock<HashMap<String, Arc<PageDef>>>,
  cache: UnitCache<CompiledUnit>,
  compiles: AtomicUsize,
}

impl Template {
  pub fn new(layout: impl Into<String>, functions: Functions) -> Self {
    Self::from_parts(Layout::new(layout, functions), RenderOptions::default())
  }

  pub fn builder(layout: impl Into<String>) -> TemplateBuilder {
    TemplateBuilder::new(layout.into())
  }

  pub(crate) fn from_parts(layout: Layout, options: RenderOptions) -> Self {
    Self {
      layout,
      options,
      pages: RwLock::new(HashMap::new()),
      cache: UnitCache::default(),
      compiles: AtomicUsize::new(0),
    }
  }

  pub fn layout(&self) -> &Layout {
    &self.layout
  }

  pub fn options(&self) -> RenderOptions {
    self.options
  }

  /// Register a page that renders `fragment` inside the layout.
  ///
  /// Translations are per page so keys never collide across pages; to share
  /// site-wide tokens, merge them into each page's source first. Registering
  /// an existing name replaces it and drops its compiled units.
  pub fn add_page(
    &self,
    name: impl Into<String>,
    fragment: impl Into<String>,
    translations: impl TranslationSource + 'static,
  ) -> Result<(), FolioError> {
    self.add_shared_page(name, fragment, Arc::new(translations))
  }

  /// Like [`add_page`](Self::add_page) for a source already behind `Arc`.
  pub fn add_shared_page(
    &self,
    name: impl Into<String>,
    fragment: impl Into<String>,
    translations: Arc<dyn TranslationSource>,
  ) -> Result<(), FolioError> {
    let name = name.into();
    let languages = translations.languages();
    if languages.is_empty() {
      tracing::warn!(page = %name, "rejected page without languages");
      return Err(FolioError::Configuration { page: name });
    }

    let page =
      Arc::new(PageDef::new(name.clone(), fragment.into(), translations, languages.clone()));
    let replaced = {
      let mut pages = self.pages.write().unwrap_or_else(PoisonError::into_inner);
      pages.insert(name.clone(), page).is_some()
    };
    if replaced {
      let dropped = self.cache.purge(&name);
      tracing::debug!(page = %name, dropped, "replaced page");
    }
    self.cache.seed(&languages);
    tracing::debug!(page = %name, languages = languages.len(), "registered page");
    Ok(())
  }

  pub fn page(&self, name: &str) -> Result<Arc<PageDef>, FolioError> {
    let pages = self.pages.read().unwrap_or_else(PoisonError::into_inner);
    pages.get(name).map(Arc::clone).ok_or_else(|| FolioError::not_found(name))
  }

  pub fn has_page(&self, name: &str) -> bool {
    self.pages.read().unwrap_or_else(PoisonError::into_inner).contains_key(name)
  }

  pub fn page_names(&self) -> Vec<String> {
    let pages = self.pages.read().unwrap_or_else(PoisonError::into_inner);
    let mut names: Vec<String> = pages.keys().cloned().collect();
    names.sort();
    names
  }

  /// Locales the page's translation source declares.
  pub fn languages(&self, page: &str) -> Result<Vec<Locale>, FolioError> {
    Ok(self.page(page)?.languages().to_vec())
  }

  /// Compile (page, locale) ahead of the first render. A no-op on a warm
  /// cache.
  pub fn prepare(&self, page: &str, locale: &Locale) -> Result<(), FolioError> {
    self.unit(page, locale).map(|_| ())
  }

  /// Render `page` for `locale` into `sink`.
  ///
  /// The unit is compiled on first use and cached for the lifetime of this
  /// `Template`. A locale the page did not declare still renders (keys fall
  /// through to the source) but is compiled per call and never cached. A
  /// failure during execution leaves already written output in `sink`.
  pub fn render<T: Serialize, W: Write>(
    &self,
    sink: W,
    page: &str,
    locale: &Locale,
    data: &T,
  ) -> Result<(), FolioError> {
    let unit = self.unit(page, locale)?;
    unit.render(sink, data)
  }

  pub fn render_to_string<T: Serialize>(
    &self,
    page: &str,
    locale: &Locale,
    data: &T,
  ) -> Result<String, FolioError> {
    let mut buf = Vec::new();
    self.render(&mut buf, page, locale, data)?;
    // Engine output is assembled from &str segments
    Ok(String::from_utf8_lossy(&buf).into_owned())
  }

  /// Format `key` with the page's translations, without touching the
  /// layout or the cache.
  pub fn translate(
    &self,
    page: &str,
    key: &str,
    locale: &Locale,
    args: &[Value],
  ) -> Result<String, FolioError> {
    let page = self.page(page)?;
    Ok(page.translations().format(locale, key, args))
  }

  /// Number of compilations performed so far, failed ones included.
  pub fn compile_count(&self) -> usize {
    self.compiles.load(Ordering::Relaxed)
  }

  /// Number of compiled units currently cached.
  pub fn cached_units(&self) -> usize {
    self.cache.len()
  }

  /// Locales with a cache partition, sorted.
  pub fn cached_locales(&self) -> Vec<Locale> {
    self.cache.locales()
  }

  fn unit(&self, page: &str, locale: &Locale) -> Result<Arc<CompiledUnit>, FolioError> {
    if let Some(unit) = self.cache.get(locale, page) {
      tracing::trace!(page, %locale, "cache hit");
      return Ok(unit);
    }
    // Resolved before a slot is created so unknown names leave no trace
    let def = self.page(page)?;
    if !def.declares(locale) {
      tracing::debug!(page, %locale, "locale not declared by page, compiling uncached");
      return self.compile_page(&def, locale).map(Arc::new);
    }
    self.cache.get_or_try_insert_with(locale, page, || {
      // Re-read under the slot lock so a concurrent re-registration is seen
      let def = self.page(page)?;
      self.compile_page(&def, locale)
    })
  }

  fn compile_page(&self, def: &Arc<PageDef>, locale: &Locale) -> Result<CompiledUnit, FolioError> {
    self.compiles.fetch_add(1, Ordering::Relaxed);
    compile(&self.layout, self.options, def, locale)
  }
}

impl std::fmt::Debug for Template {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Template")
      .field("layout", &self.layout)
      .field("options", &self.options)
      .field("pages", &self.page_names())
      .field("cached_units", &self.cached_units())
      .finish()
  }
}
