/* src/server/core/rust/src/compile.rs */

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use folio_catalog::Locale;
use handlebars::Handlebars;
use serde::Serialize;

use crate::config::RenderOptions;
use crate::errors::{FolioError, Section};
use crate::page::{Layout, PageDef};
use crate::translate::TranslateHelper;
use crate::{CONTENT_SECTION, LAYOUT_SECTION, TRANSLATE_FN};

/// Layout + one page fragment + a `T` helper bound to one locale, parsed and
/// ready to execute. Immutable once built.
pub(crate) struct CompiledUnit {
  page: String,
  registry: Handlebars<'static>,
}

impl CompiledUnit {
  /// Execute the layout section against `data`, streaming into `sink`.
  pub(crate) fn render<T: Serialize, W: Write>(&self, sink: W, data: &T) -> Result<(), FolioError> {
    self.registry.render_to_write(LAYOUT_SECTION, data, sink).map_err(|e| FolioError::Render {
      page: self.page.clone(),
      source: Box::new(e),
    })
  }
}

/// Build a fresh unit for (`page`, `locale`).
///
/// Install order: global functions, then `T` (so it shadows a global of the
/// same name), then the layout, then the fragment.
pub(crate) fn compile(
  layout: &Layout,
  options: RenderOptions,
  page: &Arc<PageDef>,
  locale: &Locale,
) -> Result<CompiledUnit, FolioError> {
  let started = Instant::now();
  tracing::debug!(page = page.name(), %locale, "compiling unit");

  let mut registry = Handlebars::new();
  registry.set_strict_mode(options.strict);
  if !options.escape_html {
    registry.register_escape_fn(handlebars::no_escape);
  }

  layout.functions().install(&mut registry);
  let helper = TranslateHelper::new(locale.clone(), Arc::clone(page.translations()));
  registry.register_helper(TRANSLATE_FN, Box::new(helper));

  registry
    .register_template_string(LAYOUT_SECTION, layout.source())
    .map_err(|e| compile_error(page, locale, Section::Layout, e))?;
  registry
    .register_partial(CONTENT_SECTION, page.fragment())
    .map_err(|e| compile_error(page, locale, Section::Content, e))?;

  tracing::debug!(
    page = page.name(),
    %locale,
    elapsed_us = started.elapsed().as_micros() as u64,
    "compiled unit"
  );
  Ok(CompiledUnit { page: page.name().to_string(), registry })
}

fn compile_error(
  page: &PageDef,
  locale: &Locale,
  section: Section,
  source: handlebars::TemplateError,
) -> FolioError {
  tracing::warn!(page = page.name(), %locale, %section, error = %source, "compile failed");
  FolioError::Compile { page: page.name().to_string(), section, source: Box::new(source) }
}
