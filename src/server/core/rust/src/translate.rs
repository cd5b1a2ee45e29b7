/* src/server/core/rust/src/translate.rs */

use std::sync::Arc;

use folio_catalog::{Locale, TranslationSource};
use handlebars::{
  Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
  RenderErrorReason, ScopedJson,
};
use serde_json::Value;

/// `{{T "key" args...}}` bound to one page's translation source and one
/// locale.
///
/// Direct use writes the formatted text unescaped: catalog text is trusted
/// markup. As a subexpression it yields a plain string, which the outer
/// helper or expression escapes as usual.
pub(crate) struct TranslateHelper {
  locale: Locale,
  source: Arc<dyn TranslationSource>,
}

impl TranslateHelper {
  pub(crate) fn new(locale: Locale, source: Arc<dyn TranslationSource>) -> Self {
    Self { locale, source }
  }

  fn translate(&self, h: &Helper<'_>) -> Result<String, RenderError> {
    let key = h
      .param(0)
      .ok_or(RenderErrorReason::ParamNotFoundForIndex(crate::TRANSLATE_FN, 0))?
      .value();
    let Some(key) = key.as_str() else {
      return Err(
        RenderErrorReason::Other(format!("{} expects a string key, got {key}", crate::TRANSLATE_FN))
          .into(),
      );
    };
    let args: Vec<Value> = h.params().iter().skip(1).map(|p| p.value().clone()).collect();
    Ok(self.source.format(&self.locale, key, &args))
  }
}

impl HelperDef for TranslateHelper {
  fn call_inner<'reg: 'rc, 'rc>(
    &self,
    h: &Helper<'rc>,
    _: &'reg Handlebars<'reg>,
    _: &'rc Context,
    _: &mut RenderContext<'reg, 'rc>,
  ) -> Result<ScopedJson<'rc>, RenderError> {
    Ok(ScopedJson::Derived(Value::String(self.translate(h)?)))
  }

  fn call<'reg: 'rc, 'rc>(
    &self,
    h: &Helper<'rc>,
    _: &'reg Handlebars<'reg>,
    _: &'rc Context,
    _: &mut RenderContext<'reg, 'rc>,
    out: &mut dyn Output,
  ) -> HelperResult {
    let text = self.translate(h)?;
    out.write(&text)?;
    Ok(())
  }
}
