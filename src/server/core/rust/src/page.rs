/* src/server/core/rust/src/page.rs */

use std::fmt;
use std::sync::Arc;

use folio_catalog::{Locale, TranslationSource};

use crate::functions::Functions;

/// Shared outer document, registered as the `layout` section of every
/// compiled unit. Pulls the page in with `{{> content}}`.
#[derive(Debug, Clone)]
pub struct Layout {
  source: String,
  functions: Functions,
}

impl Layout {
  pub fn new(source: impl Into<String>, functions: Functions) -> Self {
    Self { source: source.into(), functions }
  }

  pub fn source(&self) -> &str {
    &self.source
  }

  pub fn functions(&self) -> &Functions {
    &self.functions
  }
}

/// One registered page: its content fragment and the translations only it
/// can see. The locale list is read from the source once, at registration.
pub struct PageDef {
  name: String,
  fragment: String,
  translations: Arc<dyn TranslationSource>,
  languages: Vec<Locale>,
}

impl PageDef {
  pub(crate) fn new(
    name: String,
    fragment: String,
    translations: Arc<dyn TranslationSource>,
    languages: Vec<Locale>,
  ) -> Self {
    Self { name, fragment, translations, languages }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Fragment source, registered as the `content` section.
  pub fn fragment(&self) -> &str {
    &self.fragment
  }

  pub fn translations(&self) -> &Arc<dyn TranslationSource> {
    &self.translations
  }

  /// Locales declared when the page was registered, as the source listed
  /// them.
  pub fn languages(&self) -> &[Locale] {
    &self.languages
  }

  /// Whether compiled units for `locale` are cached.
  pub fn declares(&self, locale: &Locale) -> bool {
    self.languages.contains(locale)
  }
}

impl fmt::Debug for PageDef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PageDef")
      .field("name", &self.name)
      .field("fragment", &self.fragment)
      .field("languages", &self.languages)
      .finish()
  }
}
