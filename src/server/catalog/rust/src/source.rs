/* src/server/catalog/rust/src/source.rs */

use std::sync::Arc;

use serde_json::Value;

use crate::locale::Locale;

/// Provider of locale-keyed formatted strings.
///
/// Each page binds its own source so keys never collide across pages.
/// Implementations must be cheap to call repeatedly: `format` runs once per
/// `{{T ...}}` occurrence on every render.
pub trait TranslationSource: Send + Sync {
  /// Locales this source has messages for. A page needs at least one.
  fn languages(&self) -> Vec<Locale>;

  /// Format `key` for `locale` with positional `args`.
  fn format(&self, locale: &Locale, key: &str, args: &[Value]) -> String;
}

impl<T: TranslationSource + ?Sized> TranslationSource for Arc<T> {
  fn languages(&self) -> Vec<Locale> {
    (**self).languages()
  }

  fn format(&self, locale: &Locale, key: &str, args: &[Value]) -> String {
    (**self).format(locale, key, args)
  }
}

impl<T: TranslationSource + ?Sized> TranslationSource for Box<T> {
  fn languages(&self) -> Vec<Locale> {
    (**self).languages()
  }

  fn format(&self, locale: &Locale, key: &str, args: &[Value]) -> String {
    (**self).format(locale, key, args)
  }
}
