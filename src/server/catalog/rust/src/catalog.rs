/* src/server/catalog/rust/src/catalog.rs */

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::errors::CatalogError;
use crate::format::format_message;
use crate::locale::Locale;
use crate::source::TranslationSource;

/// In-memory message catalog: locale -> key -> printf-style pattern.
///
/// A key missing for the requested locale is formatted as if it were its own
/// pattern. There is no cross-locale fallback.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
  messages: BTreeMap<Locale, HashMap<String, String>>,
}

impl Catalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style `set`.
  pub fn with(mut self, locale: &Locale, key: impl Into<String>, message: impl Into<String>) -> Self {
    self.set(locale, key, message);
    self
  }

  pub fn set(
    &mut self,
    locale: &Locale,
    key: impl Into<String>,
    message: impl Into<String>,
  ) -> &mut Self {
    self.messages.entry(locale.clone()).or_default().insert(key.into(), message.into());
    self
  }

  pub fn extend_messages<I, K, V>(&mut self, locale: &Locale, entries: I) -> &mut Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    let table = self.messages.entry(locale.clone()).or_default();
    for (k, v) in entries {
      table.insert(k.into(), v.into());
    }
    self
  }

  /// Load a flat JSON object of string messages for one locale.
  /// Returns the number of messages read.
  pub fn load_json(&mut self, locale: &Locale, json: &str) -> Result<usize, CatalogError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(obj) = value else {
      return Err(CatalogError::NotAnObject);
    };

    let mut entries = Vec::with_capacity(obj.len());
    for (key, message) in obj {
      match message {
        Value::String(s) => entries.push((key, s)),
        _ => return Err(CatalogError::NonStringMessage { key }),
      }
    }
    let count = entries.len();
    self.extend_messages(locale, entries);
    Ok(count)
  }

  /// Copy every message of `other` into `self`, overwriting on key clash.
  ///
  /// Merge shared tokens first and page tokens last so page text wins.
  pub fn merge(&mut self, other: &Catalog) -> &mut Self {
    for (locale, table) in &other.messages {
      self.extend_messages(locale, table.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    self
  }

  pub fn message(&self, locale: &Locale, key: &str) -> Option<&str> {
    self.messages.get(locale)?.get(key).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.messages.values().map(HashMap::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl TranslationSource for Catalog {
  fn languages(&self) -> Vec<Locale> {
    self.messages.keys().cloned().collect()
  }

  fn format(&self, locale: &Locale, key: &str, args: &[Value]) -> String {
    let pattern = self.message(locale, key).unwrap_or(key);
    format_message(pattern, args)
  }
}
