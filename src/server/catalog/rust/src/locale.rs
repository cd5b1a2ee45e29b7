/* src/server/catalog/rust/src/locale.rs */

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;

/// Opaque locale identifier, e.g. `en` or `zh-CN`.
///
/// Compared and hashed by exact string value; no case folding or tag
/// canonicalization is applied. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(Arc<str>);

impl Locale {
  pub fn new(tag: impl AsRef<str>) -> Result<Self, CatalogError> {
    let tag = tag.as_ref().trim();
    if tag.is_empty() {
      return Err(CatalogError::EmptyLocale);
    }
    Ok(Self(Arc::from(tag)))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl FromStr for Locale {
  type Err = CatalogError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::new(s)
  }
}

impl TryFrom<String> for Locale {
  type Error = CatalogError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<Locale> for String {
  fn from(locale: Locale) -> Self {
    locale.0.to_string()
  }
}

impl AsRef<str> for Locale {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl Borrow<str> for Locale {
  fn borrow(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Locale {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
