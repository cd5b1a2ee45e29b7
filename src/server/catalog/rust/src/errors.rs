/* src/server/catalog/rust/src/errors.rs */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("locale must not be empty")]
  EmptyLocale,
  #[error("invalid messages JSON: {0}")]
  Json(#[from] serde_json::Error),
  #[error("messages JSON must be an object of strings")]
  NotAnObject,
  #[error("message {key:?} is not a string")]
  NonStringMessage { key: String },
}
