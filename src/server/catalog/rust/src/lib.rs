/* src/server/catalog/rust/src/lib.rs */

mod catalog;
mod errors;
mod format;
mod locale;
mod source;

pub use catalog::Catalog;
pub use errors::CatalogError;
pub use format::format_message;
pub use locale::Locale;
pub use source::TranslationSource;
