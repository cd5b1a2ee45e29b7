/* src/server/core/rust/src/lib.rs */

//! Page composition with per-page translations.
//!
//! A [`Template`] owns one shared layout and any number of pages. Each page
//! is a content fragment plus its own [`TranslationSource`]. Rendering a
//! page for a locale compiles layout + fragment + a locale-bound `T` helper
//! into one unit, caches it per (locale, page), and executes it against
//! the caller's data.
//!
//! ```
//! use folio::{Catalog, Functions, Locale, Template};
//!
//! let en: Locale = "en".parse().unwrap();
//! let tpl = Template::new("<html>{{> content}}</html>", Functions::new());
//! tpl.add_page("home", r#"{{T "hello"}}"#, Catalog::new().with(&en, "hello", "Hello")).unwrap();
//!
//! let html = tpl.render_to_string("home", &en, &serde_json::json!({})).unwrap();
//! assert_eq!(html, "<html>Hello</html>");
//! ```

mod cache;
mod compile;
pub mod config;
pub mod errors;
pub mod functions;
pub mod loader;
pub mod page;
mod template;
mod translate;

pub use config::{RenderOptions, TemplateBuilder};
pub use errors::{ErrorKind, FolioError, Section};
pub use folio_catalog::{Catalog, CatalogError, Locale, TranslationSource, format_message};
pub use functions::{FunctionError, Functions, TemplateFn};
pub use loader::{LoadError, load_site, load_site_with_options};
pub use page::{Layout, PageDef};
pub use template::Template;

/// Engine name of the layout section; rendering starts here.
pub const LAYOUT_SECTION: &str = "layout";
/// Engine name of the page fragment, included with `{{> content}}`.
pub const CONTENT_SECTION: &str = "content";
/// Name of the translation helper: `{{T "key" args...}}`.
pub const TRANSLATE_FN: &str = "T";
