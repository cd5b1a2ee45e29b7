/* src/server/core/rust/src/loader/mod.rs */

// Load a whole site from disk into a Template.
//
//   <dir>/layout.html
//   <dir>/pages/<name>.html
//   <dir>/locales/_shared/<locale>.json   merged into every page first
//   <dir>/locales/<name>/<locale>.json

mod site;

#[cfg(test)]
mod tests;

pub use site::{LoadError, SHARED_LOCALES_DIR, load_catalog_dir, load_site, load_site_with_options};
