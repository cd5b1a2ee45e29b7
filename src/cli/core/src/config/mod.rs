/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;


pub use loader::{CONFIG_FILE, load_folio_config, locate_folio_config};
pub use types::FolioConfig;
