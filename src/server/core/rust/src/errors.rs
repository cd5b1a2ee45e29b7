/* src/server/core/rust/src/errors.rs */

use std::fmt;

use thiserror::Error;

/// Which registered source a compile failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
  Layout,
  Content,
}

impl Section {
  /// Name the section is registered under in the engine.
  pub fn name(self) -> &'static str {
    match self {
      Section::Layout => crate::LAYOUT_SECTION,
      Section::Content => crate::CONTENT_SECTION,
    }
  }
}

impl fmt::Display for Section {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Flat discriminant of [`FolioError`], for callers that only branch on the
/// class of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Configuration,
  NotFound,
  Compile,
  Render,
}

#[derive(Debug, Error)]
pub enum FolioError {
  /// Page registered with a translation source that declares no locales.
  #[error("page {page:?} declares no languages")]
  Configuration { page: String },

  #[error("unknown page {page:?}")]
  NotFound { page: String },

  /// Layout or fragment failed to parse. Never cached.
  #[error("couldn't parse {section} section of page {page:?}")]
  Compile {
    page: String,
    section: Section,
    #[source]
    source: Box<handlebars::TemplateError>,
  },

  /// Executing a compiled unit against page data failed. Output written to
  /// the sink before the failure is left in place.
  #[error("couldn't render page {page:?}")]
  Render {
    page: String,
    #[source]
    source: Box<handlebars::RenderError>,
  },
}

impl FolioError {
  pub(crate) fn not_found(page: &str) -> Self {
    Self::NotFound { page: page.to_string() }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Configuration { .. } => ErrorKind::Configuration,
      Self::NotFound { .. } => ErrorKind::NotFound,
      Self::Compile { .. } => ErrorKind::Compile,
      Self::Render { .. } => ErrorKind::Render,
    }
  }

  /// Name of the page the failure belongs to.
  pub fn page(&self) -> &str {
    match self {
      Self::Configuration { page }
      | Self::NotFound { page }
      | Self::Compile { page, .. }
      | Self::Render { page, .. } => page,
    }
  }
}
