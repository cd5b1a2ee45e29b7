/* src/server/core/rust/src/config.rs */

use serde_json::Value;

use crate::functions::{FunctionError, Functions};
use crate::page::Layout;
use crate::template::Template;

/// Engine settings applied to every compiled unit of a [`Template`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
  /// Missing fields in page data fail the render instead of printing nothing.
  pub strict: bool,
  /// HTML-escape `{{value}}` output. Disable for non-HTML documents.
  pub escape_html: bool,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self { strict: true, escape_html: true }
  }
}

pub struct TemplateBuilder {
  layout: String,
  functions: Functions,
  options: RenderOptions,
}

impl TemplateBuilder {
  pub(crate) fn new(layout: String) -> Self {
    Self { layout, functions: Functions::new(), options: RenderOptions::default() }
  }

  pub fn function<F>(mut self, name: impl Into<String>, f: F) -> Self
  where
    F: Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync + 'static,
  {
    self.functions.insert(name, f);
    self
  }

  /// Replace the whole function table.
  pub fn functions(mut self, functions: Functions) -> Self {
    self.functions = functions;
    self
  }

  pub fn strict(mut self, strict: bool) -> Self {
    self.options.strict = strict;
    self
  }

  pub fn escape_html(mut self, escape: bool) -> Self {
    self.options.escape_html = escape;
    self
  }

  pub fn options(mut self, options: RenderOptions) -> Self {
    self.options = options;
    self
  }

  pub fn build(self) -> Template {
    Template::from_parts(Layout::new(self.layout, self.functions), self.options)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    let opts = RenderOptions::default();
    assert!(opts.strict);
    assert!(opts.escape_html);
  }

  #[test]
  fn builder_applies_settings() {
    let template = Template::builder("<html></html>")
      .function("now", |_| Ok(Value::from("today")))
      .strict(false)
      .escape_html(false)
      .build();
    assert_eq!(template.options(), RenderOptions { strict: false, escape_html: false });
    assert!(template.layout().functions().contains("now"));
    assert_eq!(template.layout().source(), "<html></html>");
  }

  #[test]
  fn functions_replaces_table() {
    let template = Template::builder("")
      .function("a", |_| Ok(Value::Null))
      .functions(Functions::new().with("b", |_| Ok(Value::Null)))
      .build();
    let names: Vec<&str> = template.layout().functions().names().collect();
    assert_eq!(names, vec!["b"]);
  }
}
