/* src/server/core/rust/src/functions.rs */

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use handlebars::{
  Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, RenderErrorReason, ScopedJson,
};
use serde_json::Value;
use thiserror::Error;

/// Failure reported by a global template function.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct FunctionError(pub String);

impl From<String> for FunctionError {
  fn from(msg: String) -> Self {
    Self(msg)
  }
}

impl From<&str> for FunctionError {
  fn from(msg: &str) -> Self {
    Self(msg.to_string())
  }
}

pub type TemplateFn = Arc<dyn Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync>;

/// Global render-time functions available to the layout and every page.
///
/// Called from templates as `{{name arg1 arg2}}` or as a subexpression.
/// Results are HTML-escaped like any other value. The names `T`, `layout`
/// and `content` are reserved: a function named `T` is shadowed by the
/// translation helper.
#[derive(Clone, Default)]
pub struct Functions {
  entries: BTreeMap<String, TemplateFn>,
}

impl Functions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
  where
    F: Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync + 'static,
  {
    self.entries.insert(name.into(), Arc::new(f));
    self
  }

  pub fn with<F>(mut self, name: impl Into<String>, f: F) -> Self
  where
    F: Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync + 'static,
  {
    self.insert(name, f);
    self
  }

  pub fn contains(&self, name: &str) -> bool {
    self.entries.contains_key(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub(crate) fn install(&self, registry: &mut Handlebars<'static>) {
    for (name, f) in &self.entries {
      registry.register_helper(name, Box::new(FunctionHelper { name: name.clone(), f: Arc::clone(f) }));
    }
  }
}

impl fmt::Debug for Functions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.entries.keys()).finish()
  }
}

struct FunctionHelper {
  name: String,
  f: TemplateFn,
}

impl HelperDef for FunctionHelper {
  fn call_inner<'reg: 'rc, 'rc>(
    &self,
    h: &Helper<'rc>,
    _: &'reg Handlebars<'reg>,
    _: &'rc Context,
    _: &mut RenderContext<'reg, 'rc>,
  ) -> Result<ScopedJson<'rc>, RenderError> {
    let args: Vec<Value> = h.params().iter().map(|p| p.value().clone()).collect();
    let value = (self.f)(&args)
      .map_err(|e| RenderErrorReason::Other(format!("function {:?} failed: {e}", self.name)))?;
    Ok(ScopedJson::Derived(value))
  }
}
