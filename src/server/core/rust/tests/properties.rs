/* src/server/core/rust/tests/properties.rs */

//! End-to-end behaviour of `Template`: compilation caching, locale
//! isolation, composition, and failure modes.

use std::sync::{Arc, Barrier};
use std::thread;

use folio::{Catalog, ErrorKind, Functions, Locale, Template, TranslationSource};
use serde::Serialize;
use serde_json::{Value, json};

fn en() -> Locale {
  "en".parse().unwrap()
}

fn fi() -> Locale {
  "fi".parse().unwrap()
}

fn catalog() -> Catalog {
  Catalog::new().with(&en(), "t", "test").with(&fi(), "t", "testi")
}

#[test]
fn repeated_renders_compile_once() {
  let tpl = Template::new("<html>{{> content}}</html>", Functions::new());
  tpl.add_page("p", r#"<b>{{T "t"}}</b> {{n}}"#, catalog()).unwrap();

  let first = tpl.render_to_string("p", &en(), &json!({"n": 1})).unwrap();
  for _ in 0..10 {
    assert_eq!(tpl.render_to_string("p", &en(), &json!({"n": 1})).unwrap(), first);
  }
  assert_eq!(tpl.compile_count(), 1);
}

#[test]
fn locales_do_not_cross_contaminate() {
  let tpl = Template::new("{{> content}}", Functions::new());
  tpl.add_page("p", r#"{{T "t"}}"#, catalog()).unwrap();

  for _ in 0..3 {
    assert_eq!(tpl.render_to_string("p", &en(), &Value::Null).unwrap(), "test");
    assert_eq!(tpl.render_to_string("p", &fi(), &Value::Null).unwrap(), "testi");
  }
  assert_eq!(tpl.cached_units(), 2);
}

#[test]
fn fragment_composes_into_layout() {
  let tpl = Template::new("<html>{{> content}}</html>", Functions::new());
  tpl.add_page("p", r#"{{T "t"}}"#, catalog()).unwrap();
  assert_eq!(tpl.render_to_string("p", &en(), &json!({})).unwrap(), "<html>test</html>");
}

#[test]
fn unregistered_page_writes_nothing() {
  let tpl = Template::new("<html>{{> content}}</html>", Functions::new());
  let mut sink = Vec::new();
  let err = tpl.render(&mut sink, "ghost", &en(), &json!({})).unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
  assert!(sink.is_empty());

  let err = tpl.translate("ghost", "t", &en(), &[]).unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn empty_locale_set_is_not_registered() {
  let tpl = Template::new("{{> content}}", Functions::new());
  let err = tpl.add_page("p", "x", Catalog::new()).unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Configuration);

  let err = tpl.render_to_string("p", &en(), &json!({})).unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn concurrent_cold_cache_renders_agree() {
  const THREADS: usize = 16;

  let tpl = Arc::new(Template::new("<html>{{> content}}</html>", Functions::new()));
  tpl.add_page("p", r#"{{T "t"}}-{{id}}"#, catalog()).unwrap();
  let barrier = Arc::new(Barrier::new(THREADS));

  let handles: Vec<_> = (0..THREADS)
    .map(|_| {
      let tpl = Arc::clone(&tpl);
      let barrier = Arc::clone(&barrier);
      thread::spawn(move || {
        barrier.wait();
        tpl.render_to_string("p", &fi(), &json!({"id": 7})).unwrap()
      })
    })
    .collect();

  let outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
  assert!(outputs.iter().all(|o| o == "<html>testi-7</html>"));
  assert_eq!(tpl.compile_count(), 1);
  assert_eq!(tpl.cached_units(), 1);
}

#[test]
fn concurrent_registration_of_distinct_pages() {
  let tpl = Arc::new(Template::new("{{> content}}", Functions::new()));
  let handles: Vec<_> = (0..8)
    .map(|i| {
      let tpl = Arc::clone(&tpl);
      thread::spawn(move || tpl.add_page(format!("p{i}"), format!("page {i}"), catalog()).unwrap())
    })
    .collect();
  for h in handles {
    h.join().unwrap();
  }

  assert_eq!(tpl.page_names().len(), 8);
  for i in 0..8 {
    let out = tpl.render_to_string(&format!("p{i}"), &en(), &json!({})).unwrap();
    assert_eq!(out, format!("page {i}"));
  }
}

/// Data shaped like a typical site: shared fields for the layout and a
/// page-specific payload under `C`.
#[derive(Serialize)]
struct Base<C: Serialize> {
  title: String,
  #[serde(rename = "C")]
  content: C,
}

#[derive(Serialize)]
struct ExamplePage {
  translated_token: String,
}

#[test]
fn typed_data_with_pretranslated_token() {
  let base = r#"<html><head><title>{{title}}</title></head><body><main>{{> content C}}</main></body></html>"#;
  let page = r#"<p>{{T "test"}} {{T "test_formatted" "Template" "right now"}} {{translated_token}}</p>"#;

  let mut messages = Catalog::new();
  messages
    .set(&en(), "test", "this is a test string")
    .set(&en(), "test_formatted", "%s is testing things on %s");

  let tpl = Template::new(base, Functions::new());
  tpl.add_page("testpage", page, messages).unwrap();

  let token = tpl
    .translate("testpage", "test_formatted", &en(), &[json!("Example"), json!("Monday")])
    .unwrap();
  let data = Base { title: "Hello, world!".into(), content: ExamplePage { translated_token: token } };

  let html = tpl.render_to_string("testpage", &en(), &data).unwrap();
  assert_eq!(
    html,
    "<html><head><title>Hello, world!</title></head><body><main><p>this is a test string \
     Template is testing things on right now Example is testing things on Monday</p></main></body></html>"
  );
}

/// Counts `format` calls to show the source is consulted per render, not
/// baked into the compiled unit.
struct Counting {
  inner: Catalog,
  calls: std::sync::atomic::AtomicUsize,
}

impl TranslationSource for Counting {
  fn languages(&self) -> Vec<Locale> {
    self.inner.languages()
  }

  fn format(&self, locale: &Locale, key: &str, args: &[Value]) -> String {
    self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    self.inner.format(locale, key, args)
  }
}

#[test]
fn translation_source_called_on_every_render() {
  let source = Arc::new(Counting { inner: catalog(), calls: Default::default() });
  let tpl = Template::new("{{> content}}", Functions::new());
  tpl.add_shared_page("p", r#"{{T "t"}}{{T "t"}}"#, Arc::clone(&source) as Arc<dyn TranslationSource>).unwrap();

  tpl.render_to_string("p", &en(), &json!({})).unwrap();
  tpl.render_to_string("p", &en(), &json!({})).unwrap();
  assert_eq!(source.calls.load(std::sync::atomic::Ordering::SeqCst), 4);
  assert_eq!(tpl.compile_count(), 1);
}
