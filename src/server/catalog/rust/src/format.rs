/* src/server/catalog/rust/src/format.rs */

use std::fmt::Write;

use serde_json::Value;

const VERBS: [char; 4] = ['s', 'v', 'd', 'q'];

/// Substitute positional arguments into a printf-style message.
///
/// Supported verbs: `%s` and `%v` (plain), `%d` (number), `%q` (quoted),
/// `%%` (literal percent) and explicit 1-based indexes such as `%[2]s`.
/// An indexed verb moves the implicit cursor, so `%[2]s %s` reads args 2
/// then 3. An index past the last argument renders as `%!s(BADINDEX)`.
/// Unknown verbs are kept verbatim; extra arguments are ignored.
pub fn format_message(pattern: &str, args: &[Value]) -> String {
  let mut out = String::with_capacity(pattern.len());
  let mut rest = pattern;
  let mut cursor = 0usize;

  while let Some(pos) = rest.find('%') {
    out.push_str(&rest[..pos]);
    rest = &rest[pos + 1..];

    let (index, after) = parse_index(rest);
    let mut chars = after.chars();
    match chars.next() {
      None => {
        out.push('%');
        out.push_str(rest);
        rest = "";
      }
      Some('%') if index.is_none() => {
        out.push('%');
        rest = chars.as_str();
      }
      Some(verb) if VERBS.contains(&verb) => {
        match index {
          // An out-of-range explicit index leaves the cursor where it was
          Some(i) if i >= args.len() => {
            let _ = write!(out, "%!{verb}(BADINDEX)");
          }
          _ => {
            let i = index.unwrap_or(cursor);
            cursor = i.saturating_add(1);
            match args.get(i) {
              Some(value) => write_arg(&mut out, verb, value),
              None => {
                let _ = write!(out, "%!{verb}(MISSING)");
              }
            }
          }
        }
        rest = chars.as_str();
      }
      // Not a directive: emit the percent sign and re-scan what follows as text
      Some(_) => out.push('%'),
    }
  }

  out.push_str(rest);
  out
}

/// Parse an optional `[n]` argument index. Returns the zero-based index and
/// the remainder after the closing bracket.
fn parse_index(s: &str) -> (Option<usize>, &str) {
  let Some(inner) = s.strip_prefix('[') else {
    return (None, s);
  };
  let Some(close) = inner.find(']') else {
    return (None, s);
  };
  match inner[..close].parse::<usize>() {
    Ok(n) if n >= 1 => (Some(n - 1), &inner[close + 1..]),
    _ => (None, s),
  }
}

fn write_arg(out: &mut String, verb: char, value: &Value) {
  match verb {
    'd' => match value {
      Value::Number(n) => {
        let _ = write!(out, "{n}");
      }
      other => {
        let _ = write!(out, "%!d({})", display_value(other));
      }
    },
    'q' => {
      let _ = write!(out, "{:?}", display_value(value));
    }
    _ => out.push_str(&display_value(value)),
  }
}

/// Plain rendering of an argument: strings raw, null empty, compound values
/// as compact JSON.
fn display_value(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    Value::Null => String::new(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => n.to_string(),
    Value::Array(_) | Value::Object(_) => value.to_string(),
  }
}
