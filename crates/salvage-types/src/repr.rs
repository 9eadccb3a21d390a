//! Literal-style text rendering of values and records.
//!
//! Two of the classifier's metadata rules test for a substring in the text
//! of a value rather than in its structure. The rendering here is the one
//! those rules were written against: dictionary-literal braces, quoted keys,
//! `None`/`True`/`False`, and constructor-style wrappers for identifier and
//! timestamp kinds.
//!
//! ```text
//!   {'_id': ObjectId('5f1e2d3c4b5a69788796a5b4'), 'credentials': {'SCRAM-SHA-1': {'iterationCount': 10000}}}
//! ```
//!
//! [`text`] is the top-level form: a bare string renders as itself and an
//! identifier or datetime renders without its wrapper. Nested values always
//! use [`repr`].

use std::fmt::Write;

use crate::record::Record;
use crate::value::{Binary, Value};

/// Top-level text of a value.
#[must_use]
pub fn text(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    Value::ObjectId(id) => id.to_hex(),
    Value::DateTime(dt) => dt
      .spaced_format()
      .unwrap_or_else(|| dt.millis().to_string()),
    other => repr(other),
  }
}

/// Literal rendering of a value.
#[must_use]
pub fn repr(value: &Value) -> String {
  let mut out = String::new();
  write_value(&mut out, value);
  out
}

/// Literal rendering of a record as a mapping.
#[must_use]
pub fn record_repr(record: &Record) -> String {
  let mut out = String::new();
  write_record(&mut out, record);
  out
}

fn write_record(out: &mut String, record: &Record) {
  out.push('{');
  for (i, (key, value)) in record.iter().enumerate() {
    if i > 0 {
      out.push_str(", ");
    }
    write_str_literal(out, key);
    out.push_str(": ");
    write_value(out, value);
  }
  out.push('}');
}

fn write_value(out: &mut String, value: &Value) {
  match value {
    Value::Null => out.push_str("None"),
    Value::Bool(true) => out.push_str("True"),
    Value::Bool(false) => out.push_str("False"),
    Value::Int(n) => {
      let _ = write!(out, "{n}");
    }
    Value::Double(x) => out.push_str(&float_repr(*x)),
    Value::String(s) => write_str_literal(out, s),
    Value::Binary(bin) => write_binary(out, bin),
    Value::DateTime(dt) => match dt.to_naive() {
      Some(naive) => write_datetime(out, &naive),
      None => {
        let _ = write!(out, "DatetimeMS({})", dt.millis());
      }
    },
    Value::ObjectId(id) => {
      let _ = write!(out, "ObjectId('{}')", id.to_hex());
    }
    Value::Document(doc) => write_record(out, doc),
    Value::Array(items) => {
      out.push('[');
      for (i, item) in items.iter().enumerate() {
        if i > 0 {
          out.push_str(", ");
        }
        write_value(out, item);
      }
      out.push(']');
    }
    Value::Regex(re) => {
      out.push_str("Regex(");
      write_str_literal(out, &re.pattern);
      out.push_str(", ");
      write_str_literal(out, &re.options);
      out.push(')');
    }
    Value::Timestamp(ts) => {
      let _ = write!(out, "Timestamp({}, {})", ts.time, ts.increment);
    }
    Value::Decimal128(d) => {
      let _ = write!(out, "Decimal128('{d}')");
    }
    Value::Code(code) => {
      out.push_str("Code(");
      write_str_literal(out, &code.code);
      out.push_str(", ");
      match &code.scope {
        Some(scope) => write_record(out, scope),
        None => out.push_str("None"),
      }
      out.push(')');
    }
    Value::DbPointer(ptr) => {
      out.push_str("DBRef(");
      write_str_literal(out, &ptr.namespace);
      let _ = write!(out, ", ObjectId('{}'))", ptr.id.to_hex());
    }
    Value::MinKey => out.push_str("MinKey()"),
    Value::MaxKey => out.push_str("MaxKey()"),
  }
}

fn write_datetime(out: &mut String, naive: &chrono::NaiveDateTime) {
  use chrono::{Datelike, Timelike};

  let _ = write!(
    out,
    "datetime.datetime({}, {}, {}, {}, {}",
    naive.year(),
    naive.month(),
    naive.day(),
    naive.hour(),
    naive.minute()
  );
  let micros = naive.nanosecond() / 1_000;
  if naive.second() != 0 || micros != 0 {
    let _ = write!(out, ", {}", naive.second());
  }
  if micros != 0 {
    let _ = write!(out, ", {micros}");
  }
  out.push(')');
}

/// Single quotes unless the text holds a single quote and no double quote.
fn pick_quote(has_single: bool, has_double: bool) -> char {
  if has_single && !has_double { '"' } else { '\'' }
}

fn write_str_literal(out: &mut String, s: &str) {
  let quote = pick_quote(s.contains('\''), s.contains('"'));
  out.push(quote);
  for ch in s.chars() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      c if c == quote => {
        out.push('\\');
        out.push(c);
      }
      c if u32::from(c) < 0x20 || u32::from(c) == 0x7F => {
        let _ = write!(out, "\\x{:02x}", u32::from(c));
      }
      c => out.push(c),
    }
  }
  out.push(quote);
}

fn write_bytes_literal(out: &mut String, bytes: &[u8]) {
  let quote = pick_quote(bytes.contains(&b'\''), bytes.contains(&b'"'));
  out.push('b');
  out.push(quote);
  for &b in bytes {
    match b {
      b'\\' => out.push_str("\\\\"),
      b'\n' => out.push_str("\\n"),
      b'\r' => out.push_str("\\r"),
      b'\t' => out.push_str("\\t"),
      b if char::from(b) == quote => {
        out.push('\\');
        out.push(char::from(b));
      }
      0x20..=0x7E => out.push(char::from(b)),
      _ => {
        let _ = write!(out, "\\x{b:02x}");
      }
    }
  }
  out.push(quote);
}

fn write_binary(out: &mut String, bin: &Binary) {
  // Generic binary is a plain byte string; tagged subtypes keep the tag.
  if bin.subtype == 0 {
    write_bytes_literal(out, &bin.bytes);
  } else {
    out.push_str("Binary(");
    write_bytes_literal(out, &bin.bytes);
    let _ = write!(out, ", {})", bin.subtype);
  }
}

/// Shortest round-trip float text, with a `.0` on integral values and
/// exponent notation outside `1e-4 <= |x| < 1e16`.
#[must_use]
pub fn float_repr(x: f64) -> String {
  if x.is_nan() {
    return "nan".to_string();
  }
  if x.is_infinite() {
    return if x > 0.0 { "inf" } else { "-inf" }.to_string();
  }
  if x == 0.0 {
    return if x.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
  }

  let sci = format!("{x:e}");
  let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
  let exp: i32 = exp.parse().unwrap_or(0);

  if (-4..16).contains(&exp) {
    let plain = format!("{x}");
    if plain.contains('.') { plain } else { format!("{plain}.0") }
  } else {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
  }
}
