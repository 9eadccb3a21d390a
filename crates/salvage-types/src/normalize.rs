//! Normalization of record values into the JSON output encoding.
//!
//! Implemented as [`Serialize`] so records stream straight into
//! `serde_json` writers without an intermediate tree. [`to_json`] builds
//! that tree when a caller wants one.
//!
//! ```text
//! ┌────────────┬─────────────────────────────────────────────────────────┐
//! │ Value      │ JSON                                                    │
//! ├────────────┼─────────────────────────────────────────────────────────┤
//! │ ObjectId   │ "5f1e2d3c4b5a69788796a5b4"                              │
//! │ DateTime   │ "2020-09-13T12:26:40.123000" (millis if out of range)   │
//! │ Binary     │ lossy UTF-8 text of the bytes                           │
//! │ Double     │ number, null when NaN or infinite                       │
//! │ Regex      │ {"$regularExpression": {"pattern", "options"}}          │
//! │ Timestamp  │ {"$timestamp": {"t", "i"}}                              │
//! │ Decimal128 │ {"$numberDecimal": "1.5"}                               │
//! │ Code       │ {"$code": "..."} plus "$scope" when present             │
//! │ DbPointer  │ {"$dbPointer": {"$ref", "$id"}}                         │
//! │ Min/MaxKey │ {"$minKey": 1} / {"$maxKey": 1}                         │
//! │ others     │ unchanged                                               │
//! └────────────┴─────────────────────────────────────────────────────────┘
//! ```

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::record::Record;
use crate::value::Value;

/// Build the normalized JSON tree for a record.
///
/// # Errors
///
/// Propagates [`serde_json::Error`]; with the value kinds defined here it
/// does not fail in practice.
pub fn to_json(record: &Record) -> Result<serde_json::Value, serde_json::Error> {
  serde_json::to_value(record)
}

impl Serialize for Record {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.len()))?;
    for (key, value) in self.iter() {
      map.serialize_entry(key, value)?;
    }
    map.end()
  }
}

/// One-entry map `{ key: value }`.
fn single<S: Serializer, V: Serialize + ?Sized>(
  serializer: S,
  key: &str,
  value: &V,
) -> Result<S::Ok, S::Error> {
  let mut map = serializer.serialize_map(Some(1))?;
  map.serialize_entry(key, value)?;
  map.end()
}

impl Serialize for Value {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Value::Null => serializer.serialize_unit(),
      Value::Bool(b) => serializer.serialize_bool(*b),
      Value::Int(n) => serializer.serialize_i64(*n),
      Value::Double(x) if x.is_finite() => serializer.serialize_f64(*x),
      Value::Double(_) => serializer.serialize_unit(),
      Value::String(s) => serializer.serialize_str(s),
      Value::Binary(bin) => serializer.serialize_str(&String::from_utf8_lossy(&bin.bytes)),
      Value::DateTime(dt) => match dt.iso_format() {
        Some(iso) => serializer.serialize_str(&iso),
        None => serializer.serialize_i64(dt.millis()),
      },
      Value::ObjectId(id) => serializer.serialize_str(&id.to_hex()),
      Value::Document(doc) => doc.serialize(serializer),
      Value::Array(items) => {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
          seq.serialize_element(item)?;
        }
        seq.end()
      }
      Value::Regex(re) => {
        let inner: Record = [("pattern", re.pattern.as_str()), ("options", re.options.as_str())]
          .into_iter()
          .collect();
        single(serializer, "$regularExpression", &inner)
      }
      Value::Timestamp(ts) => {
        let inner = Record::new()
          .with("t", i64::from(ts.time))
          .with("i", i64::from(ts.increment));
        single(serializer, "$timestamp", &inner)
      }
      Value::Decimal128(d) => single(serializer, "$numberDecimal", &d.to_string()),
      Value::Code(code) => {
        let len = if code.scope.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("$code", &code.code)?;
        if let Some(scope) = &code.scope {
          map.serialize_entry("$scope", scope)?;
        }
        map.end()
      }
      Value::DbPointer(ptr) => {
        let inner = Record::new()
          .with("$ref", ptr.namespace.as_str())
          .with("$id", ptr.id);
        single(serializer, "$dbPointer", &inner)
      }
      Value::MinKey => single(serializer, "$minKey", &1),
      Value::MaxKey => single(serializer, "$maxKey", &1),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::datetime::DateTime;
  use crate::decimal128::Decimal128;
  use crate::object_id::ObjectId;
  use crate::value::{Binary, Code, Regex, Timestamp};

  #[test]
  fn scalar_kinds_become_json_primitives() {
    let id: ObjectId = "5f1e2d3c4b5a69788796a5b4".parse().unwrap();
    let record = Record::new()
      .with("_id", id)
      .with("created_at", DateTime::from_millis(1_600_000_000_123))
      .with("avatar", Value::Binary(Binary { subtype: 0, bytes: b"img\xff".to_vec() }))
      .with("score", 2.5)
      .with("bad", f64::NAN)
      .with("n", 7);

    assert_eq!(
      to_json(&record).unwrap(),
      json!({
        "_id": "5f1e2d3c4b5a69788796a5b4",
        "created_at": "2020-09-13T12:26:40.123000",
        "avatar": "img\u{FFFD}",
        "score": 2.5,
        "bad": null,
        "n": 7
      })
    );
  }

  #[test]
  fn nested_values_normalize_recursively() {
    let id: ObjectId = "000000000000000000000001".parse().unwrap();
    let record = Record::new().with(
      "profile",
      Record::new().with("ids", vec![Value::ObjectId(id), Value::Null]),
    );
    assert_eq!(
      to_json(&record).unwrap(),
      json!({ "profile": { "ids": ["000000000000000000000001", null] } })
    );
  }

  #[test]
  fn field_order_is_preserved() {
    let record = Record::new().with("z", 1).with("a", 2).with("m", 3);
    let text = serde_json::to_string(&record).unwrap();
    assert_eq!(text, r#"{"z":1,"a":2,"m":3}"#);
  }

  #[test]
  fn extended_kinds_use_wrapper_objects() {
    let record = Record::new()
      .with("re", Value::Regex(Regex { pattern: "^a".into(), options: "i".into() }))
      .with("ts", Value::Timestamp(Timestamp { time: 10, increment: 2 }))
      .with("dec", Value::Decimal128(Decimal128::from_bytes({
        let mut b = [0u8; 16];
        b[0] = 15;
        b[14] = 0x3E; // biased exponent 6175 → 10^-1
        b[15] = 0x30;
        b
      })))
      .with("js", Value::Code(Code { code: "f()".into(), scope: None }))
      .with("lo", Value::MinKey);

    assert_eq!(
      to_json(&record).unwrap(),
      json!({
        "re": { "$regularExpression": { "pattern": "^a", "options": "i" } },
        "ts": { "$timestamp": { "t": 10, "i": 2 } },
        "dec": { "$numberDecimal": "1.5" },
        "js": { "$code": "f()" },
        "lo": { "$minKey": 1 }
      })
    );
  }

  #[test]
  fn non_ascii_text_is_written_literally() {
    let record = Record::new().with("name", "Café Ñandú");
    let text = serde_json::to_string(&record).unwrap();
    assert_eq!(text, "{\"name\":\"Café Ñandú\"}");
  }
}
