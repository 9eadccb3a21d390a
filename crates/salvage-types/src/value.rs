use crate::datetime::DateTime;
use crate::decimal128::Decimal128;
use crate::object_id::ObjectId;
use crate::record::Record;

/// A single decoded field value.
///
/// The first ten variants are the value kinds the classifier and the JSON
/// output care about. The rest exist so that documents carrying rarer
/// element types still decode instead of being rejected as noise.
///
/// ```text
/// ┌────────────┬──────────────────────────────┬────────────────────────┐
/// │ Variant    │ Decoded from                 │ JSON rendering         │
/// ├────────────┼──────────────────────────────┼────────────────────────┤
/// │ Null       │ null, undefined              │ null                   │
/// │ Bool       │ boolean                      │ true / false           │
/// │ Int        │ int32, int64                 │ number                 │
/// │ Double     │ double                       │ number (null if !fin.) │
/// │ String     │ string, symbol               │ string                 │
/// │ Binary     │ binary                       │ lossy UTF-8 string     │
/// │ DateTime   │ UTC datetime                 │ ISO-8601 string        │
/// │ ObjectId   │ ObjectId                     │ 24-digit hex string    │
/// │ Document   │ embedded document            │ object                 │
/// │ Array      │ array                        │ array                  │
/// │ Regex      │ regex                        │ {"$regularExpression"} │
/// │ Timestamp  │ timestamp                    │ {"$timestamp"}         │
/// │ Decimal128 │ decimal128                   │ {"$numberDecimal"}     │
/// │ Code       │ code, code with scope        │ {"$code", "$scope"}    │
/// │ DbPointer  │ DBPointer                    │ {"$dbPointer"}         │
/// │ MinKey     │ min key                      │ {"$minKey": 1}         │
/// │ MaxKey     │ max key                      │ {"$maxKey": 1}         │
/// └────────────┴──────────────────────────────┴────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
  Null,
  Bool(bool),
  Int(i64),
  Double(f64),
  String(String),
  Binary(Binary),
  DateTime(DateTime),
  ObjectId(ObjectId),
  Document(Record),
  Array(Vec<Value>),
  Regex(Regex),
  Timestamp(Timestamp),
  Decimal128(Decimal128),
  Code(Code),
  DbPointer(DbPointer),
  MinKey,
  MaxKey,
}

/// Raw bytes with their one-byte subtype tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binary {
  pub subtype: u8,
  pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Regex {
  pub pattern: String,
  pub options: String,
}

/// Internal replication timestamp: seconds plus an ordinal within the second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamp {
  pub time: u32,
  pub increment: u32,
}

/// JavaScript source, optionally with a scope document.
#[derive(Clone, Debug, PartialEq)]
pub struct Code {
  pub code: String,
  pub scope: Option<Record>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DbPointer {
  pub namespace: String,
  pub id: ObjectId,
}

impl Value {
  /// Short kind name, used in diagnostics.
  #[must_use]
  pub fn kind(&self) -> &'static str {
    match self {
      Value::Null => "null",
      Value::Bool(_) => "bool",
      Value::Int(_) => "int",
      Value::Double(_) => "double",
      Value::String(_) => "string",
      Value::Binary(_) => "binary",
      Value::DateTime(_) => "datetime",
      Value::ObjectId(_) => "objectId",
      Value::Document(_) => "document",
      Value::Array(_) => "array",
      Value::Regex(_) => "regex",
      Value::Timestamp(_) => "timestamp",
      Value::Decimal128(_) => "decimal",
      Value::Code(_) => "code",
      Value::DbPointer(_) => "dbPointer",
      Value::MinKey => "minKey",
      Value::MaxKey => "maxKey",
    }
  }

  #[must_use]
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::String(s) => Some(s),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_document(&self) -> Option<&Record> {
    match self {
      Value::Document(doc) => Some(doc),
      _ => None,
    }
  }
}

// ── Conversions used by builders and tests ───────────────────────────────────

impl From<bool> for Value {
  fn from(v: bool) -> Self {
    Value::Bool(v)
  }
}

impl From<i32> for Value {
  fn from(v: i32) -> Self {
    Value::Int(i64::from(v))
  }
}

impl From<i64> for Value {
  fn from(v: i64) -> Self {
    Value::Int(v)
  }
}

impl From<f64> for Value {
  fn from(v: f64) -> Self {
    Value::Double(v)
  }
}

impl From<&str> for Value {
  fn from(v: &str) -> Self {
    Value::String(v.to_string())
  }
}

impl From<String> for Value {
  fn from(v: String) -> Self {
    Value::String(v)
  }
}

impl From<ObjectId> for Value {
  fn from(v: ObjectId) -> Self {
    Value::ObjectId(v)
  }
}

impl From<DateTime> for Value {
  fn from(v: DateTime) -> Self {
    Value::DateTime(v)
  }
}

impl From<Record> for Value {
  fn from(v: Record) -> Self {
    Value::Document(v)
  }
}

impl From<Vec<Value>> for Value {
  fn from(v: Vec<Value>) -> Self {
    Value::Array(v)
  }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(v: Option<T>) -> Self {
    v.map_or(Value::Null, Into::into)
  }
}
