use indexmap::IndexMap;

use crate::field_view::FieldView;
use crate::repr;
use crate::value::Value;

/// An ordered mapping from field name to [`Value`] with unique keys.
///
/// Field order is insertion order. Inserting a key that already exists
/// keeps the key at its original position and replaces the value, which
/// is how duplicate keys inside a decoded document resolve: first position,
/// last value. Lookups and inserts are hashed, so decoding a document is
/// linear in its field count.
///
/// Equality compares fields in order.
///
/// ```text
///   Record
///   ├── "_id"        → ObjectId(5f1e…)
///   ├── "email"      → String("ada@example.com")
///   └── "first_name" → String("Ada")
/// ```
#[derive(Clone, Debug, Default)]
pub struct Record {
  fields: IndexMap<String, Value>,
}

impl Record {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      fields: IndexMap::with_capacity(capacity),
    }
  }

  /// Insert or replace a field, returning the previous value if any.
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
    self.fields.insert(key.into(), value.into())
  }

  /// Builder-style [`insert`](Self::insert).
  #[must_use]
  pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
    self.insert(key, value);
    self
  }

  #[must_use]
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.fields.get(key)
  }

  #[must_use]
  pub fn contains_key(&self, key: &str) -> bool {
    self.fields.contains_key(key)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.fields.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.fields.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.fields.iter().map(|(k, v)| (k.as_str(), v))
  }
}

impl PartialEq for Record {
  fn eq(&self, other: &Self) -> bool {
    self.len() == other.len() && self.iter().eq(other.iter())
  }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut record = Record::new();
    for (k, v) in iter {
      record.insert(k, v);
    }
    record
  }
}

impl FieldView for Record {
  fn has_field(&self, name: &str) -> bool {
    self.contains_key(name)
  }

  fn field_count(&self) -> usize {
    self.len()
  }

  fn field_names(&self) -> impl Iterator<Item = &str> {
    self.keys()
  }

  fn field_text(&self, name: &str) -> Option<String> {
    self.get(name).map(repr::text)
  }

  fn text(&self) -> String {
    repr::record_repr(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn preserves_insertion_order() {
    let record = Record::new().with("b", 1).with("a", 2).with("c", 3);
    assert_eq!(record.keys().collect::<Vec<_>>(), ["b", "a", "c"]);
  }

  #[test]
  fn duplicate_key_keeps_position_and_takes_last_value() {
    let mut record = Record::new().with("x", 1).with("y", 2);
    let previous = record.insert("x", 9);
    assert_eq!(previous, Some(Value::Int(1)));
    assert_eq!(record.len(), 2);
    assert_eq!(record.keys().collect::<Vec<_>>(), ["x", "y"]);
    assert_eq!(record.get("x"), Some(&Value::Int(9)));
  }

  #[test]
  fn from_iterator_dedups() {
    let record: Record = [("k", 1), ("k", 2)].into_iter().collect();
    assert_eq!(record.len(), 1);
    assert_eq!(record.get("k"), Some(&Value::Int(2)));
  }

  #[test]
  fn equality_is_order_sensitive() {
    let ab = Record::new().with("a", 1).with("b", 2);
    let ba = Record::new().with("b", 2).with("a", 1);
    assert_ne!(ab, ba);
    assert_eq!(ab, Record::new().with("a", 1).with("b", 2));
  }

  #[test]
  fn field_view_reports_presence_and_count() {
    let record = Record::new().with("_id", 1).with("name", "admin");
    assert!(record.has_field("name"));
    assert!(!record.has_field("type"));
    assert_eq!(record.field_count(), 2);
    assert!(record.has_exactly(&["name", "_id"]));
    assert!(!record.has_exactly(&["_id", "name", "type"]));
  }

  #[test]
  fn field_text_of_string_is_raw() {
    let record = Record::new().with("metadata", "indexes: 3");
    assert_eq!(record.field_text("metadata").as_deref(), Some("indexes: 3"));
    assert_eq!(record.field_text("missing"), None);
  }
}
