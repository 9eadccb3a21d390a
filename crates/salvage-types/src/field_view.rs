/// Read-only view of a document as an ordered set of named fields.
///
/// This is the only surface the classifier sees. It says nothing about how
/// values are stored, so any decoder's output can be routed as long as it
/// can answer these questions.
///
/// Implementations must have unique field names; [`has_exactly`] relies on
/// it.
///
/// [`has_exactly`]: FieldView::has_exactly
pub trait FieldView {
  fn has_field(&self, name: &str) -> bool;

  fn field_count(&self) -> usize;

  fn field_names(&self) -> impl Iterator<Item = &str>;

  /// Text rendering of one field's value, or `None` if the field is absent.
  ///
  /// A string value renders as itself; anything else renders as a literal
  /// (see [`repr`](crate::repr)).
  fn field_text(&self, name: &str) -> Option<String>;

  /// Literal rendering of the whole document.
  fn text(&self) -> String;

  /// True when the field-name set equals `names` exactly.
  ///
  /// `names` must not contain duplicates.
  fn has_exactly(&self, names: &[&str]) -> bool {
    self.field_count() == names.len() && names.iter().all(|name| self.has_field(name))
  }
}
