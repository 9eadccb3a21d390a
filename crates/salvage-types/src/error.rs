/// Errors raised while constructing or interpreting record values.
///
/// These sit above the byte layer: the bytes were readable, but what they
/// describe is not a value this crate can represent.
///
/// ```text
/// ┌──────────────────────────┬─────────────────────────────────────────┐
/// │ Variant                  │ Cause                                   │
/// ├──────────────────────────┼─────────────────────────────────────────┤
/// │ InvalidObjectId          │ hex text is not 24 hex digits           │
/// │ DateTimeOutOfRange       │ millis fall outside years 1..=9999      │
/// └──────────────────────────┴─────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
  #[error("invalid ObjectId hex string: {input:?}")]
  InvalidObjectId { input: String },

  /// The datetime cannot be rendered as a calendar date.
  ///
  /// Recovered dumps are rendered with four-digit years, so anything
  /// outside `0001-01-01 ..= 9999-12-31` is rejected at decode time.
  #[error("datetime {millis} ms since epoch is out of range")]
  DateTimeOutOfRange { millis: i64 },
}
