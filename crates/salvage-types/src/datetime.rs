use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::error::TypeError;

/// A UTC instant stored as milliseconds since the Unix epoch.
///
/// Recovered timestamps are naive (no offset is ever written). Rendering
/// follows the ISO-8601 shape `YYYY-MM-DDTHH:MM:SS`, with a six-digit
/// fraction appended only when the sub-second part is non-zero:
///
/// ```text
///   1_600_000_000_000  →  2020-09-13T12:26:40
///   1_600_000_000_123  →  2020-09-13T12:26:40.123000
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateTime(i64);

impl DateTime {
  #[must_use]
  pub fn from_millis(millis: i64) -> Self {
    Self(millis)
  }

  /// Like [`from_millis`](Self::from_millis), but refuses instants that
  /// fall outside years 1 through 9999.
  ///
  /// # Errors
  ///
  /// [`TypeError::DateTimeOutOfRange`] when the instant has no four-digit
  /// calendar rendering.
  pub fn checked(millis: i64) -> Result<Self, TypeError> {
    let dt = Self(millis);
    match dt.to_naive() {
      Some(_) => Ok(dt),
      None => Err(TypeError::DateTimeOutOfRange { millis }),
    }
  }

  #[must_use]
  pub fn millis(&self) -> i64 {
    self.0
  }

  /// The calendar date-time, or `None` outside years 1..=9999.
  #[must_use]
  pub fn to_naive(&self) -> Option<NaiveDateTime> {
    chrono::DateTime::from_timestamp_millis(self.0)
      .map(|utc| utc.naive_utc())
      .filter(|naive| (1..=9999).contains(&naive.year()))
  }

  /// ISO-8601 rendering with a `T` separator, or `None` if out of range.
  #[must_use]
  pub fn iso_format(&self) -> Option<String> {
    self.to_naive().map(|naive| render(&naive, 'T'))
  }

  /// Same as [`iso_format`](Self::iso_format) but with a space separator.
  #[must_use]
  pub fn spaced_format(&self) -> Option<String> {
    self.to_naive().map(|naive| render(&naive, ' '))
  }
}

fn render(naive: &NaiveDateTime, sep: char) -> String {
  let mut out = naive.format(&format!("%Y-%m-%d{sep}%H:%M:%S")).to_string();
  let micros = naive.nanosecond() / 1_000;
  if micros != 0 {
    out.push_str(&format!(".{micros:06}"));
  }
  out
}
