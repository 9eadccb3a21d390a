use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// A 12-byte document identifier.
///
/// Rendered everywhere as 24 lowercase hex digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
  #[must_use]
  pub fn from_bytes(bytes: [u8; 12]) -> Self {
    Self(bytes)
  }

  #[must_use]
  pub fn bytes(&self) -> [u8; 12] {
    self.0
  }

  #[must_use]
  pub fn to_hex(&self) -> String {
    hex::encode(self.0)
  }

  /// Seconds since the Unix epoch stored in the leading four bytes.
  #[must_use]
  pub fn timestamp(&self) -> u32 {
    u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
  }
}

impl FromStr for ObjectId {
  type Err = TypeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut bytes = [0u8; 12];
    hex::decode_to_slice(s, &mut bytes).map_err(|_| TypeError::InvalidObjectId {
      input: s.to_string(),
    })?;
    Ok(Self(bytes))
  }
}

impl fmt::Display for ObjectId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_hex())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hex_roundtrip() {
    let id: ObjectId = "5f1e2d3c4b5a69788796a5b4".parse().unwrap();
    assert_eq!(id.to_hex(), "5f1e2d3c4b5a69788796a5b4");
    assert_eq!(id.to_string(), "5f1e2d3c4b5a69788796a5b4");
  }

  #[test]
  fn timestamp_is_big_endian_prefix() {
    let id = ObjectId::from_bytes([0x5F, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(id.timestamp(), 0x5F00_0001);
  }

  #[test]
  fn rejects_bad_hex() {
    assert!("zz".parse::<ObjectId>().is_err());
    assert!("5f1e2d3c4b5a69788796a5".parse::<ObjectId>().is_err());
  }
}
