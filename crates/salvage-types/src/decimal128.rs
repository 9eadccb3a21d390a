use std::fmt;

/// Exponent bias of the 128-bit decimal format.
const EXPONENT_BIAS: i32 = 6176;

/// Largest canonical significand, 10^34 - 1.
const MAX_SIGNIFICAND: u128 = 9_999_999_999_999_999_999_999_999_999_999_999;

/// A 128-bit IEEE 754-2008 decimal in binary integer decimal encoding.
///
/// Only rendering is supported; the value is kept as its raw 16
/// little-endian bytes.
///
/// ```text
///   high u64 (bytes 8..16)                         low u64 (bytes 0..8)
///   ┌───┬─────────────┬──────────────┬──────────────────────────────────┐
///   │ s │ combination │ exponent ... │ significand (113 bits)            │
///   └───┴─────────────┴──────────────┴──────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decimal128([u8; 16]);

impl Decimal128 {
  #[must_use]
  pub fn from_bytes(bytes: [u8; 16]) -> Self {
    Self(bytes)
  }

  #[must_use]
  pub fn bytes(&self) -> [u8; 16] {
    self.0
  }

  fn halves(&self) -> (u64, u64) {
    let mut low = [0u8; 8];
    let mut high = [0u8; 8];
    low.copy_from_slice(&self.0[..8]);
    high.copy_from_slice(&self.0[8..]);
    (u64::from_le_bytes(high), u64::from_le_bytes(low))
  }
}

impl fmt::Display for Decimal128 {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let (high, low) = self.halves();
    let negative = high >> 63 == 1;
    let combination = (high >> 58) & 0x1F;

    if combination == 0x1F {
      return f.write_str("NaN");
    }
    let sign = if negative { "-" } else { "" };
    if combination == 0x1E {
      return write!(f, "{sign}Infinity");
    }

    // The two "11" combination prefixes move the exponent two bits right
    // and imply a significand above 10^34, which is non-canonical and
    // reads as zero.
    let (biased, significand) = if combination >> 3 == 0b11 {
      ((high >> 47) & 0x3FFF, 0u128)
    } else {
      let coefficient_high = u128::from(high & 0x0001_FFFF_FFFF_FFFF);
      let significand = (coefficient_high << 64) | u128::from(low);
      ((high >> 49) & 0x3FFF, significand)
    };
    let significand = if significand > MAX_SIGNIFICAND { 0 } else { significand };

    // 14 bits always fit in i32.
    let exponent = i32::try_from(biased).unwrap_or(0) - EXPONENT_BIAS;
    let digits = significand.to_string();
    let ndigits = i32::try_from(digits.len()).unwrap_or(i32::MAX);
    let adjusted = exponent + ndigits - 1;

    f.write_str(sign)?;
    if exponent > 0 || adjusted < -6 {
      let (first, rest) = digits.split_at(1);
      f.write_str(first)?;
      if !rest.is_empty() {
        write!(f, ".{rest}")?;
      }
      let exp_sign = if adjusted >= 0 { "+" } else { "-" };
      return write!(f, "E{exp_sign}{}", adjusted.unsigned_abs());
    }

    if exponent == 0 {
      return f.write_str(&digits);
    }

    let scale = exponent.unsigned_abs() as usize;
    if digits.len() > scale {
      let (int_part, frac_part) = digits.split_at(digits.len() - scale);
      write!(f, "{int_part}.{frac_part}")
    } else {
      write!(f, "0.{}{digits}", "0".repeat(scale - digits.len()))
    }
  }
}
