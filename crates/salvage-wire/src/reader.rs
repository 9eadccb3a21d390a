use crate::error::WireError;

/// Cursor over a byte slice for little-endian fixed-width reads.
///
/// Every read either consumes exactly the bytes it needs and advances the
/// cursor, or fails with [`WireError::UnexpectedEof`] and leaves the cursor
/// where it was. Nothing here panics on short input.
///
/// ```text
///   let mut r = ByteReader::new(bytes);
///   let len  = r.read_i32()?;     // pos += 4
///   let tag  = r.read_u8()?;      // pos += 1
///   let key  = r.read_cstr()?;    // pos += key.len() + 1
/// ```
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the slice.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Consume the next `n` bytes.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than `n` bytes remain.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or(WireError::UnexpectedEof { offset: self.pos })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Consume exactly `N` bytes into an array.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than `N` bytes remain.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] at end of input.
    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_i32(&mut self) -> Result<i32, WireError> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_u32(&mut self) -> Result<u32, WireError> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 8 bytes remain.
    pub fn read_i64(&mut self) -> Result<i64, WireError> {
        self.read_array().map(i64::from_le_bytes)
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 8 bytes remain.
    pub fn read_f64(&mut self) -> Result<f64, WireError> {
        self.read_array().map(f64::from_le_bytes)
    }

    /// Read a length prefix that must be at least `min` and return it as
    /// a `usize`.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
    /// - [`WireError::LengthOutOfRange`] if the prefix is below `min`.
    pub fn read_len(&mut self, min: i32) -> Result<usize, WireError> {
        let offset = self.pos;
        let length = self.read_i32()?;
        if length < min {
            self.pos = offset;
            return Err(WireError::LengthOutOfRange { offset, length });
        }
        usize::try_from(length).map_err(|_| WireError::LengthOutOfRange { offset, length })
    }

    /// Consume a NUL-terminated byte string and return it without the NUL.
    ///
    /// # Errors
    ///
    /// [`WireError::UnterminatedCString`] if no 0x00 byte remains.
    pub fn read_cstr(&mut self) -> Result<&'a [u8], WireError> {
        let start = self.pos;
        let rest = &self.buf[start..];
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(WireError::UnterminatedCString { offset: start })?;
        self.pos = start + nul + 1;
        Ok(&rest[..nul])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_values_in_sequence() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(-2i32).to_le_bytes());
        buf.extend_from_slice(&0x0102_0304_0506_0708i64.to_le_bytes());
        buf.extend_from_slice(&1.5f64.to_le_bytes());
        buf.push(0x7F);

        let mut r = ByteReader::new(&buf);
        assert_eq!(r.read_i32().unwrap(), -2);
        assert_eq!(r.read_i64().unwrap(), 0x0102_0304_0506_0708);
        assert!((r.read_f64().unwrap() - 1.5).abs() < f64::EPSILON);
        assert_eq!(r.read_u8().unwrap(), 0x7F);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn short_read_reports_offset_and_keeps_cursor() {
        let buf = [0x01, 0x02, 0x03, 0x04, 0x05];
        let mut r = ByteReader::new(&buf);
        r.read_u8().unwrap();
        let err = r.read_i64().unwrap_err();
        assert!(matches!(err, WireError::UnexpectedEof { offset: 1 }));
        assert_eq!(r.position(), 1);
        assert_eq!(r.read_i32().unwrap(), i32::from_le_bytes([2, 3, 4, 5]));
    }

    #[test]
    fn cstr_stops_at_nul() {
        let buf = b"name\0rest";
        let mut r = ByteReader::new(buf);
        assert_eq!(r.read_cstr().unwrap(), b"name");
        assert_eq!(r.position(), 5);
        assert_eq!(r.read_bytes(4).unwrap(), b"rest");
    }

    #[test]
    fn empty_cstr() {
        let mut r = ByteReader::new(b"\0");
        assert_eq!(r.read_cstr().unwrap(), b"");
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn unterminated_cstr_errors() {
        let mut r = ByteReader::new(b"abc");
        assert!(matches!(
            r.read_cstr(),
            Err(WireError::UnterminatedCString { offset: 0 })
        ));
    }

    #[test]
    fn read_len_rejects_small_and_negative() {
        let buf = 3i32.to_le_bytes();
        let mut r = ByteReader::new(&buf);
        assert!(matches!(
            r.read_len(5),
            Err(WireError::LengthOutOfRange { offset: 0, length: 3 })
        ));
        assert_eq!(r.position(), 0);

        let buf = (-7i32).to_le_bytes();
        let mut r = ByteReader::new(&buf);
        assert!(r.read_len(0).is_err());
    }

    #[test]
    fn read_bytes_huge_length_does_not_overflow() {
        let mut r = ByteReader::new(&[1, 2, 3]);
        r.read_u8().unwrap();
        assert!(r.read_bytes(usize::MAX).is_err());
    }
}
