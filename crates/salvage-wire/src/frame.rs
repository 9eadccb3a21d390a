/// Smallest well-formed document: a 4-byte length prefix and the terminator.
pub const MIN_DOCUMENT_LEN: i32 = 5;

/// Largest document the carver will consider (16 MiB).
///
/// This matches the server-side BSON size ceiling, so anything longer read
/// from a length prefix is random bytes rather than a real document.
pub const MAX_DOCUMENT_LEN: i32 = 16 * 1024 * 1024;

/// Every document ends with this byte.
pub const DOCUMENT_TERMINATOR: u8 = 0x00;

/// Size of the little-endian length prefix that opens every document.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// A proposed document boundary, not yet decoded.
///
/// ```text
///   buffer:  ... ┌────────────┬──────────────────────────┬──────┐ ...
///                │ len (i32)  │ elements                 │ 0x00 │
///                └────────────┴──────────────────────────┴──────┘
///                ^ offset                                       ^ offset + len
/// ```
///
/// A `Candidate` returned by [`Candidate::probe`] has already passed every
/// structural check that does not require decoding: the length is in range,
/// the span fits inside the buffer, and the final byte is the terminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Absolute offset of the length prefix inside the scanned buffer.
    pub offset: usize,

    /// Declared document length, including the prefix and the terminator.
    pub len: usize,
}

/// Why a position in the buffer does not start a plausible document.
///
/// These are verdicts, not errors: the carver counts them and moves on by a
/// single byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Fewer than four bytes remain at the probed offset.
    Truncated,

    /// The declared length is below [`MIN_DOCUMENT_LEN`] or above
    /// [`MAX_DOCUMENT_LEN`].
    LengthOutOfRange(i32),

    /// The declared span would run past the end of the buffer.
    Overrun,

    /// The last byte of the declared span is not [`DOCUMENT_TERMINATOR`].
    MissingTerminator,
}

impl Candidate {
    /// Probe `buf` at `offset` for a document boundary.
    ///
    /// Checks are applied in a fixed order (prefix readable, length range,
    /// overrun, terminator) and the first failing check decides the
    /// rejection reason.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] describing the first check that failed.
    pub fn probe(buf: &[u8], offset: usize) -> Result<Self, Rejection> {
        let prefix = offset
            .checked_add(LENGTH_PREFIX_SIZE)
            .and_then(|end| buf.get(offset..end))
            .ok_or(Rejection::Truncated)?;
        let declared = i32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]);

        if !(MIN_DOCUMENT_LEN..=MAX_DOCUMENT_LEN).contains(&declared) {
            return Err(Rejection::LengthOutOfRange(declared));
        }

        // In range, so strictly positive and fits in usize.
        let len = declared.unsigned_abs() as usize;
        let end = offset.checked_add(len).ok_or(Rejection::Overrun)?;
        if end > buf.len() {
            return Err(Rejection::Overrun);
        }

        if buf[end - 1] != DOCUMENT_TERMINATOR {
            return Err(Rejection::MissingTerminator);
        }

        Ok(Self { offset, len })
    }

    /// The exclusive end offset of the candidate span.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Borrow the candidate's bytes out of the buffer it was probed in.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is not the buffer (or a prefix-compatible copy of
    /// the buffer) the candidate was probed in.
    #[must_use]
    pub fn bytes<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.offset..self.end()]
    }
}
