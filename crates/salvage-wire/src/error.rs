/// Low-level errors raised while reading little-endian document bytes.
///
/// These never escape the carver: a candidate that fails to read is simply
/// skipped. They surface to callers that drive [`ByteReader`](crate::ByteReader)
/// directly, such as the BSON decoder.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a fixed-width value or C string could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A C string ran to the end of the input without a 0x00 terminator.
    #[error("unterminated C string starting at offset {offset}")]
    UnterminatedCString { offset: usize },

    /// A length prefix was negative or too small to describe its own header.
    #[error("length prefix {length} at offset {offset} is out of range")]
    LengthOutOfRange { offset: usize, length: i32 },
}

// Offsets are always relative to the slice handed to the reader, not to the
// whole archive buffer. The carver knows the absolute position and adds it
// when it logs.
