use salvage_types::TypeError;
use salvage_wire::WireError;

/// Errors raised while decoding one candidate document.
///
/// The carver treats every variant the same way (skip one byte and keep
/// scanning); the distinctions exist for tests, fuzzing and debug logs.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── SizeMismatch           ← outer length prefix ≠ slice length
///   ├── MissingTerminator      ← document or sub-document not 0x00-terminated
///   ├── UnknownElementType     ← element tag outside the known set (incl. 0x00)
///   ├── InvalidUtf8            ← key or string bytes are not UTF-8
///   ├── InvalidBoolean         ← boolean byte other than 0x00 / 0x01
///   ├── InvalidStringLength    ← string length < 1 or missing trailing NUL
///   ├── InvalidBinaryLength    ← old-style binary inner length disagrees
///   ├── InvalidCodeWithScope   ← code-with-scope total length disagrees
///   ├── TooDeep                ← nesting exceeds the recursion limit
///   ├── Type(TypeError)        ← value out of range (e.g. datetime year)
///   └── Wire(WireError)        ← truncated read inside the document
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("document declares {declared} bytes but slice holds {actual}")]
    SizeMismatch { declared: i32, actual: usize },

    #[error("missing 0x00 terminator for document ending at offset {offset}")]
    MissingTerminator { offset: usize },

    #[error("unknown element type {tag:#04X} at offset {offset}")]
    UnknownElementType { tag: u8, offset: usize },

    #[error("invalid UTF-8 at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("invalid boolean byte {value:#04X} at offset {offset}")]
    InvalidBoolean { value: u8, offset: usize },

    #[error("invalid string length at offset {offset}")]
    InvalidStringLength { offset: usize },

    #[error("binary inner length disagrees with outer length at offset {offset}")]
    InvalidBinaryLength { offset: usize },

    #[error("code-with-scope length disagrees with its contents at offset {offset}")]
    InvalidCodeWithScope { offset: usize },

    #[error("documents nested deeper than {max} levels")]
    TooDeep { max: usize },

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Wire(#[from] WireError),
}

/// Errors raised while turning the archive file into a flat buffer.
///
/// ```text
/// ┌───────────┬──────────────────────────────────────────────────────┐
/// │ Variant   │ Cause                                                │
/// ├───────────┼──────────────────────────────────────────────────────┤
/// │ Gzip      │ gzip stream is corrupt or truncated                  │
/// │ Zstd      │ zstd frame is corrupt or truncated                   │
/// │ TooLarge  │ decompressed output passed the configured ceiling    │
/// └───────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("gzip decompression failed: {0}")]
    Gzip(#[source] std::io::Error),

    #[error("zstd decompression failed: {0}")]
    Zstd(#[source] std::io::Error),

    /// Prevents decompression bombs from exhausting memory.
    #[error("decompressed archive exceeds limit of {limit} bytes")]
    TooLarge { limit: u64 },
}
