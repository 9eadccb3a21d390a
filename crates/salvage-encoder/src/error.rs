/// Errors that can occur while encoding records or building archives.
///
/// Error hierarchy:
///
/// ```text
///   EncodeError
///   ├── DocumentTooLarge   ← encoded document exceeds the 16 MiB frame limit
///   ├── InteriorNul        ← key or regex text contains 0x00
///   └── Io(std::io::Error) ← from the gzip / zstd writers
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("encoded document is {size} bytes, limit {limit}")]
    DocumentTooLarge { size: usize, limit: usize },

    /// C strings cannot carry a NUL byte.
    #[error("{what} contains an interior NUL byte: {text:?}")]
    InteriorNul { what: &'static str, text: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
