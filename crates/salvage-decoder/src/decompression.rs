use std::io::Read;

use flate2::read::MultiGzDecoder;

use crate::error::ArchiveError;

/// Default ceiling on the decompressed archive size (4 GiB).
pub const DEFAULT_MAX_ARCHIVE_SIZE: u64 = 4 * 1024 * 1024 * 1024;

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Outer container compression.
///
/// ```text
/// ┌───────┬───────────────────────────────────────────────────────────┐
/// │ Mode  │ Behaviour                                                 │
/// ├───────┼───────────────────────────────────────────────────────────┤
/// │ Auto  │ sniff the magic bytes; fall back to None                  │
/// │ Gzip  │ gzip, concatenated members read as one stream             │
/// │ Zstd  │ zstd frame(s)                                             │
/// │ None  │ bytes are already the flat document stream               │
/// └───────┴───────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Compression {
    #[default]
    Auto,
    Gzip,
    Zstd,
    None,
}

impl Compression {
    /// Resolve `Auto` by looking at the leading bytes.
    #[must_use]
    pub fn detect(self, bytes: &[u8]) -> Self {
        match self {
            Compression::Auto if bytes.starts_with(&GZIP_MAGIC) => Compression::Gzip,
            Compression::Auto if bytes.starts_with(&ZSTD_MAGIC) => Compression::Zstd,
            Compression::Auto => Compression::None,
            explicit => explicit,
        }
    }
}

/// Decompress the archive into the flat buffer the carver scans.
///
/// Output is capped at `limit` bytes; a stream that would produce more is
/// rejected without buffering the excess.
///
/// # Errors
///
/// - [`ArchiveError::Gzip`] / [`ArchiveError::Zstd`] if the stream is
///   corrupt or truncated.
/// - [`ArchiveError::TooLarge`] if the output would exceed `limit`.
pub fn decompress_archive(
    bytes: &[u8],
    compression: Compression,
    limit: u64,
) -> Result<Vec<u8>, ArchiveError> {
    let resolved = compression.detect(bytes);
    tracing::debug!(?compression, ?resolved, input_len = bytes.len(), "decompressing archive");

    match resolved {
        Compression::Gzip => read_capped(MultiGzDecoder::new(bytes), limit, ArchiveError::Gzip),
        Compression::Zstd => {
            let decoder = zstd::stream::read::Decoder::new(bytes).map_err(ArchiveError::Zstd)?;
            read_capped(decoder, limit, ArchiveError::Zstd)
        }
        Compression::None | Compression::Auto => {
            if bytes.len() as u64 > limit {
                return Err(ArchiveError::TooLarge { limit });
            }
            Ok(bytes.to_vec())
        }
    }
}

fn read_capped(
    reader: impl Read,
    limit: u64,
    wrap: fn(std::io::Error) -> ArchiveError,
) -> Result<Vec<u8>, ArchiveError> {
    let mut out = Vec::new();
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut out)
        .map_err(wrap)?;
    if out.len() as u64 > limit {
        return Err(ArchiveError::TooLarge { limit });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::GzEncoder;

    use super::*;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn detects_by_magic() {
        assert_eq!(Compression::Auto.detect(&[0x1F, 0x8B, 0x08]), Compression::Gzip);
        assert_eq!(Compression::Auto.detect(&ZSTD_MAGIC), Compression::Zstd);
        assert_eq!(Compression::Auto.detect(b"plain"), Compression::None);
        assert_eq!(Compression::Gzip.detect(b"plain"), Compression::Gzip);
    }

    #[test]
    fn gzip_roundtrip() {
        let data = b"document stream".repeat(20);
        let out = decompress_archive(&gzip(&data), Compression::Auto, DEFAULT_MAX_ARCHIVE_SIZE).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn concatenated_gzip_members_are_joined() {
        let mut archive = gzip(b"first-");
        archive.extend(gzip(b"second"));
        let out = decompress_archive(&archive, Compression::Gzip, 1024).unwrap();
        assert_eq!(out, b"first-second");
    }

    #[test]
    fn zstd_roundtrip() {
        let data = b"zstd stream".repeat(50);
        let compressed = zstd::encode_all(data.as_slice(), 3).unwrap();
        let out = decompress_archive(&compressed, Compression::Auto, 1 << 20).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn raw_passthrough() {
        let out = decompress_archive(b"\x05\0\0\0\0", Compression::Auto, 64).unwrap();
        assert_eq!(out, b"\x05\0\0\0\0");
    }

    #[test]
    fn limit_is_enforced() {
        let data = vec![b'x'; 10_000];
        let result = decompress_archive(&gzip(&data), Compression::Gzip, 100);
        assert!(matches!(result, Err(ArchiveError::TooLarge { limit: 100 })));

        let exact = decompress_archive(&gzip(&data), Compression::Gzip, 10_000).unwrap();
        assert_eq!(exact.len(), 10_000);
    }

    #[test]
    fn corrupt_gzip_errors() {
        let mut archive = gzip(b"payload payload payload");
        archive.truncate(archive.len() / 2);
        let result = decompress_archive(&archive, Compression::Gzip, 1024);
        assert!(matches!(result, Err(ArchiveError::Gzip(_))));
    }
}
