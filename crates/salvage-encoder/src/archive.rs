use std::io::Write;

use flate2::write::GzEncoder;
use salvage_types::Record;

use crate::bson::BsonEncoder;
use crate::error::EncodeError;

/// Leading magic of a `mongodump --archive` stream.
pub const DUMP_ARCHIVE_MAGIC: [u8; 4] = [0x6D, 0xE2, 0x99, 0x81];

/// Block terminator between namespaces in a dump archive.
pub const DUMP_BLOCK_TERMINATOR: [u8; 4] = [0xFF; 4];

const ZSTD_LEVEL: i32 = 3;

enum Part {
    Record(Record),
    Raw(Vec<u8>),
}

/// Builder for synthetic archives: encoded documents interleaved with
/// arbitrary bytes, optionally gzip- or zstd-compressed.
///
/// Records are encoded when the archive is finished, so the first
/// encoding error surfaces from `finish*`.
///
/// # Example
///
/// ```rust
/// use salvage_encoder::ArchiveBuilder;
/// use salvage_types::Record;
///
/// let archive = ArchiveBuilder::new()
///     .add_raw(&[0xDE, 0xAD])
///     .add_record(Record::new().with("email", "a@b.c"))
///     .finish()
///     .unwrap();
/// assert_eq!(&archive[..2], &[0xDE, 0xAD]);
/// ```
#[derive(Default)]
pub struct ArchiveBuilder {
    encoder: BsonEncoder,
    parts: Vec<Part>,
}

impl ArchiveBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one document.
    pub fn add_record(&mut self, record: Record) -> &mut Self {
        self.parts.push(Part::Record(record));
        self
    }

    pub fn add_records(&mut self, records: impl IntoIterator<Item = Record>) -> &mut Self {
        self.parts
            .extend(records.into_iter().map(Part::Record));
        self
    }

    /// Append bytes verbatim (noise, headers, torn fragments).
    pub fn add_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.parts.push(Part::Raw(bytes.to_vec()));
        self
    }

    /// Append the dump archive magic, the way a real archive starts.
    pub fn add_dump_header(&mut self) -> &mut Self {
        self.add_raw(&DUMP_ARCHIVE_MAGIC)
    }

    /// Append a namespace block terminator.
    pub fn add_block_terminator(&mut self) -> &mut Self {
        self.add_raw(&DUMP_BLOCK_TERMINATOR)
    }

    /// Number of records added so far.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| matches!(part, Part::Record(_)))
            .count()
    }

    /// The uncompressed archive.
    ///
    /// # Errors
    ///
    /// Propagates the first [`EncodeError`] from encoding a record.
    pub fn finish(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        for part in &self.parts {
            match part {
                Part::Record(record) => out.extend(self.encoder.encode(record)?),
                Part::Raw(bytes) => out.extend_from_slice(bytes),
            }
        }
        Ok(out)
    }

    /// The archive as a single gzip member.
    ///
    /// # Errors
    ///
    /// Encoding errors, or [`EncodeError::Io`] from the compressor.
    pub fn finish_gzip(&self) -> Result<Vec<u8>, EncodeError> {
        let raw = self.finish()?;
        let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&raw)?;
        Ok(encoder.finish()?)
    }

    /// The archive as a zstd frame.
    ///
    /// # Errors
    ///
    /// Encoding errors, or [`EncodeError::Io`] from the compressor.
    pub fn finish_zstd(&self) -> Result<Vec<u8>, EncodeError> {
        let raw = self.finish()?;
        Ok(zstd::encode_all(raw.as_slice(), ZSTD_LEVEL)?)
    }
}
