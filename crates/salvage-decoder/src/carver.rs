use std::iter::FusedIterator;

use salvage_types::Record;
use salvage_wire::frame::LENGTH_PREFIX_SIZE;
use salvage_wire::{Candidate, Rejection};

use crate::bson::{BsonDecoder, RecordDecoder};

/// A record recovered from the buffer, with where it was found.
#[derive(Clone, Debug, PartialEq)]
pub struct CarvedRecord {
    /// Absolute offset of the document's length prefix.
    pub offset: usize,

    /// Length of the document in bytes (the declared length).
    pub len: usize,

    pub record: Record,
}

/// Counters reported at the end of a scan.
///
/// ```text
/// ┌─────────────────────┬──────────────────────────────────────────────┐
/// │ Field               │ Counts                                       │
/// ├─────────────────────┼──────────────────────────────────────────────┤
/// │ documents_found     │ candidates that decoded successfully         │
/// │ bytes_scanned       │ final cursor position                        │
/// │ rejected_length     │ length prefix outside [5, 16 MiB]            │
/// │ rejected_overrun    │ declared span runs past the buffer           │
/// │ rejected_terminator │ last byte of the span is not 0x00            │
/// │ rejected_decode     │ span passed framing but failed to decode     │
/// └─────────────────────┴──────────────────────────────────────────────┘
/// ```
///
/// Every iteration of the scan loop bumps exactly one of
/// `documents_found` or a `rejected_*` counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarveStats {
    pub documents_found: usize,
    pub bytes_scanned: usize,
    pub rejected_length: usize,
    pub rejected_overrun: usize,
    pub rejected_terminator: usize,
    pub rejected_decode: usize,
}

impl CarveStats {
    /// Total candidate offsets examined.
    #[must_use]
    pub fn candidates_examined(&self) -> usize {
        self.documents_found
            + self.rejected_length
            + self.rejected_overrun
            + self.rejected_terminator
            + self.rejected_decode
    }

    fn reject(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::LengthOutOfRange(_) => self.rejected_length += 1,
            Rejection::Truncated | Rejection::Overrun => self.rejected_overrun += 1,
            Rejection::MissingTerminator => self.rejected_terminator += 1,
        }
    }
}

/// Everything a completed scan produced.
#[derive(Clone, Debug, Default)]
pub struct CarveOutput {
    pub records: Vec<CarvedRecord>,
    pub stats: CarveStats,
}

/// Greedy, leftmost-first, non-overlapping document carver.
///
/// The carver walks the buffer with a single cursor:
///
/// ```text
///   pos = 0
///   while pos + 4 < len:
///       probe length prefix at pos     ── rejected? ──► pos += 1
///       decode buffer[pos .. pos + L]  ── failed?   ──► pos += 1
///       emit record                    ──────────────► pos += L
/// ```
///
/// A rejected position only moves the cursor one byte, because the true
/// document boundary may be the very next byte. An accepted document moves
/// it past the whole document, so bytes inside a confirmed document are
/// never re-examined as candidate starts. The final four bytes of the
/// buffer are never probed.
///
/// Nothing here can fail: every rejection is counted and skipped.
///
/// # Example
///
/// ```rust
/// use salvage_decoder::Carver;
///
/// let mut buffer = vec![0xAB, 0xCD];                  // noise
/// buffer.extend_from_slice(&[5, 0, 0, 0, 0]);         // {}
/// buffer.extend_from_slice(&[0xEE; 3]);               // noise
///
/// let output = Carver::new().scan(&buffer);
/// assert_eq!(output.records.len(), 1);
/// assert_eq!(output.records[0].offset, 2);
/// assert_eq!(output.stats.documents_found, 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Carver<D = BsonDecoder> {
    decoder: D,
}

impl Carver<BsonDecoder> {
    /// A carver backed by the strict BSON decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: RecordDecoder> Carver<D> {
    pub fn with_decoder(decoder: D) -> Self {
        Self { decoder }
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Start a lazy scan over `buffer`.
    pub fn carve<'a>(&'a self, buffer: &'a [u8]) -> Carve<'a, D> {
        Carve {
            decoder: &self.decoder,
            buf: buffer,
            pos: 0,
            stats: CarveStats::default(),
        }
    }

    /// Scan `buffer` to completion, handing each record to `sink` in
    /// discovery order, and return the counters.
    pub fn scan_with(&self, buffer: &[u8], mut sink: impl FnMut(CarvedRecord)) -> CarveStats {
        let mut carve = self.carve(buffer);
        for carved in carve.by_ref() {
            sink(carved);
        }
        let stats = carve.stats();
        tracing::debug!(
            buffer_len = buffer.len(),
            documents_found = stats.documents_found,
            bytes_scanned = stats.bytes_scanned,
            rejected_length = stats.rejected_length,
            rejected_overrun = stats.rejected_overrun,
            rejected_terminator = stats.rejected_terminator,
            rejected_decode = stats.rejected_decode,
            "carve complete"
        );
        stats
    }

    /// Scan `buffer` to completion and collect every record.
    pub fn scan(&self, buffer: &[u8]) -> CarveOutput {
        let mut records = Vec::new();
        let stats = self.scan_with(buffer, |carved| records.push(carved));
        CarveOutput { records, stats }
    }
}

/// In-progress scan, yielding records as they are found.
///
/// Created by [`Carver::carve`]. Once `next` returns `None` the scan is
/// finished and [`stats`](Self::stats) is final.
#[derive(Debug)]
pub struct Carve<'a, D> {
    decoder: &'a D,
    buf: &'a [u8],
    pos: usize,
    stats: CarveStats,
}

impl<D> Carve<'_, D> {
    /// The next offset the scan will probe.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> CarveStats {
        CarveStats {
            bytes_scanned: self.pos,
            ..self.stats
        }
    }

    fn in_bounds(&self) -> bool {
        self.pos + LENGTH_PREFIX_SIZE < self.buf.len()
    }
}

impl<D: RecordDecoder> Iterator for Carve<'_, D> {
    type Item = CarvedRecord;

    fn next(&mut self) -> Option<CarvedRecord> {
        while self.in_bounds() {
            let offset = self.pos;
            let candidate = match Candidate::probe(self.buf, offset) {
                Ok(candidate) => candidate,
                Err(rejection) => {
                    self.stats.reject(rejection);
                    self.pos += 1;
                    continue;
                }
            };

            match self.decoder.decode(candidate.bytes(self.buf)) {
                Ok(record) => {
                    self.stats.documents_found += 1;
                    self.pos = candidate.end();
                    tracing::trace!(offset, len = candidate.len, fields = record.len(), "document carved");
                    return Some(CarvedRecord {
                        offset,
                        len: candidate.len,
                        record,
                    });
                }
                Err(err) => {
                    tracing::trace!(offset, len = candidate.len, error = %err, "candidate rejected by decoder");
                    self.stats.rejected_decode += 1;
                    self.pos += 1;
                }
            }
        }
        None
    }
}

impl<D: RecordDecoder> FusedIterator for Carve<'_, D> {}
