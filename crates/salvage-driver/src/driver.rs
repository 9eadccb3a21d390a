use std::fs;
use std::path::Path;

use salvage_decoder::{decompress_archive, BsonDecoder, CarveStats, Carver, RecordDecoder};

use crate::classifier::{Classifier, ShapeClassifier};
use crate::config::SalvageConfig;
use crate::error::SalvageError;
use crate::persist::{JsonDirSink, RecordSink};
use crate::registry::CollectionRegistry;

/// Outcome of carving and classifying one buffer.
#[derive(Clone, Debug, Default)]
pub struct SalvageReport {
    /// Size of the decompressed buffer that was scanned.
    pub archive_size: usize,
    pub stats: CarveStats,
    pub registry: CollectionRegistry,
}

/// Runs the recovery pipeline.
///
/// ```text
/// archive ──▶ read_archive() ──▶ buffer ──▶ recover() ──▶ SalvageReport ──▶ persist()
///               decompress                carve + classify                  RecordSink
/// ```
///
/// Each stage is exposed so callers can report progress between them;
/// [`run`](Self::run) chains all three for the configured output directory.
pub struct Salvager<C = ShapeClassifier, D = BsonDecoder> {
    config: SalvageConfig,
    carver: Carver<D>,
    classifier: C,
}

impl Salvager {
    /// A salvager with the strict BSON decoder (nesting capped at
    /// `config.max_depth`) and the shape classifier.
    #[must_use]
    pub fn new(config: SalvageConfig) -> Self {
        Self {
            carver: Carver::with_decoder(BsonDecoder::with_max_depth(config.max_depth)),
            config,
            classifier: ShapeClassifier,
        }
    }
}

impl<C: Classifier, D: RecordDecoder> Salvager<C, D> {
    pub fn with_parts(config: SalvageConfig, carver: Carver<D>, classifier: C) -> Self {
        Self {
            config,
            carver,
            classifier,
        }
    }

    pub fn config(&self) -> &SalvageConfig {
        &self.config
    }

    /// Read the archive file and decompress it into one flat buffer.
    ///
    /// # Errors
    ///
    /// - [`SalvageError::ReadArchive`] if the file cannot be read.
    /// - [`SalvageError::Archive`] if decompression fails or the output
    ///   exceeds `max_archive_size`.
    pub fn read_archive(&self, path: &Path) -> Result<Vec<u8>, SalvageError> {
        let raw = fs::read(path).map_err(|source| SalvageError::ReadArchive {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), compressed_len = raw.len(), "archive read");
        let buffer = decompress_archive(&raw, self.config.compression, self.config.max_archive_size)?;
        Ok(buffer)
    }

    /// Carve every record out of `buffer` and route it to its group.
    pub fn recover(&self, buffer: &[u8]) -> SalvageReport {
        let mut registry = CollectionRegistry::new();
        let stats = self.carver.scan_with(buffer, |carved| {
            let group = self.classifier.assign(&carved.record);
            tracing::trace!(offset = carved.offset, group = ?group, "record classified");
            registry.insert(group, carved.record);
        });
        tracing::debug!(
            groups = registry.len(),
            kept = registry.record_count(),
            metadata_skipped = registry.metadata_skipped(),
            unclassified = registry.unclassified(),
            "classification complete"
        );
        SalvageReport {
            archive_size: buffer.len(),
            stats,
            registry,
        }
    }

    /// Hand every group to `sink`, in first-discovery order.
    ///
    /// # Errors
    ///
    /// Propagates the first error from the sink.
    pub fn persist(
        &self,
        registry: &CollectionRegistry,
        sink: &mut impl RecordSink,
    ) -> Result<(), SalvageError> {
        for (group, records) in registry.groups() {
            sink.write_group(group, records)?;
        }
        Ok(())
    }

    /// Read, recover and (unless `dry_run` is set) write to the configured
    /// output directory.
    ///
    /// # Errors
    ///
    /// Any error from [`read_archive`](Self::read_archive), from creating
    /// the output directory, or from writing a group file.
    pub fn run(&self, archive: &Path) -> Result<SalvageReport, SalvageError> {
        let buffer = self.read_archive(archive)?;
        let report = self.recover(&buffer);
        if !self.config.dry_run {
            let mut sink = JsonDirSink::create(&self.config.output_dir)?;
            self.persist(&report.registry, &mut sink)?;
        }
        Ok(report)
    }
}
