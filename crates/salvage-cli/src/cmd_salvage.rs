/// The salvage run: read, carve, classify, write, report.
///
/// # Example output
///
/// ```text
/// Parsing archive: backup/app.archive.gz
/// Archive size: 48213 bytes
/// Total documents found: 212
/// Saved 40 documents to storage/mongo_import/users.json
/// Saved 3 documents to storage/mongo_import/companies.json
///
/// Summary:
///   users: 40 documents
///   companies: 3 documents
/// ```
///
/// With `--dry-run` the `Saved` lines are omitted and nothing is written.
use std::io::Write;

use anyhow::{Context, Result};
use salvage_driver::{JsonDirSink, RecordSink, SalvageConfig, SalvageError, Salvager};
use salvage_types::{Group, Record};

use crate::Cli;

/// Run the salvage command, writing progress lines to `out`.
///
/// # Errors
///
/// Returns an error if the archive cannot be read or decompressed, if
/// the output directory or a group file cannot be written, or if `out`
/// fails.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = SalvageConfig {
        output_dir: cli.output_dir.clone(),
        compression: cli.compression.into(),
        max_archive_size: cli.max_archive_size,
        max_depth: cli.max_depth,
        dry_run: cli.dry_run,
    };
    let salvager = Salvager::new(config);

    writeln!(out, "Parsing archive: {}", cli.archive.display())?;
    let buffer = salvager
        .read_archive(&cli.archive)
        .with_context(|| format!("cannot load {}", cli.archive.display()))?;
    writeln!(out, "Archive size: {} bytes", buffer.len())?;

    let report = salvager.recover(&buffer);
    writeln!(out, "Total documents found: {}", report.stats.documents_found)?;
    tracing::debug!(
        candidates = report.stats.candidates_examined(),
        metadata_skipped = report.registry.metadata_skipped(),
        unclassified = report.registry.unclassified(),
        "scan summary"
    );

    if !salvager.config().dry_run {
        let mut sink = ProgressSink {
            inner: JsonDirSink::create(&salvager.config().output_dir)?,
            out: &mut *out,
        };
        salvager.persist(&report.registry, &mut sink)?;
    }

    writeln!(out, "\nSummary:")?;
    for (group, records) in report.registry.groups() {
        writeln!(out, "  {group}: {} documents", records.len())?;
    }
    Ok(())
}

/// Announces each group file once the inner sink has written it.
struct ProgressSink<'a, W> {
    inner: JsonDirSink,
    out: &'a mut W,
}

impl<W: Write> RecordSink for ProgressSink<'_, W> {
    fn write_group(&mut self, group: Group, records: &[Record]) -> Result<(), SalvageError> {
        self.inner.write_group(group, records)?;
        writeln!(
            self.out,
            "Saved {} documents to {}",
            records.len(),
            self.inner.path_for(group).display()
        )
        .map_err(SalvageError::Progress)
    }
}
