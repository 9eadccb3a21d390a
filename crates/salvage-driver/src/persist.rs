use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use salvage_types::{Group, Record};

use crate::error::SalvageError;

/// Destination for finished groups.
///
/// The driver calls `write_group` once per group, in first-discovery order,
/// after the scan is complete.
pub trait RecordSink {
    /// Persist every record of one group.
    ///
    /// # Errors
    ///
    /// Implementations report I/O and serialization failures as
    /// [`SalvageError`].
    fn write_group(&mut self, group: Group, records: &[Record]) -> Result<(), SalvageError>;
}

/// Writes each group to `<dir>/<group>.json` as a pretty-printed array.
///
/// Field order is preserved, non-ASCII text is written as UTF-8, and an
/// existing file for the same group is replaced.
#[derive(Debug)]
pub struct JsonDirSink {
    dir: PathBuf,
}

impl JsonDirSink {
    /// Create the output directory (and parents) and return a sink for it.
    ///
    /// # Errors
    ///
    /// [`SalvageError::CreateOutputDir`] if the directory cannot be created.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, SalvageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| SalvageError::CreateOutputDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a group is written to.
    #[must_use]
    pub fn path_for(&self, group: Group) -> PathBuf {
        self.dir.join(format!("{group}.json"))
    }
}

impl RecordSink for JsonDirSink {
    fn write_group(&mut self, group: Group, records: &[Record]) -> Result<(), SalvageError> {
        let path = self.path_for(group);
        let write_err = |source| SalvageError::WriteGroup {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records).map_err(|e| {
            if e.is_io() {
                write_err(e.into())
            } else {
                SalvageError::Serialize(e)
            }
        })?;
        writer.flush().map_err(write_err)?;

        tracing::debug!(%group, records = records.len(), path = %path.display(), "group written");
        Ok(())
    }
}
