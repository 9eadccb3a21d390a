use std::path::PathBuf;

use salvage_decoder::ArchiveError;

/// Errors that end a salvage run.
///
/// Rejected candidates and unclassified records are not errors; only the
/// input and output sides of the run can fail.
///
/// ```text
/// ┌─────────────────┬──────────────────────────────────────────────────┐
/// │ Variant         │ Cause                                            │
/// ├─────────────────┼──────────────────────────────────────────────────┤
/// │ ReadArchive     │ archive file missing or unreadable               │
/// │ Archive         │ decompression failed or passed the size ceiling  │
/// │ CreateOutputDir │ output directory could not be created            │
/// │ WriteGroup      │ a group file could not be written                │
/// │ Serialize       │ a record could not be rendered as JSON           │
/// │ Progress        │ a progress line could not be written             │
/// └─────────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SalvageError {
    #[error("failed to read archive {}", path.display())]
    ReadArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("failed to create output directory {}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    WriteGroup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write progress output")]
    Progress(#[source] std::io::Error),
}
