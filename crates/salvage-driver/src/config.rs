use std::path::PathBuf;

use salvage_decoder::{Compression, DEFAULT_MAX_ARCHIVE_SIZE, MAX_DEPTH};

/// Default directory the group files are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "storage/mongo_import";

/// Configuration for one salvage run.
///
/// ```text
/// ┌──────────────────┬─────────────────────────────────────────────────┐
/// │ Field            │ Purpose                                         │
/// ├──────────────────┼─────────────────────────────────────────────────┤
/// │ output_dir       │ Directory receiving one `<group>.json` per group│
/// │ compression      │ Outer container format, or Auto to sniff it     │
/// │ max_archive_size │ Ceiling on the decompressed buffer, in bytes    │
/// │ max_depth        │ Deepest document nesting the decoder accepts    │
/// │ dry_run          │ Carve and classify, but write nothing           │
/// └──────────────────┴─────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SalvageConfig {
    pub output_dir: PathBuf,
    pub compression: Compression,
    pub max_archive_size: u64,
    pub max_depth: usize,
    pub dry_run: bool,
}

impl Default for SalvageConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            compression: Compression::Auto,
            max_archive_size: DEFAULT_MAX_ARCHIVE_SIZE,
            max_depth: MAX_DEPTH,
            dry_run: false,
        }
    }
}
