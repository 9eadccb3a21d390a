/// Salvage command-line tool: carve BSON documents out of a damaged
/// MongoDB archive and write them, grouped by shape, as JSON files.
///
/// # Usage
///
/// ```text
/// salvage <ARCHIVE> [OUTPUT_DIR] [OPTIONS]
///
/// Arguments:
///   <ARCHIVE>      gzip / zstd / raw dump archive
///   [OUTPUT_DIR]   destination directory (default: storage/mongo_import)
///
/// Options:
///   --compression <MODE>      auto (default) | gzip | zstd | none
///   --max-archive-size <N>    ceiling on the decompressed size, in bytes
///   --max-depth <N>           deepest document nesting accepted (default: 100)
///   --dry-run                 carve and classify, write nothing
///   -v, --verbose             debug diagnostics on stderr
///   -h, --help                Print help
///   -V, --version             Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                      |
/// |------|----------------------------------------------|
/// | 0    | Success                                      |
/// | 1    | Error (unreadable archive, unwritable output) |
/// | 2    | Usage error (missing archive argument)       |
///
/// Progress goes to stdout; diagnostics and errors go to stderr.
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use salvage_decoder::{Compression, DEFAULT_MAX_ARCHIVE_SIZE, MAX_DEPTH};
use salvage_driver::config::DEFAULT_OUTPUT_DIR;
use tracing_subscriber::EnvFilter;

mod cmd_salvage;

/// Recover records from a damaged MongoDB archive.
#[derive(Parser)]
#[command(name = "salvage", version, about = "Carve and classify records from a MongoDB archive")]
pub struct Cli {
    /// Path to the archive file.
    pub archive: PathBuf,

    /// Directory the `<group>.json` files are written to.
    #[arg(default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Outer compression of the archive.
    #[arg(long, value_enum, default_value_t = CompressionArg::Auto)]
    pub compression: CompressionArg,

    /// Refuse archives that decompress to more than this many bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_ARCHIVE_SIZE)]
    pub max_archive_size: u64,

    /// Reject documents nested deeper than this.
    #[arg(long, default_value_t = MAX_DEPTH)]
    pub max_depth: usize,

    /// Carve and classify only; do not create or write any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit debug diagnostics (carve counters, per-group writes) on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompressionArg {
    Auto,
    Gzip,
    Zstd,
    None,
}

impl From<CompressionArg> for Compression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Auto => Compression::Auto,
            CompressionArg::Gzip => Compression::Gzip,
            CompressionArg::Zstd => Compression::Zstd,
            CompressionArg::None => Compression::None,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cmd_salvage::run(&cli, &mut std::io::stdout().lock()) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `-v`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_driver_defaults() {
        let cli = Cli::try_parse_from(["salvage", "dump.gz"]).unwrap();
        assert_eq!(cli.output_dir, PathBuf::from("storage/mongo_import"));
        assert_eq!(Compression::from(cli.compression), Compression::Auto);
        assert_eq!(cli.max_archive_size, DEFAULT_MAX_ARCHIVE_SIZE);
        assert_eq!(cli.max_depth, MAX_DEPTH);
        assert!(!cli.dry_run);
    }

    #[test]
    fn missing_archive_is_a_usage_error() {
        let err = Cli::try_parse_from(["salvage"]).err().unwrap();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "salvage",
            "dump.zst",
            "out",
            "--compression",
            "zstd",
            "--dry-run",
            "--max-archive-size",
            "1024",
            "--max-depth",
            "250",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(Compression::from(cli.compression), Compression::Zstd);
        assert_eq!(cli.max_archive_size, 1024);
        assert_eq!(cli.max_depth, 250);
        assert!(cli.dry_run && cli.verbose);
    }
}
