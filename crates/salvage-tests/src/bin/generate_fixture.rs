//! Sample archive generator.
//!
//! Writes synthetic `mongodump`-style archives for trying the `salvage`
//! binary by hand, in every container format it accepts.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_fixture -p salvage-tests -- [OUT_DIR] [USERS]
//! ```
//!
//! | File                   | Contents                                  |
//! |------------------------|-------------------------------------------|
//! | app.archive            | raw document stream                       |
//! | app.archive.gz         | gzip                                      |
//! | app.archive.zst        | zstd                                      |
//! | app.damaged.archive.gz | gzip of the raw stream with torn regions  |

#![allow(clippy::pedantic)]

use std::path::{Path, PathBuf};

use salvage_tests::application_dump;

fn main() {
    let mut args = std::env::args().skip(1);
    let out_dir = args.next().map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures"),
        PathBuf::from,
    );
    let users: u32 = args
        .next()
        .map(|n| n.parse().expect("USERS must be a number"))
        .unwrap_or(50);

    let dump = application_dump(users);
    let raw = dump.finish().expect("encode archive");

    write_file(&out_dir.join("app.archive"), &raw);
    write_file(&out_dir.join("app.archive.gz"), &dump.finish_gzip().expect("gzip"));
    write_file(&out_dir.join("app.archive.zst"), &dump.finish_zstd().expect("zstd"));

    let damaged = damage(&raw);
    let mut torn = salvage_encoder::ArchiveBuilder::new();
    torn.add_raw(&damaged);
    write_file(
        &out_dir.join("app.damaged.archive.gz"),
        &torn.finish_gzip().expect("gzip"),
    );

    println!(
        "{} records, {} bytes raw, first bytes {}",
        dump.record_count(),
        raw.len(),
        hex::encode(&raw[..raw.len().min(16)])
    );
}

/// Overwrite an 8-byte region roughly every kilobyte so some documents
/// lose their length prefix or terminator.
fn damage(raw: &[u8]) -> Vec<u8> {
    let mut out = raw.to_vec();
    let mut at = 97;
    while at + 8 < out.len() {
        out[at..at + 8].fill(0xEE);
        at += 1021;
    }
    out
}

fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }
    std::fs::write(path, data).expect("write_file");
    println!("  wrote {}", path.display());
}
