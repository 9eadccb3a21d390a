#![warn(clippy::pedantic)]

pub mod error;
pub mod bson;
pub mod carver;
pub mod decompression;

pub use bson::{BsonDecoder, RecordDecoder, MAX_DEPTH};
pub use carver::{Carve, CarveOutput, CarveStats, CarvedRecord, Carver};
pub use decompression::{decompress_archive, Compression, DEFAULT_MAX_ARCHIVE_SIZE};
pub use error::{ArchiveError, DecodeError};
