#![warn(clippy::pedantic)]

pub mod error;
pub mod bson;
pub mod archive;

pub use archive::ArchiveBuilder;
pub use bson::BsonEncoder;
pub use error::EncodeError;
