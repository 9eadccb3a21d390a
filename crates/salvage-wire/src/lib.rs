#![warn(clippy::pedantic)]

pub mod element_type;
pub mod error;
pub mod frame;
pub mod reader;

pub use error::WireError;
pub use frame::{Candidate, Rejection};
pub use reader::ByteReader;
