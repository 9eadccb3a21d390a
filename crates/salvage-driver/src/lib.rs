#![warn(clippy::pedantic)]

pub mod classifier;
pub mod config;
pub mod driver;
pub mod error;
pub mod persist;
pub mod registry;

pub use classifier::{classify, Classifier, ShapeClassifier};
pub use config::SalvageConfig;
pub use driver::{SalvageReport, Salvager};
pub use error::SalvageError;
pub use persist::{JsonDirSink, RecordSink};
pub use registry::CollectionRegistry;
