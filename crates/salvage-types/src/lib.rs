#![warn(clippy::pedantic)]

pub mod error;
pub mod object_id;
pub mod datetime;
pub mod decimal128;
pub mod value;
pub mod record;
pub mod field_view;
pub mod group;
pub mod repr;
pub mod normalize;

pub use datetime::DateTime;
pub use decimal128::Decimal128;
pub use error::TypeError;
pub use field_view::FieldView;
pub use group::Group;
pub use object_id::ObjectId;
pub use record::Record;
pub use value::{Binary, Code, DbPointer, Regex, Timestamp, Value};
