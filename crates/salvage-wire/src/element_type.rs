//! BSON element type tags.
//!
//! Each element inside a document starts with one of these bytes, followed
//! by a NUL-terminated key and the type-specific value.
//!
//! ```text
//! ┌──────┬──────────────────────┬───────────────────────────────────┐
//! │ Tag  │ Name                 │ Value layout                      │
//! ├──────┼──────────────────────┼───────────────────────────────────┤
//! │ 0x01 │ double               │ 8 bytes f64 LE                    │
//! │ 0x02 │ string               │ i32 len + UTF-8 + 0x00            │
//! │ 0x03 │ embedded document    │ i32 len + elements + 0x00         │
//! │ 0x04 │ array                │ same as document, keys "0".."n"   │
//! │ 0x05 │ binary               │ i32 len + subtype + bytes         │
//! │ 0x06 │ undefined (deprec.)  │ -                                 │
//! │ 0x07 │ ObjectId             │ 12 bytes                          │
//! │ 0x08 │ boolean              │ 1 byte, 0x00 or 0x01              │
//! │ 0x09 │ UTC datetime         │ i64 LE millis since epoch         │
//! │ 0x0A │ null                 │ -                                 │
//! │ 0x0B │ regex                │ cstring pattern + cstring flags   │
//! │ 0x0C │ DBPointer (deprec.)  │ string + 12 bytes                 │
//! │ 0x0D │ JavaScript code      │ string                            │
//! │ 0x0E │ symbol (deprec.)     │ string                            │
//! │ 0x0F │ code with scope      │ i32 total + string + document     │
//! │ 0x10 │ int32                │ 4 bytes LE                        │
//! │ 0x11 │ timestamp            │ u32 increment + u32 seconds       │
//! │ 0x12 │ int64                │ 8 bytes LE                        │
//! │ 0x13 │ decimal128           │ 16 bytes                          │
//! │ 0xFF │ min key              │ -                                 │
//! │ 0x7F │ max key              │ -                                 │
//! └──────┴──────────────────────┴───────────────────────────────────┘
//! ```

pub const DOUBLE: u8 = 0x01;
pub const STRING: u8 = 0x02;
pub const DOCUMENT: u8 = 0x03;
pub const ARRAY: u8 = 0x04;
pub const BINARY: u8 = 0x05;
pub const UNDEFINED: u8 = 0x06;
pub const OBJECT_ID: u8 = 0x07;
pub const BOOLEAN: u8 = 0x08;
pub const DATETIME: u8 = 0x09;
pub const NULL: u8 = 0x0A;
pub const REGEX: u8 = 0x0B;
pub const DB_POINTER: u8 = 0x0C;
pub const JAVASCRIPT: u8 = 0x0D;
pub const SYMBOL: u8 = 0x0E;
pub const JAVASCRIPT_WITH_SCOPE: u8 = 0x0F;
pub const INT32: u8 = 0x10;
pub const TIMESTAMP: u8 = 0x11;
pub const INT64: u8 = 0x12;
pub const DECIMAL128: u8 = 0x13;
pub const MIN_KEY: u8 = 0xFF;
pub const MAX_KEY: u8 = 0x7F;

/// Binary subtype whose payload carries a redundant inner length prefix.
pub const BINARY_SUBTYPE_OLD: u8 = 0x02;

/// Returns a human-readable name for a type tag, used in error messages.
#[must_use]
pub fn name(tag: u8) -> &'static str {
    match tag {
        DOUBLE => "double",
        STRING => "string",
        DOCUMENT => "document",
        ARRAY => "array",
        BINARY => "binary",
        UNDEFINED => "undefined",
        OBJECT_ID => "objectId",
        BOOLEAN => "bool",
        DATETIME => "date",
        NULL => "null",
        REGEX => "regex",
        DB_POINTER => "dbPointer",
        JAVASCRIPT => "javascript",
        SYMBOL => "symbol",
        JAVASCRIPT_WITH_SCOPE => "javascriptWithScope",
        INT32 => "int",
        TIMESTAMP => "timestamp",
        INT64 => "long",
        DECIMAL128 => "decimal",
        MIN_KEY => "minKey",
        MAX_KEY => "maxKey",
        _ => "unknown",
    }
}
