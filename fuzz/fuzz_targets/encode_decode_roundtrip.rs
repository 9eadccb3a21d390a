#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use salvage_decoder::{BsonDecoder, Carver, DecodeError, RecordDecoder};
use salvage_encoder::BsonEncoder;
use salvage_types::{Binary, DateTime, ObjectId, Record, Value};

#[derive(Debug, Arbitrary)]
enum FuzzValue {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
    Binary { subtype: u8, bytes: Vec<u8> },
    DateTime(i32),
    ObjectId([u8; 12]),
    Document(Vec<(String, FuzzValue)>),
    Array(Vec<FuzzValue>),
}

impl FuzzValue {
    fn into_value(self) -> Value {
        match self {
            FuzzValue::Null => Value::Null,
            FuzzValue::Bool(b) => Value::Bool(b),
            FuzzValue::Int(n) => Value::Int(n),
            FuzzValue::String(s) => Value::String(s),
            FuzzValue::Binary { subtype, bytes } => Value::Binary(Binary { subtype, bytes }),
            // i32 millis keeps the date inside the supported year range.
            FuzzValue::DateTime(ms) => Value::DateTime(DateTime::from_millis(i64::from(ms))),
            FuzzValue::ObjectId(bytes) => Value::ObjectId(ObjectId::from_bytes(bytes)),
            FuzzValue::Document(fields) => Value::Document(record(fields)),
            FuzzValue::Array(items) => {
                Value::Array(items.into_iter().map(FuzzValue::into_value).collect())
            }
        }
    }
}

fn record(fields: Vec<(String, FuzzValue)>) -> Record {
    fields
        .into_iter()
        .map(|(key, value)| (key, value.into_value()))
        .collect()
}

// Fuzz target: encode an arbitrary record, decode it back, and carve it
// out of a buffer with junk on both sides.
fuzz_target!(|input: (Vec<u8>, Vec<(String, FuzzValue)>, Vec<u8>)| {
    let (prefix, fields, suffix) = input;
    let original = record(fields);
    let Ok(bytes) = BsonEncoder::new().encode(&original) else {
        // Keys with interior NULs cannot be encoded.
        return;
    };

    match BsonDecoder::default().decode(&bytes) {
        Ok(decoded) => assert_eq!(decoded, original),
        Err(DecodeError::TooDeep { .. }) => return,
        Err(e) => panic!("encoder output must decode: {e}"),
    }

    let buffer = [prefix.as_slice(), &bytes, &suffix].concat();
    let output = Carver::new().scan(&buffer);
    // Junk before the record may frame a false document that swallows it,
    // but something is always found.
    assert!(output.stats.documents_found >= 1);
});
