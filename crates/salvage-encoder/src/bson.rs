use salvage_types::{Binary, Code, Record, Value};
use salvage_wire::element_type as tag;
use salvage_wire::frame::{DOCUMENT_TERMINATOR, MAX_DOCUMENT_LEN};

use crate::error::EncodeError;

/// BSON encoder for [`Record`]s.
///
/// The inverse of `BsonDecoder` for every value kind it produces. Integers
/// are written as int32 when they fit and int64 otherwise; strings decoded
/// from symbols come back as plain strings.
///
/// Used to build fixtures, benchmark inputs and fuzz seeds; the recovery
/// path itself never encodes.
///
/// # Example
///
/// ```rust
/// use salvage_encoder::BsonEncoder;
/// use salvage_types::Record;
///
/// let bytes = BsonEncoder::new()
///     .encode(&Record::new().with("a", 1))
///     .unwrap();
/// assert_eq!(bytes, [0x0C, 0, 0, 0, 0x10, b'a', 0, 1, 0, 0, 0, 0]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BsonEncoder;

impl BsonEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Encode one top-level document.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::InteriorNul`] if a key or regex contains 0x00.
    /// - [`EncodeError::DocumentTooLarge`] if the result exceeds 16 MiB.
    pub fn encode(&self, record: &Record) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        write_document(&mut out, record)?;
        let limit = MAX_DOCUMENT_LEN.unsigned_abs() as usize;
        if out.len() > limit {
            return Err(EncodeError::DocumentTooLarge {
                size: out.len(),
                limit,
            });
        }
        Ok(out)
    }
}

fn write_document(out: &mut Vec<u8>, record: &Record) -> Result<(), EncodeError> {
    framed(out, |out| {
        for (key, value) in record.iter() {
            write_element(out, key, value)?;
        }
        Ok(())
    })
}

fn write_array(out: &mut Vec<u8>, items: &[Value]) -> Result<(), EncodeError> {
    framed(out, |out| {
        for (i, item) in items.iter().enumerate() {
            write_element(out, &i.to_string(), item)?;
        }
        Ok(())
    })
}

/// Write `[len][body][0x00]`, back-patching `len` once the body is known.
fn framed(
    out: &mut Vec<u8>,
    body: impl FnOnce(&mut Vec<u8>) -> Result<(), EncodeError>,
) -> Result<(), EncodeError> {
    let start = out.len();
    out.extend_from_slice(&[0; 4]);
    body(out)?;
    out.push(DOCUMENT_TERMINATOR);
    patch_len(out, start)
}

fn patch_len(out: &mut [u8], start: usize) -> Result<(), EncodeError> {
    let size = out.len() - start;
    let len = i32::try_from(size).map_err(|_| EncodeError::DocumentTooLarge {
        size,
        limit: MAX_DOCUMENT_LEN.unsigned_abs() as usize,
    })?;
    out[start..start + 4].copy_from_slice(&len.to_le_bytes());
    Ok(())
}

fn write_cstr(out: &mut Vec<u8>, what: &'static str, text: &str) -> Result<(), EncodeError> {
    if text.contains('\0') {
        return Err(EncodeError::InteriorNul {
            what,
            text: text.to_string(),
        });
    }
    out.extend_from_slice(text.as_bytes());
    out.push(0);
    Ok(())
}

fn write_string(out: &mut Vec<u8>, text: &str) -> Result<(), EncodeError> {
    let size = text.len() + 1;
    let len = i32::try_from(size).map_err(|_| EncodeError::DocumentTooLarge {
        size,
        limit: MAX_DOCUMENT_LEN.unsigned_abs() as usize,
    })?;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(text.as_bytes());
    out.push(0);
    Ok(())
}

fn write_binary(out: &mut Vec<u8>, bin: &Binary) -> Result<(), EncodeError> {
    let old = bin.subtype == tag::BINARY_SUBTYPE_OLD;
    let size = bin.bytes.len() + if old { 4 } else { 0 };
    let too_large = |size| EncodeError::DocumentTooLarge {
        size,
        limit: MAX_DOCUMENT_LEN.unsigned_abs() as usize,
    };
    let len = i32::try_from(size).map_err(|_| too_large(size))?;
    out.extend_from_slice(&len.to_le_bytes());
    out.push(bin.subtype);
    if old {
        let inner = i32::try_from(bin.bytes.len()).map_err(|_| too_large(size))?;
        out.extend_from_slice(&inner.to_le_bytes());
    }
    out.extend_from_slice(&bin.bytes);
    Ok(())
}

fn write_code(out: &mut Vec<u8>, code: &Code) -> Result<u8, EncodeError> {
    match &code.scope {
        None => {
            write_string(out, &code.code)?;
            Ok(tag::JAVASCRIPT)
        }
        Some(scope) => {
            let start = out.len();
            out.extend_from_slice(&[0; 4]);
            write_string(out, &code.code)?;
            write_document(out, scope)?;
            patch_len(out, start)?;
            Ok(tag::JAVASCRIPT_WITH_SCOPE)
        }
    }
}

fn write_element(out: &mut Vec<u8>, key: &str, value: &Value) -> Result<(), EncodeError> {
    // The tag is only known for certain after the value is written (code
    // with or without scope), so reserve its byte and patch it.
    let tag_at = out.len();
    out.push(0);
    write_cstr(out, "key", key)?;

    let element_tag = match value {
        Value::Null => tag::NULL,
        Value::Bool(b) => {
            out.push(u8::from(*b));
            tag::BOOLEAN
        }
        Value::Int(n) => match i32::try_from(*n) {
            Ok(small) => {
                out.extend_from_slice(&small.to_le_bytes());
                tag::INT32
            }
            Err(_) => {
                out.extend_from_slice(&n.to_le_bytes());
                tag::INT64
            }
        },
        Value::Double(x) => {
            out.extend_from_slice(&x.to_le_bytes());
            tag::DOUBLE
        }
        Value::String(s) => {
            write_string(out, s)?;
            tag::STRING
        }
        Value::Binary(bin) => {
            write_binary(out, bin)?;
            tag::BINARY
        }
        Value::DateTime(dt) => {
            out.extend_from_slice(&dt.millis().to_le_bytes());
            tag::DATETIME
        }
        Value::ObjectId(id) => {
            out.extend_from_slice(&id.bytes());
            tag::OBJECT_ID
        }
        Value::Document(doc) => {
            write_document(out, doc)?;
            tag::DOCUMENT
        }
        Value::Array(items) => {
            write_array(out, items)?;
            tag::ARRAY
        }
        Value::Regex(re) => {
            write_cstr(out, "regex pattern", &re.pattern)?;
            write_cstr(out, "regex options", &re.options)?;
            tag::REGEX
        }
        Value::Timestamp(ts) => {
            out.extend_from_slice(&ts.increment.to_le_bytes());
            out.extend_from_slice(&ts.time.to_le_bytes());
            tag::TIMESTAMP
        }
        Value::Decimal128(d) => {
            out.extend_from_slice(&d.bytes());
            tag::DECIMAL128
        }
        Value::Code(code) => write_code(out, code)?,
        Value::DbPointer(ptr) => {
            write_string(out, &ptr.namespace)?;
            out.extend_from_slice(&ptr.id.bytes());
            tag::DB_POINTER
        }
        Value::MinKey => tag::MIN_KEY,
        Value::MaxKey => tag::MAX_KEY,
    };
    out[tag_at] = element_tag;
    Ok(())
}

#[cfg(test)]
mod tests {
    use salvage_decoder::BsonDecoder;
    use salvage_types::{DateTime, DbPointer, Decimal128, ObjectId, Regex, Timestamp};

    use super::*;

    fn roundtrip(record: &Record) -> Record {
        let bytes = BsonEncoder::new().encode(record).unwrap();
        BsonDecoder::default().decode_document(&bytes).unwrap()
    }

    #[test]
    fn empty_record_is_five_bytes() {
        let bytes = BsonEncoder::new().encode(&Record::new()).unwrap();
        assert_eq!(bytes, [5, 0, 0, 0, 0]);
    }

    #[test]
    fn int_width_follows_magnitude() {
        let bytes = BsonEncoder::new()
            .encode(&Record::new().with("n", 1i64 << 40))
            .unwrap();
        assert_eq!(bytes[4], tag::INT64);
        assert_eq!(bytes.len(), 4 + 1 + 2 + 8 + 1);
    }

    #[test]
    fn array_keys_are_indices() {
        let bytes = BsonEncoder::new()
            .encode(&Record::new().with("a", vec![Value::from(true), Value::from(false)]))
            .unwrap();
        // outer(4) tag(1) "a\0"(2) inner len(4) → first inner element tag + "0\0"
        assert_eq!(&bytes[11..14], &[tag::BOOLEAN, b'0', 0]);
    }

    #[test]
    fn every_value_kind_roundtrips() {
        let id: ObjectId = "5f1e2d3c4b5a69788796a5b4".parse().unwrap();
        let record = Record::new()
            .with("null", Value::Null)
            .with("double", -0.25)
            .with("bin", Value::Binary(Binary { subtype: 0, bytes: vec![0, 1, 2] }))
            .with("old_bin", Value::Binary(Binary { subtype: 2, bytes: vec![9, 9] }))
            .with("date", DateTime::from_millis(-86_400_000))
            .with("re", Value::Regex(Regex { pattern: "^x".into(), options: "im".into() }))
            .with("ptr", Value::DbPointer(DbPointer { namespace: "db.c".into(), id }))
            .with("js", Value::Code(Code { code: "1+1".into(), scope: None }))
            .with(
                "js_scope",
                Value::Code(Code { code: "x".into(), scope: Some(Record::new().with("x", 1)) }),
            )
            .with("ts", Value::Timestamp(Timestamp { time: 1, increment: 2 }))
            .with("dec", Value::Decimal128(Decimal128::from_bytes([7; 16])))
            .with("min", Value::MinKey)
            .with("max", Value::MaxKey)
            .with("big", i64::MIN);
        assert_eq!(roundtrip(&record), record);
    }

    #[test]
    fn interior_nul_in_key_is_rejected() {
        let err = BsonEncoder::new()
            .encode(&Record::new().with("bad\0key", 1))
            .unwrap_err();
        assert!(matches!(err, EncodeError::InteriorNul { what: "key", .. }));
    }
}
