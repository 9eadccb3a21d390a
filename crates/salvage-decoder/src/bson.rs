use salvage_types::{
    Binary, Code, DateTime, DbPointer, Decimal128, ObjectId, Record, Regex, Timestamp, Value,
};
use salvage_wire::element_type as tag;
use salvage_wire::frame::{DOCUMENT_TERMINATOR, MIN_DOCUMENT_LEN};
use salvage_wire::ByteReader;

use crate::error::DecodeError;

/// Maximum nesting of documents and arrays accepted by [`BsonDecoder`].
pub const MAX_DEPTH: usize = 100;

/// Turns one candidate byte slice into a [`Record`].
///
/// This is the seam between the carver and whatever document format it is
/// carving. The carver only cares whether decoding succeeded; it never
/// inspects the error.
pub trait RecordDecoder {
    /// Decode `bytes`, which span exactly one candidate document including
    /// its length prefix and terminator.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`] means "not a document of this format".
    fn decode(&self, bytes: &[u8]) -> Result<Record, DecodeError>;
}

impl<F> RecordDecoder for F
where
    F: Fn(&[u8]) -> Result<Record, DecodeError>,
{
    fn decode(&self, bytes: &[u8]) -> Result<Record, DecodeError> {
        self(bytes)
    }
}

/// Strict BSON decoder.
///
/// Strictness is what makes carving work: random bytes that happen to pass
/// the length and terminator checks almost never survive a full strict
/// decode. The decoder rejects:
///
///   - an outer length prefix that does not equal the slice length,
///   - any document or sub-document not ending in 0x00,
///   - unknown element tags (a 0x00 tag before the end counts as unknown),
///   - keys and strings that are not valid UTF-8,
///   - boolean bytes other than 0x00 and 0x01,
///   - datetimes outside years 1 through 9999,
///   - any element whose value runs past its enclosing document.
///
/// Duplicate keys resolve as [`Record::insert`] does: first position, last
/// value. Array keys are not checked; values are taken in wire order.
///
/// # Example
///
/// ```rust
/// use salvage_decoder::{BsonDecoder, RecordDecoder};
///
/// // {"a": 1}
/// let bytes = [0x0C, 0, 0, 0, 0x10, b'a', 0, 1, 0, 0, 0, 0];
/// let record = BsonDecoder::default().decode(&bytes).unwrap();
/// assert_eq!(record.len(), 1);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BsonDecoder {
    max_depth: usize,
}

impl Default for BsonDecoder {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }
}

impl BsonDecoder {
    /// Decoder with a custom nesting limit.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Decode a complete top-level document.
    ///
    /// # Errors
    ///
    /// See the type-level documentation for the rejection rules.
    pub fn decode_document(&self, bytes: &[u8]) -> Result<Record, DecodeError> {
        let mut reader = ByteReader::new(bytes);
        let declared = reader.read_i32()?;
        if declared < MIN_DOCUMENT_LEN || usize::try_from(declared).ok() != Some(bytes.len()) {
            return Err(DecodeError::SizeMismatch {
                declared,
                actual: bytes.len(),
            });
        }
        let last = bytes.len() - 1;
        if bytes[last] != DOCUMENT_TERMINATOR {
            return Err(DecodeError::MissingTerminator { offset: last });
        }

        let mut parser = Parser {
            max_depth: self.max_depth,
        };
        parser.elements(&bytes[4..last], 4, 0)
    }
}

impl RecordDecoder for BsonDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Record, DecodeError> {
        self.decode_document(bytes)
    }
}

/// Recursive element walker.
///
/// Every method takes the absolute offset (`base`) of the slice it reads so
/// that errors point into the original candidate.
struct Parser {
    max_depth: usize,
}

impl Parser {
    /// Parse an element list (the bytes between a document's length prefix
    /// and its terminator) into a record.
    fn elements(&mut self, body: &[u8], base: usize, depth: usize) -> Result<Record, DecodeError> {
        let mut record = Record::new();
        self.walk(body, base, depth, |key, value| {
            record.insert(key, value);
        })?;
        Ok(record)
    }

    /// Parse an array body, discarding the index keys.
    fn array(&mut self, body: &[u8], base: usize, depth: usize) -> Result<Vec<Value>, DecodeError> {
        let mut items = Vec::new();
        self.walk(body, base, depth, |_, value| items.push(value))?;
        Ok(items)
    }

    fn walk(
        &mut self,
        body: &[u8],
        base: usize,
        depth: usize,
        mut emit: impl FnMut(String, Value),
    ) -> Result<(), DecodeError> {
        if depth > self.max_depth {
            return Err(DecodeError::TooDeep {
                max: self.max_depth,
            });
        }
        let mut reader = ByteReader::new(body);
        while reader.remaining() > 0 {
            let tag_offset = base + reader.position();
            let element_tag = reader.read_u8()?;
            let key_offset = base + reader.position();
            let key = utf8(reader.read_cstr()?, key_offset)?;
            let value = self.value(element_tag, tag_offset, &mut reader, base, depth)?;
            emit(key, value);
        }
        Ok(())
    }

    fn value(
        &mut self,
        element_tag: u8,
        tag_offset: usize,
        r: &mut ByteReader<'_>,
        base: usize,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        let at = base + r.position();
        let value = match element_tag {
            tag::DOUBLE => Value::Double(r.read_f64()?),
            tag::STRING | tag::SYMBOL => Value::String(string(r, base)?),
            tag::DOCUMENT => Value::Document(self.sub_document(r, base, depth)?),
            tag::ARRAY => {
                let (body, body_base) = sub_document_body(r, base)?;
                Value::Array(self.array(body, body_base, depth + 1)?)
            }
            tag::BINARY => Value::Binary(binary(r, base)?),
            tag::UNDEFINED | tag::NULL => Value::Null,
            tag::OBJECT_ID => Value::ObjectId(ObjectId::from_bytes(r.read_array()?)),
            tag::BOOLEAN => match r.read_u8()? {
                0 => Value::Bool(false),
                1 => Value::Bool(true),
                value => return Err(DecodeError::InvalidBoolean { value, offset: at }),
            },
            tag::DATETIME => Value::DateTime(DateTime::checked(r.read_i64()?)?),
            tag::REGEX => {
                let pattern = utf8(r.read_cstr()?, at)?;
                let options_at = base + r.position();
                let options = utf8(r.read_cstr()?, options_at)?;
                Value::Regex(Regex { pattern, options })
            }
            tag::DB_POINTER => {
                let namespace = string(r, base)?;
                let id = ObjectId::from_bytes(r.read_array()?);
                Value::DbPointer(DbPointer { namespace, id })
            }
            tag::JAVASCRIPT => Value::Code(Code {
                code: string(r, base)?,
                scope: None,
            }),
            tag::JAVASCRIPT_WITH_SCOPE => Value::Code(self.code_with_scope(r, base, depth)?),
            tag::INT32 => Value::Int(i64::from(r.read_i32()?)),
            tag::TIMESTAMP => {
                let increment = r.read_u32()?;
                let time = r.read_u32()?;
                Value::Timestamp(Timestamp { time, increment })
            }
            tag::INT64 => Value::Int(r.read_i64()?),
            tag::DECIMAL128 => Value::Decimal128(Decimal128::from_bytes(r.read_array()?)),
            tag::MIN_KEY => Value::MinKey,
            tag::MAX_KEY => Value::MaxKey,
            unknown => {
                return Err(DecodeError::UnknownElementType {
                    tag: unknown,
                    offset: tag_offset,
                });
            }
        };
        Ok(value)
    }

    fn sub_document(
        &mut self,
        r: &mut ByteReader<'_>,
        base: usize,
        depth: usize,
    ) -> Result<Record, DecodeError> {
        let (body, body_base) = sub_document_body(r, base)?;
        self.elements(body, body_base, depth + 1)
    }

    fn code_with_scope(
        &mut self,
        r: &mut ByteReader<'_>,
        base: usize,
        depth: usize,
    ) -> Result<Code, DecodeError> {
        let at = base + r.position();
        // total length + empty string + empty document
        let total = r.read_len(4 + 5 + 5)?;
        let bytes = r.read_bytes(total - 4)?;
        let inner_base = at + 4;
        let mut inner = ByteReader::new(bytes);
        let code = string(&mut inner, inner_base)?;
        let scope = self.sub_document(&mut inner, inner_base, depth)?;
        if inner.remaining() != 0 {
            return Err(DecodeError::InvalidCodeWithScope { offset: at });
        }
        Ok(Code {
            code,
            scope: Some(scope),
        })
    }
}

/// Read a nested document's length prefix and return its element list
/// (terminator stripped) with the list's absolute offset.
fn sub_document_body<'a>(
    r: &mut ByteReader<'a>,
    base: usize,
) -> Result<(&'a [u8], usize), DecodeError> {
    let at = base + r.position();
    let len = r.read_len(MIN_DOCUMENT_LEN)?;
    let rest = r.read_bytes(len - 4)?;
    let (terminator, body) = rest
        .split_last()
        .ok_or(DecodeError::MissingTerminator { offset: at })?;
    if *terminator != DOCUMENT_TERMINATOR {
        return Err(DecodeError::MissingTerminator {
            offset: at + len - 1,
        });
    }
    Ok((body, at + 4))
}

fn string(r: &mut ByteReader<'_>, base: usize) -> Result<String, DecodeError> {
    let at = base + r.position();
    let len = r
        .read_len(1)
        .map_err(|_| DecodeError::InvalidStringLength { offset: at })?;
    let bytes = r.read_bytes(len)?;
    match bytes.split_last() {
        Some((&0, text)) => utf8(text, at + 4),
        _ => Err(DecodeError::InvalidStringLength { offset: at }),
    }
}

fn binary(r: &mut ByteReader<'_>, base: usize) -> Result<Binary, DecodeError> {
    let at = base + r.position();
    let len = r.read_len(0)?;
    let subtype = r.read_u8()?;
    let data = r.read_bytes(len)?;
    if subtype != tag::BINARY_SUBTYPE_OLD {
        return Ok(Binary {
            subtype,
            bytes: data.to_vec(),
        });
    }

    // Old binary repeats the length inside the payload.
    let mut inner = ByteReader::new(data);
    let inner_len = inner
        .read_len(0)
        .map_err(|_| DecodeError::InvalidBinaryLength { offset: at })?;
    if inner_len != inner.remaining() {
        return Err(DecodeError::InvalidBinaryLength { offset: at });
    }
    Ok(Binary {
        subtype,
        bytes: data[4..].to_vec(),
    })
}

fn utf8(bytes: &[u8], offset: usize) -> Result<String, DecodeError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| DecodeError::InvalidUtf8 { offset })
}
