//! Carver properties over encoder-built buffers.
//!
//! - **Bounds**: every reported document lies inside the buffer and no
//!   input, however malformed, makes the scan panic.
//! - **Monotone cursor**: reported offsets strictly increase and never
//!   overlap; after an accepted document the cursor sits exactly at its end.
//! - **Concatenation**: N documents laid end to end come back as N records
//!   in the same order.
//! - **Noise tolerance**: junk before, between and after documents does not
//!   lose or invent records.

use proptest::prelude::*;
use salvage_decoder::Carver;
use salvage_encoder::BsonEncoder;
use salvage_types::{Record, Value};

fn encode(record: &Record) -> Vec<u8> {
    BsonEncoder::new().encode(record).expect("encodable record")
}

/// `{"s": "<n x 'x'>"}` is `13 + n` bytes.
fn record_of_len(len: usize) -> Record {
    Record::new().with("s", "x".repeat(len - 13))
}

fn small_record() -> impl Strategy<Value = Record> {
    let value = prop_oneof![
        any::<i32>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z]{0,12}".prop_map(Value::from),
        Just(Value::Null),
    ];
    prop::collection::vec(("[a-z_]{1,8}", value), 0..6)
        .prop_map(|fields| fields.into_iter().collect::<Record>())
}

// ── Concrete scenarios ────────────────────────────────────────────────────────

#[test]
fn forty_bytes_noise_thirty_bytes() {
    let first = encode(&record_of_len(40));
    let second = encode(&record_of_len(30));
    assert_eq!((first.len(), second.len()), (40, 30));

    let mut buffer = first.clone();
    buffer.extend_from_slice(&[0xFF, 0xFF, 0xFF]);
    buffer.extend_from_slice(&second);

    let output = Carver::new().scan(&buffer);
    let offsets: Vec<_> = output.records.iter().map(|r| (r.offset, r.len)).collect();
    assert_eq!(offsets, [(0, 40), (43, 30)]);

    let stats = output.stats;
    assert_eq!(stats.documents_found, 2);
    assert_eq!(stats.rejected_length, 1);
    assert_eq!(stats.rejected_overrun, 2);
    assert_eq!(stats.bytes_scanned, 73);
}

#[test]
fn truncated_final_document_is_dropped() {
    let whole = encode(&record_of_len(40));
    let mut buffer = whole.clone();
    buffer.extend_from_slice(&whole[..25]);

    let output = Carver::new().scan(&buffer);
    assert_eq!(output.records.len(), 1);
    assert_eq!(output.records[0].offset, 0);
}

#[test]
fn corrupted_length_prefix_loses_only_that_document() {
    let a = encode(&Record::new().with("k", "first"));
    let mut b = encode(&Record::new().with("k", "second"));
    let c = encode(&Record::new().with("k", "third"));
    // Overwrite b's prefix with an out-of-range length.
    b[..4].copy_from_slice(&(-7i32).to_le_bytes());

    let buffer = [a, b, c].concat();
    let output = Carver::new().scan(&buffer);
    let values: Vec<_> = output
        .records
        .iter()
        .filter_map(|r| r.record.get("k").and_then(Value::as_str))
        .collect();
    assert_eq!(values, ["first", "third"]);
}

#[test]
fn streaming_and_collected_scans_agree() {
    let buffer = [
        encode(&Record::new().with("a", 1)),
        vec![0x80; 7],
        encode(&Record::new().with("b", 2)),
    ]
    .concat();

    let carver = Carver::new();
    let collected = carver.scan(&buffer);
    let mut carve = carver.carve(&buffer);
    let streamed: Vec<_> = carve.by_ref().collect();

    assert_eq!(streamed, collected.records);
    assert_eq!(carve.stats(), collected.stats);
}

// ── Properties ────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn arbitrary_bytes_stay_in_bounds(buffer in prop::collection::vec(any::<u8>(), 0..2048)) {
        let output = Carver::new().scan(&buffer);
        for carved in &output.records {
            prop_assert!(carved.len >= 5);
            prop_assert!(carved.offset + carved.len <= buffer.len());
            prop_assert_eq!(buffer[carved.offset + carved.len - 1], 0);
        }
        prop_assert!(output.stats.bytes_scanned <= buffer.len());
        prop_assert_eq!(output.stats.candidates_examined() > 0, buffer.len() > 4);
    }

    #[test]
    fn cursor_strictly_increases(buffer in prop::collection::vec(any::<u8>(), 0..2048)) {
        let carver = Carver::new();
        let mut carve = carver.carve(&buffer);
        let mut last_end = 0;
        while let Some(carved) = carve.next() {
            prop_assert!(carved.offset >= last_end);
            prop_assert_eq!(carve.position(), carved.offset + carved.len);
            last_end = carved.offset + carved.len;
        }
    }

    #[test]
    fn concatenated_records_come_back_in_order(
        records in prop::collection::vec(small_record(), 0..16),
    ) {
        let encoded: Vec<Vec<u8>> = records.iter().map(encode).collect();
        let buffer = encoded.concat();

        let output = Carver::new().scan(&buffer);
        prop_assert_eq!(output.records.len(), records.len());

        let mut expected_offset = 0;
        for ((carved, record), bytes) in output.records.iter().zip(&records).zip(&encoded) {
            prop_assert_eq!(carved.offset, expected_offset);
            prop_assert_eq!(&carved.record, record);
            expected_offset += bytes.len();
        }
    }

    /// Noise bytes are drawn from 0x80..=0xFF so no four-byte window that
    /// starts in noise and ends in noise reads as a positive length.
    #[test]
    fn noise_between_records_is_skipped(
        records in prop::collection::vec(small_record(), 1..8),
        noise in prop::collection::vec(prop::collection::vec(0x80u8..=0xFF, 0..12), 8..9),
    ) {
        let mut buffer = Vec::new();
        for (record, junk) in records.iter().zip(&noise) {
            buffer.extend_from_slice(junk);
            buffer.extend(encode(record));
        }
        buffer.extend_from_slice(&noise[noise.len() - 1]);

        let output = Carver::new().scan(&buffer);
        let found: Vec<_> = output.records.iter().map(|c| c.record.clone()).collect();
        prop_assert_eq!(found, records);
    }
}
