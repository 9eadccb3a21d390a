#![no_main]

use libfuzzer_sys::fuzz_target;
use salvage_decoder::{BsonDecoder, RecordDecoder};

// Fuzz target: strict BSON decoder on arbitrary input bytes.
//
// Catches bugs in:
// - Length prefix handling (negative, oversized, inconsistent)
// - Nested document / array bounds
// - String, binary and code-with-scope length checks
// - Recursion depth limiting
fuzz_target!(|data: &[u8]| {
    let _ = BsonDecoder::default().decode(data);
});
