#![no_main]

use libfuzzer_sys::fuzz_target;
use salvage_decoder::Carver;

// Fuzz target: full carver scan over arbitrary bytes.
//
// Checks that every reported record lies inside the buffer, that offsets
// never go backwards, and that the final cursor never passes the end.
fuzz_target!(|data: &[u8]| {
    let output = Carver::new().scan(data);
    let mut last_end = 0;
    for carved in &output.records {
        assert!(carved.offset >= last_end);
        assert!(carved.offset + carved.len <= data.len());
        last_end = carved.offset + carved.len;
    }
    assert!(output.stats.bytes_scanned <= data.len());
});
