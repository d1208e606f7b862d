#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The reader must reject malformed input with an error, never panic
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(map) = angmap::ang::read_str(text) {
        // Anything that parses should also encode
        let _ = angmap::ang::encode(&map, &angmap::ang::WriteOptions::default());
    }
});
