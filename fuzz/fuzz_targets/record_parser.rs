#![no_main]

use benchfit::loader::parse_series;
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    // Result files are text; anything else is rejected before parsing
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(series) = parse_series(Path::new("fuzz.txt"), input) {
            assert_eq!(series.input_sizes.len(), series.times.len());
            if let Some(derivatives) = &series.derivatives {
                assert_eq!(derivatives.len(), series.times.len());
            }
        }
    }
});
