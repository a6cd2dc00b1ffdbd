#![no_main]

use libfuzzer_sys::fuzz_target;
use servergen_core::naming::normalize;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        let once = normalize(s);
        // Already-canonical output must not change again
        assert_eq!(normalize(&once), once);
    }
});
