#![no_main]

use libfuzzer_sys::fuzz_target;
use servergen::insert_before_marker;

const MARKER: &str = "servergen-needle-add-entity-model";

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // First line is the fragment, the rest is the file content
    let (fragment, content) = s.split_once('\n').unwrap_or((s, ""));
    match insert_before_marker(content, MARKER, fragment) {
        Some(updated) => {
            assert!(updated.len() >= content.len());
            // Everything from the marker line on is preserved verbatim
            let marker_line = content
                .find(MARKER)
                .map_or(0, |at| content[..at].rfind('\n').map_or(0, |nl| nl + 1));
            assert!(updated.ends_with(&content[marker_line..]));
        }
        None => assert!(!content.contains(MARKER)),
    }
});
