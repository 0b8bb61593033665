#![no_main]

use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;
use todos_core::codec::{decode_records, encode_records};
use todos_core::validate::validate_text;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(decoded) = decode_records(text) else {
        return;
    };

    let mut ids = HashSet::new();
    for task in &decoded.tasks {
        assert!(ids.insert(task.id.as_str()), "duplicate id survived decoding");
        assert_eq!(validate_text(&task.text).as_deref(), Ok(task.text.as_str()));
        assert!(task.updated_at >= task.created_at);
    }

    // Whatever survives decoding must survive a second pass unchanged.
    let encoded = encode_records(&decoded.tasks).expect("encode decoded tasks");
    let again = decode_records(&encoded).expect("decode re-encoded tasks");
    assert_eq!(again.skipped, 0);
    assert_eq!(again.tasks, decoded.tasks);
});
