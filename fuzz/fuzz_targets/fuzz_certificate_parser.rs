//! Fuzz target for certificate parsing and evaluation.
//!
//! Goal: Parsing and rule evaluation should **never panic** on any input.
//! Malformed certificates may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_certificate_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only test valid UTF-8 strings (certificates arrive as JSON text)
    if let Ok(text) = std::str::from_utf8(data) {
        // Parse and evaluate every standard tree - should never panic
        let _ = regelguard_domain::fuzz::parse_and_evaluate(text);
    }
});
