//! Fuzz target for config parsing and profile resolution.
//!
//! Goal: Resolution should **never panic** on any config text or override
//! combination. Unknown profiles and tree keys return errors, not panics.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_resolution
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use regelguard_settings::Overrides;

/// Structured input for resolution fuzzing.
/// Using Arbitrary allows libFuzzer to generate more meaningful test cases.
#[derive(Arbitrary, Debug)]
struct ConfigInput {
    /// Candidate regelguard.toml text
    text: String,
    /// CLI profile override
    profile: Option<String>,
    /// CLI audit override
    audit: Option<bool>,
}

fuzz_target!(|input: ConfigInput| {
    // Limit input size to avoid OOM and keep fuzzing fast
    if input.text.len() > 4096 {
        return;
    }

    if let Ok(cfg) = regelguard_settings::parse_config_toml(&input.text) {
        let overrides = Overrides {
            profile: input.profile,
            audit: input.audit,
        };
        // Should never panic - errors are fine
        let _ = regelguard_settings::resolve_config(cfg, overrides);
    }
});
