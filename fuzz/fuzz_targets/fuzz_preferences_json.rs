#![no_main]

use libfuzzer_sys::fuzz_target;
use stillscreen::config::Preferences;

fuzz_target!(|data: &[u8]| {
    // Preference loads are lenient: arbitrary bytes must never panic the
    // parser, only fail to parse.
    if let Ok(s) = std::str::from_utf8(data) {
        let _result: Result<Preferences, _> = serde_json::from_str(s);
    }
});
