#![no_main]

use huskpack::config::loader::{ConfigFormat, ConfigLoader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string, ignoring invalid UTF-8
    if let Ok(text) = std::str::from_utf8(data) {
        let loader = ConfigLoader::with_defaults();

        // Both encodings must reject garbage gracefully, never panic
        let _ = loader.load_from_str(text, ConfigFormat::Json);
        let _ = loader.load_from_str(text, ConfigFormat::Yaml);
    }
});
