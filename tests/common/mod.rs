//! Shared utilities for integration testing.

use std::io::Write;

use tempfile::NamedTempFile;
use visitor_conf::Section;

/// Write `content` to a temporary `.toml` file that lives as long as the handle.
pub fn write_config(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Build a section from literal pairs.
#[allow(dead_code)]
pub fn section(pairs: &[(&str, &str)]) -> Section {
    pairs.iter().copied().collect()
}
