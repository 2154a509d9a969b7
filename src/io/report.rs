use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dioxus::logger::tracing::info;

use crate::io::atomic_write_bytes;

/// Saves an issues report into `dir` and returns the written path.
pub fn save_report(dir: &Path, file_name: &str, contents: &str) -> io::Result<PathBuf> {
    let file_name = sanitize_file_name(file_name);
    if file_name.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "report file name is empty",
        ));
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    atomic_write_bytes(&path, contents.as_bytes())?;
    info!(path = %path.display(), bytes = contents.len(), "saved issues report");
    Ok(path)
}

/// Replaces characters that would escape `dir` or are rejected by common filesystems.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace()).to_string()
}
