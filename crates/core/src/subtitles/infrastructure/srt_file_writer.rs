use std::fs;
use std::path::Path;

use crate::subtitles::domain::subtitle_writer::SubtitleWriter;

/// Writes subtitle documents to disk as UTF-8, creating parent directories.
#[derive(Debug, Default)]
pub struct SrtFileWriter;

impl SrtFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl SubtitleWriter for SrtFileWriter {
    fn write(&self, path: &Path, document: &str) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
        fs::write(path, document)
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        Ok(())
    }
}
