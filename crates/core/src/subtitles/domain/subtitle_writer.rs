use std::path::Path;

/// Domain interface for persisting a rendered subtitle document.
pub trait SubtitleWriter: Send {
    fn write(&self, path: &Path, document: &str) -> Result<(), Box<dyn std::error::Error>>;
}
