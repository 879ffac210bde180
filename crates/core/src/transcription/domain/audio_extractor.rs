use std::path::Path;

/// Domain interface for pulling the audio track out of a video file.
pub trait AudioExtractor: Send {
    /// Decode the audio of `video_path` and encode it as mono speech-rate
    /// audio at `dest`. Overwrites `dest` if it exists.
    fn extract(&self, video_path: &Path, dest: &Path) -> Result<(), Box<dyn std::error::Error>>;
}
