use std::path::Path;

use super::timed_word::TimedWord;

/// Domain interface for speech-to-text transcription.
///
/// Implementations turn an audio file into words with word-level timestamps,
/// ordered by start time.
pub trait SpeechRecognizer: Send {
    fn transcribe(&self, audio_path: &Path) -> Result<Vec<TimedWord>, Box<dyn std::error::Error>>;
}
