use std::fs;
use std::path::Path;

use crate::transcription::domain::speech_recognizer::SpeechRecognizer;
use crate::transcription::domain::timed_word::TimedWord;

use super::verbose_json::parse_verbose_json;

/// Offline recognizer that reads a previously saved `verbose_json`
/// transcript instead of calling a transcription service.
///
/// The path handed to [`SpeechRecognizer::transcribe`] is the transcript file.
#[derive(Debug, Default)]
pub struct TranscriptFileRecognizer;

impl TranscriptFileRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl SpeechRecognizer for TranscriptFileRecognizer {
    fn transcribe(&self, audio_path: &Path) -> Result<Vec<TimedWord>, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(audio_path)
            .map_err(|e| format!("Failed to read transcript {}: {e}", audio_path.display()))?;
        let words = parse_verbose_json(&json)?;
        log::debug!(
            "Loaded {} words from {}",
            words.len(),
            audio_path.display()
        );
        Ok(words)
    }
}
