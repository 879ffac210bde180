pub mod audio_extractor;
pub mod speech_recognizer;
pub mod timed_word;
