/// Maximum words per subtitle before a segment is flushed.
pub const DEFAULT_MAX_WORDS: usize = 10;
/// Maximum seconds per subtitle before a segment is flushed.
pub const DEFAULT_MAX_DURATION: f64 = 5.0;

pub const WHISPER_API_URL: &str = "https://api.openai.com/v1/audio/transcriptions";
pub const WHISPER_MODEL: &str = "whisper-1";

/// Mono 16 kHz is what the Whisper models are trained on.
pub const EXTRACT_SAMPLE_RATE: u32 = 16000;
pub const EXTRACTED_AUDIO_EXTENSION: &str = "mp3";

pub const SRT_EXTENSION: &str = "srt";

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "webm", "wmv", "flv"];
