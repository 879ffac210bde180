pub mod ffmpeg_audio_extractor;
pub mod transcript_file_recognizer;
pub mod verbose_json;
pub mod whisper_api_recognizer;
