pub mod segment;
pub mod segmenter;
pub mod srt_document;
pub mod subtitle_writer;
pub mod timestamp;
