use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::{EXTRACTED_AUDIO_EXTENSION, SRT_EXTENSION};
use crate::subtitles::domain::segmenter::Segmenter;
use crate::subtitles::domain::srt_document::render_srt;
use crate::subtitles::domain::subtitle_writer::SubtitleWriter;
use crate::transcription::domain::audio_extractor::AudioExtractor;
use crate::transcription::domain::speech_recognizer::SpeechRecognizer;

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleReport {
    pub output: PathBuf,
    pub word_count: usize,
    pub segment_count: usize,
}

/// Subtitle file path next to the input: `talk.mp4` → `talk.srt`.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(SRT_EXTENSION)
}

/// extract audio → transcribe → segment → render SRT → write.
///
/// Without an extractor the recognizer is handed the input path directly,
/// which is how saved transcripts are processed offline.
pub struct GenerateSubtitlesUseCase {
    extractor: Option<Box<dyn AudioExtractor>>,
    recognizer: Box<dyn SpeechRecognizer>,
    writer: Box<dyn SubtitleWriter>,
    segmenter: Segmenter,
    logger: Box<dyn PipelineLogger>,
}

impl GenerateSubtitlesUseCase {
    pub fn new(
        extractor: Option<Box<dyn AudioExtractor>>,
        recognizer: Box<dyn SpeechRecognizer>,
        writer: Box<dyn SubtitleWriter>,
        segmenter: Segmenter,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            extractor,
            recognizer,
            writer,
            segmenter,
            logger,
        }
    }

    pub fn run(
        &mut self,
        input: &Path,
        output: &Path,
    ) -> Result<SubtitleReport, Box<dyn std::error::Error>> {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
        // A use case is reused across jobs; each summary covers one file.
        self.logger.reset();
        self.logger.info(&format!("Processing {}", input.display()));

        // 1. Extract audio into a scratch dir; dropping it removes the file
        //    whether or not the later stages succeed.
        let scratch = match self.extractor {
            Some(ref extractor) => {
                let dir = tempfile::Builder::new().prefix("subtitler-").tempdir()?;
                let stem = input
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("audio");
                let audio_path = dir
                    .path()
                    .join(format!("{stem}_audio.{EXTRACTED_AUDIO_EXTENSION}"));

                let started = Instant::now();
                extractor.extract(input, &audio_path)?;
                self.logger.timing("extract", elapsed_ms(started));
                Some((dir, audio_path))
            }
            None => None,
        };
        let source = scratch.as_ref().map_or(input, |(_, audio)| audio.as_path());

        // 2. Transcribe
        let started = Instant::now();
        let words = self.recognizer.transcribe(source)?;
        self.logger.timing("transcribe", elapsed_ms(started));
        self.logger.metric("words", words.len() as f64);

        // 3. Segment
        let started = Instant::now();
        let segments = self.segmenter.segment(&words)?;
        self.logger.timing("segment", elapsed_ms(started));
        self.logger.metric("segments", segments.len() as f64);

        // 4. Render and write
        let started = Instant::now();
        let document = render_srt(&segments);
        self.writer.write(output, &document)?;
        self.logger.timing("write", elapsed_ms(started));

        drop(scratch);

        self.logger.info(&format!(
            "Wrote {} subtitles ({} words) to {}",
            segments.len(),
            words.len(),
            output.display()
        ));
        self.logger.summary();

        Ok(SubtitleReport {
            output: output.to_path_buf(),
            word_count: words.len(),
            segment_count: segments.len(),
        })
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
