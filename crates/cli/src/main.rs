use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use subtitler_core::pipeline::batch_executor::{BatchConfig, BatchExecutor, BatchJob};
use subtitler_core::pipeline::generate_subtitles_use_case::{
    default_output_path, GenerateSubtitlesUseCase,
};
use subtitler_core::pipeline::infrastructure::threaded_batch_executor::ThreadedBatchExecutor;
use subtitler_core::pipeline::pipeline_logger::LogPipelineLogger;
use subtitler_core::shared::constants::VIDEO_EXTENSIONS;
use subtitler_core::shared::settings::Settings;
use subtitler_core::subtitles::domain::segmenter::Segmenter;
use subtitler_core::subtitles::infrastructure::srt_file_writer::SrtFileWriter;
use subtitler_core::transcription::domain::audio_extractor::AudioExtractor;
use subtitler_core::transcription::domain::speech_recognizer::SpeechRecognizer;
use subtitler_core::transcription::infrastructure::ffmpeg_audio_extractor::FfmpegAudioExtractor;
use subtitler_core::transcription::infrastructure::transcript_file_recognizer::TranscriptFileRecognizer;
use subtitler_core::transcription::infrastructure::whisper_api_recognizer::{
    WhisperApiConfig, WhisperApiRecognizer,
};

/// Generate SRT subtitles for video files using word-level speech recognition.
#[derive(Parser, Debug)]
#[command(name = "subtitler")]
struct Cli {
    /// Input video files (or saved transcripts with --from-transcript).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output .srt file (only with a single input; defaults to the input
    /// path with an .srt extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum words per subtitle.
    #[arg(long)]
    max_words: Option<usize>,

    /// Maximum seconds per subtitle.
    #[arg(long)]
    max_duration: Option<f64>,

    /// API key for the transcription service.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Transcription endpoint (OpenAI-compatible).
    #[arg(long)]
    api_url: Option<String>,

    /// Transcription model name.
    #[arg(long)]
    model: Option<String>,

    /// Spoken language hint (ISO-639-1, e.g. "sv").
    #[arg(long)]
    language: Option<String>,

    /// Path to the ffmpeg binary.
    #[arg(long)]
    ffmpeg: Option<PathBuf>,

    /// Treat inputs as saved verbose_json transcripts: no audio extraction,
    /// no network.
    #[arg(long)]
    from_transcript: bool,

    /// Number of files processed in parallel.
    #[arg(long, default_value = "1")]
    jobs: usize,

    /// Settings file to read defaults from.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Fully resolved run options: CLI flags layered over settings.
#[derive(Debug, Clone)]
struct Options {
    max_words: usize,
    max_duration: f64,
    api: Option<WhisperApiConfig>,
    ffmpeg: Option<PathBuf>,
    from_transcript: bool,
}

fn main() {
    env_logger::init();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when at least one input failed.
fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = match cli.config {
        Some(ref path) => Settings::load_from(path)?,
        None => Settings::load(),
    };
    let options = resolve_options(&cli, &settings)?;
    let jobs = build_jobs(&cli.inputs, cli.output.as_deref());

    let factory = move || -> Result<GenerateSubtitlesUseCase, Box<dyn std::error::Error>> {
        build_use_case(&options)
    };

    let total = jobs.len();
    let config = BatchConfig {
        on_progress: Some(Box::new(move |done: usize, total: usize| {
            if total > 1 {
                log::info!("Finished {done}/{total} files");
            }
        })),
        ..BatchConfig::default()
    };
    let results = ThreadedBatchExecutor::new(cli.jobs).execute(jobs, &factory, config);

    let mut failures = 0;
    for result in results {
        match result {
            Ok(report) => println!(
                "{} ({} subtitles, {} words)",
                report.output.display(),
                report.segment_count,
                report.word_count
            ),
            Err(e) => {
                failures += 1;
                eprintln!("Error: {e}");
            }
        }
    }
    if failures > 0 {
        log::warn!("{failures} of {total} files failed");
    }
    Ok(failures == 0)
}

fn build_use_case(
    options: &Options,
) -> Result<GenerateSubtitlesUseCase, Box<dyn std::error::Error>> {
    let segmenter = Segmenter::new(options.max_words, options.max_duration)?;

    let extractor: Option<Box<dyn AudioExtractor>>;
    let recognizer: Box<dyn SpeechRecognizer>;
    if options.from_transcript {
        extractor = None;
        recognizer = Box::new(TranscriptFileRecognizer::new());
    } else {
        let api = options
            .api
            .clone()
            .ok_or("An API key is required (set OPENAI_API_KEY or pass --api-key)")?;
        extractor = Some(Box::new(match options.ffmpeg {
            Some(ref path) => FfmpegAudioExtractor::with_binary(path),
            None => FfmpegAudioExtractor::new(),
        }));
        recognizer = Box::new(WhisperApiRecognizer::new(api)?);
    }

    Ok(GenerateSubtitlesUseCase::new(
        extractor,
        recognizer,
        Box::new(SrtFileWriter::new()),
        segmenter,
        Box::new(LogPipelineLogger::new()),
    ))
}

fn resolve_options(cli: &Cli, settings: &Settings) -> Result<Options, Box<dyn std::error::Error>> {
    let max_words = cli.max_words.unwrap_or(settings.max_words);
    let max_duration = cli.max_duration.unwrap_or(settings.max_duration);
    // Fail before any file is touched.
    Segmenter::new(max_words, max_duration)?;

    let api = if cli.from_transcript {
        None
    } else {
        let key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or("An API key is required (set OPENAI_API_KEY or pass --api-key)")?;
        let config = WhisperApiConfig::new(key)
            .with_base_url(cli.api_url.as_deref().unwrap_or(&settings.api_base_url))
            .with_model(cli.model.as_deref().unwrap_or(&settings.model))
            .with_language(cli.language.clone().or_else(|| settings.language.clone()));
        Some(config)
    };

    Ok(Options {
        max_words,
        max_duration,
        api,
        ffmpeg: cli.ffmpeg.clone().or_else(|| settings.ffmpeg_path.clone()),
        from_transcript: cli.from_transcript,
    })
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    for input in &cli.inputs {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
        if !cli.from_transcript && !is_video(input) {
            log::warn!(
                "{} does not look like a video file; trying anyway",
                input.display()
            );
        }
    }
    if cli.output.is_some() && cli.inputs.len() > 1 {
        return Err("--output can only be used with a single input".into());
    }
    if cli.jobs == 0 {
        return Err("Jobs must be at least 1".into());
    }
    if let Some(n) = cli.max_words {
        if n == 0 {
            return Err("Max words must be a positive integer, got 0".into());
        }
    }
    if let Some(d) = cli.max_duration {
        if !(d > 0.0 && d.is_finite()) {
            return Err(format!("Max duration must be a positive number of seconds, got {d}").into());
        }
    }
    Ok(())
}

fn build_jobs(inputs: &[PathBuf], output: Option<&Path>) -> Vec<BatchJob> {
    inputs
        .iter()
        .map(|input| BatchJob {
            input: input.clone(),
            output: output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| default_output_path(input)),
        })
        .collect()
}

fn is_video(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
