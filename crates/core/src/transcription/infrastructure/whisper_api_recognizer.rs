use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::multipart::Form;
use thiserror::Error;

use crate::shared::constants::{WHISPER_API_URL, WHISPER_MODEL};
use crate::transcription::domain::speech_recognizer::SpeechRecognizer;
use crate::transcription::domain::timed_word::TimedWord;

use super::verbose_json::{parse_verbose_json, TranscriptParseError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Error, Debug)]
pub enum WhisperApiError {
    #[error("no API key configured for the transcription service")]
    MissingApiKey,
    #[error("failed to read audio file {path}: {source}")]
    ReadAudio {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("transcription request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("transcription service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error(transparent)]
    Parse(#[from] TranscriptParseError),
}

/// Connection settings for an OpenAI-compatible transcription endpoint.
///
/// Credentials travel with this value; nothing is read from globals.
#[derive(Clone)]
pub struct WhisperApiConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub language: Option<String>,
}

impl WhisperApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: WHISPER_API_URL.to_string(),
            model: WHISPER_MODEL.to_string(),
            api_key: api_key.into(),
            language: None,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim().to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.trim().is_empty());
        self
    }
}

// Keep the key out of debug logs.
impl std::fmt::Debug for WhisperApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperApiConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"***")
            .field("language", &self.language)
            .finish()
    }
}

/// Speech recognizer backed by the OpenAI Whisper transcription API.
///
/// Requests `verbose_json` with word-level timestamp granularity.
#[derive(Debug)]
pub struct WhisperApiRecognizer {
    config: WhisperApiConfig,
    client: reqwest::blocking::Client,
}

impl WhisperApiRecognizer {
    pub fn new(config: WhisperApiConfig) -> Result<Self, WhisperApiError> {
        if config.api_key.trim().is_empty() {
            return Err(WhisperApiError::MissingApiKey);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &WhisperApiConfig {
        &self.config
    }

    fn request(&self, audio_path: &Path) -> Result<Vec<TimedWord>, WhisperApiError> {
        let mut form = Form::new()
            .file("file", audio_path)
            .map_err(|e| WhisperApiError::ReadAudio {
                path: audio_path.to_path_buf(),
                source: e,
            })?
            .text("model", self.config.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "word");
        if let Some(ref language) = self.config.language {
            form = form.text("language", language.clone());
        }

        let response = self
            .client
            .post(&self.config.base_url)
            .bearer_auth(self.config.api_key.trim())
            .multipart(form)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(WhisperApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(parse_verbose_json(&body)?)
    }
}

impl SpeechRecognizer for WhisperApiRecognizer {
    fn transcribe(&self, audio_path: &Path) -> Result<Vec<TimedWord>, Box<dyn std::error::Error>> {
        log::info!(
            "Transcribing {} with {} ({})",
            audio_path.display(),
            self.config.model,
            self.config.base_url
        );
        let words = self.request(audio_path)?;
        log::debug!("Received {} words", words.len());
        Ok(words)
    }
}
