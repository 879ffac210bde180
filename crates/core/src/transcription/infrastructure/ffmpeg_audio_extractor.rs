use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::shared::constants::EXTRACT_SAMPLE_RATE;
use crate::transcription::domain::audio_extractor::AudioExtractor;

/// Extracts speech audio by running the `ffmpeg` binary.
///
/// Output is mono MP3 at 16 kHz, small enough to upload and what Whisper
/// resamples to anyway.
#[derive(Debug, Clone)]
pub struct FfmpegAudioExtractor {
    binary: PathBuf,
}

impl FfmpegAudioExtractor {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("ffmpeg"),
        }
    }

    pub fn with_binary(binary: &Path) -> Self {
        Self {
            binary: binary.to_path_buf(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn command(&self, video_path: &Path, dest: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-y")
            .arg("-i")
            .arg(video_path)
            .args(["-vn", "-acodec", "libmp3lame"])
            .arg("-ar")
            .arg(EXTRACT_SAMPLE_RATE.to_string())
            .args(["-ac", "1", "-q:a", "4"])
            .arg(dest);
        cmd
    }
}

impl Default for FfmpegAudioExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioExtractor for FfmpegAudioExtractor {
    fn extract(&self, video_path: &Path, dest: &Path) -> Result<(), Box<dyn std::error::Error>> {
        log::debug!(
            "Extracting audio from {} to {}",
            video_path.display(),
            dest.display()
        );
        let output = self
            .command(video_path, dest)
            .output()
            .map_err(|e| -> Box<dyn std::error::Error> {
                if e.kind() == ErrorKind::NotFound {
                    format!(
                        "ffmpeg not found at '{}'; install ffmpeg or pass its path",
                        self.binary.display()
                    )
                    .into()
                } else {
                    format!("Failed to run ffmpeg: {e}").into()
                }
            })?;

        if !output.status.success() {
            return Err(format!(
                "ffmpeg failed to extract audio from {}: {}",
                video_path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )
            .into());
        }

        Ok(())
    }
}
