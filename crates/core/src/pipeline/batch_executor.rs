use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use thiserror::Error;

use crate::pipeline::generate_subtitles_use_case::{GenerateSubtitlesUseCase, SubtitleReport};

/// One input file and where its subtitles go.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BatchError {
    #[error("{input}: {message}")]
    Failed { input: PathBuf, message: String },
    #[error("{input}: cancelled before it started")]
    Cancelled { input: PathBuf },
}

pub type JobResult = Result<SubtitleReport, BatchError>;

/// Builds a fresh use case for a worker. Shared by all workers.
pub type UseCaseFactory =
    dyn Fn() -> Result<GenerateSubtitlesUseCase, Box<dyn std::error::Error>> + Send + Sync;

/// Configuration for a batch run.
pub struct BatchConfig {
    /// Called as `(finished, total)` after every job.
    pub on_progress: Option<Box<dyn Fn(usize, usize) + Send>>,
    pub cancelled: Arc<AtomicBool>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            on_progress: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Abstracts how many subtitle jobs are scheduled.
///
/// Implementations return exactly one result per job, in job order.
pub trait BatchExecutor: Send {
    fn execute(
        &self,
        jobs: Vec<BatchJob>,
        factory: &UseCaseFactory,
        config: BatchConfig,
    ) -> Vec<JobResult>;
}
