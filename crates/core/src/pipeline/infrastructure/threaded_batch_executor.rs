use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Receiver, Sender};

use crate::pipeline::batch_executor::{
    BatchConfig, BatchError, BatchExecutor, BatchJob, JobResult, UseCaseFactory,
};
use crate::pipeline::generate_subtitles_use_case::GenerateSubtitlesUseCase;

const DEFAULT_WORKERS: usize = 1;

/// Runs subtitle jobs on a fixed pool of worker threads.
///
/// Layout: `queue → N workers → collector`. Each worker lazily builds its own
/// use case from the factory and reuses it for every job it picks up.
pub struct ThreadedBatchExecutor {
    workers: usize,
}

impl ThreadedBatchExecutor {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for ThreadedBatchExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}

impl BatchExecutor for ThreadedBatchExecutor {
    fn execute(
        &self,
        jobs: Vec<BatchJob>,
        factory: &UseCaseFactory,
        config: BatchConfig,
    ) -> Vec<JobResult> {
        let total = jobs.len();
        if total == 0 {
            return Vec::new();
        }

        let (job_tx, job_rx) = crossbeam_channel::unbounded::<(usize, BatchJob)>();
        for entry in jobs.into_iter().enumerate() {
            // Receiver is alive until the end of this function.
            let _ = job_tx.send(entry);
        }
        drop(job_tx);

        let (result_tx, result_rx) = crossbeam_channel::unbounded::<(usize, JobResult)>();
        let mut results: Vec<Option<JobResult>> = (0..total).map(|_| None).collect();
        let cancelled = &*config.cancelled;

        std::thread::scope(|scope| {
            for _ in 0..self.workers.min(total) {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || run_worker(job_rx, result_tx, factory, cancelled));
            }
            drop(result_tx);

            let mut finished = 0;
            for (index, result) in result_rx.iter() {
                if let Err(ref e) = result {
                    log::warn!("{e}");
                }
                results[index] = Some(result);
                finished += 1;
                if let Some(ref cb) = config.on_progress {
                    cb(finished, total);
                }
            }
        });

        results
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    Err(BatchError::Failed {
                        input: format!("job {index}").into(),
                        message: "worker exited without reporting".to_string(),
                    })
                })
            })
            .collect()
    }
}

fn run_worker(
    job_rx: Receiver<(usize, BatchJob)>,
    result_tx: Sender<(usize, JobResult)>,
    factory: &UseCaseFactory,
    cancelled: &AtomicBool,
) {
    let mut use_case: Option<GenerateSubtitlesUseCase> = None;
    for (index, job) in job_rx.iter() {
        let result = if cancelled.load(Ordering::Relaxed) {
            Err(BatchError::Cancelled { input: job.input })
        } else {
            run_job(&mut use_case, factory, &job)
        };
        if result_tx.send((index, result)).is_err() {
            break;
        }
    }
}

fn run_job(
    slot: &mut Option<GenerateSubtitlesUseCase>,
    factory: &UseCaseFactory,
    job: &BatchJob,
) -> JobResult {
    let failed = |message: String| BatchError::Failed {
        input: job.input.clone(),
        message,
    };

    let mut use_case = match slot.take() {
        Some(use_case) => use_case,
        None => factory().map_err(|e| failed(e.to_string()))?,
    };
    let result = use_case
        .run(&job.input, &job.output)
        .map_err(|e| failed(e.to_string()));
    *slot = Some(use_case);
    result
}
