use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for pipeline orchestration events.
///
/// Keeps use cases free of any particular output mechanism; the core
/// segmenting and rendering functions never see it.
pub trait PipelineLogger: Send {
    /// Record how long a named pipeline stage took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. word or segment count).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}

    /// Forget everything recorded so far; called at the start of each run.
    fn reset(&mut self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger that forwards messages to the `log` crate and keeps per-stage
/// timings and metrics for a summary report.
pub struct LogPipelineLogger {
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    messages: Vec<String>,
}

impl LogPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Subtitle summary ({:.1}s total):",
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let pct = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!("  {stage:12}: {total_ms:8.1}ms  ({pct:4.1}%)"));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            let total: f64 = self.metrics[name].iter().sum();
            lines.push(format!("  {name}: {total}"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn timing(&mut self, stage: &str, duration_ms: f64) {
        log::debug!("{stage} took {duration_ms:.1}ms");
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }

    fn reset(&mut self) {
        self.timings.clear();
        self.metrics.clear();
        self.messages.clear();
        self.start_time = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullPipelineLogger;
        logger.timing("transcribe", 5.0);
        logger.metric("words", 3.0);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_timing_records_values() {
        let mut logger = LogPipelineLogger::new();
        logger.timing("extract", 20.0);
        logger.timing("extract", 30.0);
        logger.timing("segment", 0.5);

        let extract = logger.timings_for("extract").unwrap();
        assert_eq!(extract.len(), 2);
        assert!((extract[1] - 30.0).abs() < f64::EPSILON);
        assert_eq!(logger.timings_for("segment").unwrap().len(), 1);
        assert!(logger.timings_for("write").is_none());
    }

    #[test]
    fn test_metric_records_values() {
        let mut logger = LogPipelineLogger::new();
        logger.metric("words", 120.0);
        logger.metric("words", 80.0);
        assert_eq!(logger.metrics_for("words").unwrap(), &[120.0, 80.0]);
    }

    #[test]
    fn test_summary_includes_stages_and_metric_totals() {
        let mut logger = LogPipelineLogger::new();
        logger.timing("transcribe", 900.0);
        logger.timing("write", 1.0);
        logger.metric("segments", 12.0);
        logger.metric("segments", 3.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.starts_with("Subtitle summary"));
        assert!(summary.contains("transcribe"));
        assert!(summary.contains("write"));
        assert!(summary.contains("segments: 15"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        assert!(LogPipelineLogger::new().summary_string().is_none());
    }

    #[test]
    fn test_reset_discards_previous_run() {
        let mut logger = LogPipelineLogger::new();
        logger.timing("transcribe", 900.0);
        logger.metric("words", 40.0);
        logger.info("Processing first.mp4");

        logger.reset();
        assert!(logger.summary_string().is_none());
        assert!(logger.messages().is_empty());

        logger.metric("words", 2.0);
        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("words: 2"));
        assert!(!summary.contains("transcribe"));
    }

    #[test]
    fn test_info_stores_messages() {
        let mut logger = LogPipelineLogger::default();
        logger.info("Wrote movie.srt");
        assert_eq!(logger.messages(), &["Wrote movie.srt".to_string()]);
    }
}
