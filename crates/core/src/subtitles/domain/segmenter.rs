use thiserror::Error;

use super::segment::SubtitleSegment;
use crate::shared::constants::{DEFAULT_MAX_DURATION, DEFAULT_MAX_WORDS};
use crate::transcription::domain::timed_word::TimedWord;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmentError {
    #[error("invalid segmenter configuration: {0}")]
    Configuration(ConfigIssue),
    #[error("invalid word at index {index}: {issue}")]
    Validation { index: usize, issue: WordIssue },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    #[error("max_words must be at least 1")]
    ZeroMaxWords,
    #[error("max_duration must be a positive number of seconds, got {0}")]
    NonPositiveMaxDuration(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WordIssue {
    #[error("text is empty")]
    EmptyText,
    #[error("timestamps must be finite")]
    NonFiniteTime,
    #[error("start {0} is negative")]
    NegativeStart(f64),
    #[error("end {end} is before start {start}")]
    EndBeforeStart { start: f64, end: f64 },
    #[error("start {start} is earlier than the previous word's start {previous_start}")]
    OutOfOrder { previous_start: f64, start: f64 },
}

/// Greedy bounded grouping of timed words into subtitle captions.
///
/// Words are appended one at a time; the open caption is closed as soon as
/// it holds `max_words` words or spans at least `max_duration` seconds. The
/// bound is only checked after a word is added, so a single word longer
/// than `max_duration` still becomes its own caption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segmenter {
    max_words: usize,
    max_duration: f64,
}

impl Segmenter {
    pub fn new(max_words: usize, max_duration: f64) -> Result<Self, SegmentError> {
        if max_words == 0 {
            return Err(SegmentError::Configuration(ConfigIssue::ZeroMaxWords));
        }
        // Written so NaN fails as well.
        if !(max_duration > 0.0 && max_duration.is_finite()) {
            return Err(SegmentError::Configuration(
                ConfigIssue::NonPositiveMaxDuration(max_duration),
            ));
        }
        Ok(Self {
            max_words,
            max_duration,
        })
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    /// Group `words` into captions.
    ///
    /// The whole input is validated before grouping starts, so an error never
    /// comes with partial output. Empty input yields no captions.
    pub fn segment(&self, words: &[TimedWord]) -> Result<Vec<SubtitleSegment>, SegmentError> {
        validate_words(words)?;

        let mut segments = Vec::new();
        let mut pending: Vec<&str> = Vec::with_capacity(self.max_words.min(words.len()));
        let mut segment_start = 0.0;

        for word in words {
            if pending.is_empty() {
                segment_start = word.start_time;
            }
            pending.push(word.text.trim());

            let duration = word.end_time - segment_start;
            if pending.len() >= self.max_words || duration >= self.max_duration {
                segments.push(flush(&mut pending, segment_start, word.end_time));
            }
        }

        if let Some(last) = words.last() {
            if !pending.is_empty() {
                segments.push(flush(&mut pending, segment_start, last.end_time));
            }
        }

        Ok(segments)
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
            max_duration: DEFAULT_MAX_DURATION,
        }
    }
}

/// One-shot form of [`Segmenter::segment`].
pub fn segment_words(
    words: &[TimedWord],
    max_words: usize,
    max_duration: f64,
) -> Result<Vec<SubtitleSegment>, SegmentError> {
    Segmenter::new(max_words, max_duration)?.segment(words)
}

fn flush(pending: &mut Vec<&str>, start_time: f64, end_time: f64) -> SubtitleSegment {
    let text = pending.join(" ");
    pending.clear();
    SubtitleSegment {
        start_time,
        end_time,
        text,
    }
}

fn validate_words(words: &[TimedWord]) -> Result<(), SegmentError> {
    let mut previous_start: Option<f64> = None;
    for (index, word) in words.iter().enumerate() {
        let issue = check_word(word, previous_start);
        if let Some(issue) = issue {
            return Err(SegmentError::Validation { index, issue });
        }
        previous_start = Some(word.start_time);
    }
    Ok(())
}

fn check_word(word: &TimedWord, previous_start: Option<f64>) -> Option<WordIssue> {
    let (start, end) = (word.start_time, word.end_time);
    if word.text.trim().is_empty() {
        return Some(WordIssue::EmptyText);
    }
    if !start.is_finite() || !end.is_finite() {
        return Some(WordIssue::NonFiniteTime);
    }
    if start < 0.0 {
        return Some(WordIssue::NegativeStart(start));
    }
    if start > end {
        return Some(WordIssue::EndBeforeStart { start, end });
    }
    match previous_start {
        Some(previous_start) if start < previous_start => {
            Some(WordIssue::OutOfOrder {
                previous_start,
                start,
            })
        }
        _ => None,
    }
}
