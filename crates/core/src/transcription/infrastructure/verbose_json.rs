//! Parsing of the `verbose_json` transcription response format.

use serde::Deserialize;
use thiserror::Error;

use crate::transcription::domain::timed_word::TimedWord;

#[derive(Error, Debug)]
pub enum TranscriptParseError {
    #[error("malformed transcript JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("transcript has no word-level timestamps (was timestamp_granularities=word requested?)")]
    MissingWords,
}

#[derive(Deserialize)]
struct VerboseTranscription {
    words: Option<Vec<ApiWord>>,
}

#[derive(Deserialize)]
struct ApiWord {
    word: String,
    start: f64,
    end: f64,
}

/// Extract the word list from a `verbose_json` body.
///
/// Word text is trimmed and entries that are blank after trimming are
/// dropped. Timings are passed through untouched; validating them is the
/// segmenter's job.
pub fn parse_verbose_json(json: &str) -> Result<Vec<TimedWord>, TranscriptParseError> {
    let body: VerboseTranscription = serde_json::from_str(json)?;
    let words = body.words.ok_or(TranscriptParseError::MissingWords)?;

    Ok(words
        .into_iter()
        .filter_map(|w| {
            let text = w.word.trim();
            if text.is_empty() {
                None
            } else {
                Some(TimedWord::new(text, w.start, w.end))
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_words_in_order() {
        let json = r#"{
            "task": "transcribe",
            "language": "swedish",
            "duration": 0.9,
            "text": "ok go",
            "words": [
                { "word": "ok", "start": 0.0, "end": 0.4 },
                { "word": "go", "start": 0.4, "end": 0.9 }
            ]
        }"#;
        let words = parse_verbose_json(json).unwrap();
        assert_eq!(
            words,
            vec![TimedWord::new("ok", 0.0, 0.4), TimedWord::new("go", 0.4, 0.9)]
        );
    }

    #[test]
    fn test_trims_and_drops_blank_words() {
        let json = r#"{ "words": [
            { "word": "  hello ", "start": 0.0, "end": 0.5 },
            { "word": "   ", "start": 0.5, "end": 0.6 },
            { "word": "world", "start": 0.6, "end": 1.0 }
        ] }"#;
        let words = parse_verbose_json(json).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "hello");
        assert_eq!(words[1].text, "world");
    }

    #[test]
    fn test_empty_word_list_is_valid() {
        let words = parse_verbose_json(r#"{ "text": "", "words": [] }"#).unwrap();
        assert!(words.is_empty());
    }

    #[test]
    fn test_missing_words_field_errors() {
        let err = parse_verbose_json(r#"{ "text": "no timestamps" }"#).unwrap_err();
        assert!(matches!(err, TranscriptParseError::MissingWords));
    }

    #[test]
    fn test_invalid_json_errors() {
        let err = parse_verbose_json("{ not json").unwrap_err();
        assert!(matches!(err, TranscriptParseError::Json(_)));
    }
}
