//! SRT clock values: `HH:MM:SS,mmm`.
//!
//! Hours are at least two digits and keep counting past 24, so a 30 hour
//! recording renders as `30:00:00,000`. Milliseconds are truncated, never
//! rounded.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid SRT timestamp '{0}', expected HH:MM:SS,mmm")]
pub struct TimestampParseError(pub String);

const MILLIS_EPSILON: f64 = 1e-6;

/// Render `seconds` as an SRT timestamp.
///
/// Negative and non-finite input clamps to `00:00:00,000`.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    };

    // Nudge by far less than a millisecond so decimal inputs like 2.3, stored
    // as 2.2999..., truncate to 2300 and not 2299.
    let total_millis = (seconds * 1000.0 + MILLIS_EPSILON).floor() as u64;
    let millis = total_millis % 1000;
    let total_secs = total_millis / 1000;

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{secs:02},{millis:03}")
}

/// Parse an SRT timestamp back into seconds.
pub fn parse_timestamp(text: &str) -> Result<f64, TimestampParseError> {
    let invalid = || TimestampParseError(text.to_string());

    let (clock, millis) = text.trim().split_once(',').ok_or_else(invalid)?;
    let mut parts = clock.split(':');
    let (Some(hours), Some(minutes), Some(secs), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    if hours.len() < 2 || minutes.len() != 2 || secs.len() != 2 || millis.len() != 3 {
        return Err(invalid());
    }

    let hours = parse_digits(hours).ok_or_else(invalid)?;
    let minutes = parse_digits(minutes).ok_or_else(invalid)?;
    let secs = parse_digits(secs).ok_or_else(invalid)?;
    let millis = parse_digits(millis).ok_or_else(invalid)?;
    if minutes >= 60 || secs >= 60 {
        return Err(invalid());
    }

    let total_millis = ((hours * 60 + minutes) * 60 + secs) * 1000 + millis;
    Ok(total_millis as f64 / 1000.0)
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0.0, "00:00:00,000")]
    #[case::fraction_truncated(65.4321, "00:01:05,432")]
    #[case::just_under_a_second(0.9999, "00:00:00,999")]
    #[case::one_hour(3600.0, "01:00:00,000")]
    #[case::mixed(3725.5, "01:02:05,500")]
    #[case::past_a_day(108000.0, "30:00:00,000")]
    #[case::past_a_day_with_parts(90061.25, "25:01:01,250")]
    #[case::three_digit_hours(360000.0, "100:00:00,000")]
    #[case::two_decimals(2.3, "00:00:02,300")]
    #[case::two_decimals_quarter(4.35, "00:00:04,350")]
    #[case::two_decimals_tenths(12.7, "00:00:12,700")]
    #[case::exact_millisecond(1.001, "00:00:01,001")]
    fn test_format_timestamp(#[case] seconds: f64, #[case] expected: &str) {
        assert_eq!(format_timestamp(seconds), expected);
    }

    #[test]
    fn test_milliseconds_truncate_instead_of_round() {
        assert_eq!(format_timestamp(1.9996), "00:00:01,999");
        assert_eq!(format_timestamp(59.9999), "00:00:59,999");
    }

    #[rstest]
    #[case::negative(-3.2)]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn test_out_of_range_clamps_to_zero(#[case] seconds: f64) {
        assert_eq!(format_timestamp(seconds), "00:00:00,000");
    }

    #[test]
    fn test_format_is_pure() {
        assert_eq!(format_timestamp(12.345), format_timestamp(12.345));
    }

    #[rstest]
    #[case("00:01:05,432", 65.432)]
    #[case("30:00:00,000", 108000.0)]
    #[case("100:00:00,001", 360000.001)]
    #[case(" 01:02:05,500 ", 3725.5)]
    fn test_parse_timestamp(#[case] text: &str, #[case] expected: f64) {
        assert_relative_eq!(parse_timestamp(text).unwrap(), expected, epsilon = 1e-9);
    }

    #[rstest]
    #[case::recovers_truncated_millis(65.4321, 65.432)]
    #[case::whole_hours(108000.0, 108000.0)]
    #[case::sub_millisecond(0.0015, 0.001)]
    #[case::long_mixed(45296.7894, 45296.789)]
    #[case::decimal_start(2.3, 2.3)]
    #[case::decimal_end(4.35, 4.35)]
    #[case::decimal_tenths(12.7, 12.7)]
    fn test_parse_recovers_formatted_value(#[case] seconds: f64, #[case] expected: f64) {
        let parsed = parse_timestamp(&format_timestamp(seconds)).unwrap();
        assert_relative_eq!(parsed, expected, epsilon = 1e-9);
    }

    #[rstest]
    #[case::empty("")]
    #[case::dot_separator("00:00:01.000")]
    #[case::missing_hours("00:01,000")]
    #[case::extra_field("00:00:00:01,000")]
    #[case::single_digit_hour("1:00:00,000")]
    #[case::short_millis("00:00:01,50")]
    #[case::minutes_overflow("00:60:00,000")]
    #[case::seconds_overflow("00:00:60,000")]
    #[case::signed("-1:00:00,000")]
    #[case::letters("aa:bb:cc,ddd")]
    fn test_parse_rejects_malformed(#[case] text: &str) {
        assert!(parse_timestamp(text).is_err());
    }

    #[test]
    fn test_parse_error_message() {
        let err = parse_timestamp("nope").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid SRT timestamp 'nope', expected HH:MM:SS,mmm"
        );
    }
}
