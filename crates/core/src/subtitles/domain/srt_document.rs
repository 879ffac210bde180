use super::segment::SubtitleSegment;
use super::timestamp::format_timestamp;

/// Render captions as a SubRip document.
///
/// Blocks are numbered from 1 in input order, whatever the timing gaps
/// between them. Each block is the index line, the time range, the text,
/// and a blank line. Text is written verbatim; no captions yields `""`.
pub fn render_srt(segments: &[SubtitleSegment]) -> String {
    let mut out = String::new();
    for (i, seg) in segments.iter().enumerate() {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_timestamp(seg.start_time),
            format_timestamp(seg.end_time),
            seg.text
        ));
    }
    out
}
