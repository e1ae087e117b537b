//! The SRT parser: raw subtitle text → ordered segments plus a skip count.
//!
//! Policy in one line: skip, don't fail. One corrupt caption must never
//! prevent the rest of a file from importing, so malformed blocks are counted
//! in `ParseResult::skipped` and excluded from the output instead of
//! surfacing as errors. The only hard failure in the whole flow is byte
//! decoding, which lives in the `decode` module.
//!
//! The grammar we accept:
//! - blocks are separated by runs of one or more blank lines
//! - a block is an index line, a timecode line, and zero or more text lines
//! - the index line may be missing (a common defect); recovery is gated by
//!   `ParseOpts::allow_missing_index`
//! - timecodes are `HH:MM:SS,mmm --> HH:MM:SS,mmm`, with optional trailing
//!   cue settings after the end timecode, which we ignore

use tracing::debug;

use crate::segment::Segment;
use crate::timecode::Timecode;

/// Options that control how tolerant the parser is.
///
/// The defaults accept the two defects we see most in the wild. Strict SRT
/// conformance is both flags off.
#[derive(Debug, Clone)]
pub struct ParseOpts {
    /// Accept `.` as the millisecond separator in timecodes (`00:00:01.000`).
    pub allow_dot_separator: bool,

    /// Recover blocks whose index line is missing: if the first line of a
    /// block is a timecode line, parse it as one and synthesize an index.
    pub allow_missing_index: bool,
}

impl Default for ParseOpts {
    fn default() -> Self {
        Self {
            allow_dot_separator: true,
            allow_missing_index: true,
        }
    }
}

impl ParseOpts {
    /// Strict SRT: comma separator only, index line required.
    pub fn strict() -> Self {
        Self {
            allow_dot_separator: false,
            allow_missing_index: false,
        }
    }
}

/// The output of one parse: every block in the input is either a segment here
/// or counted in `skipped`.
///
/// This is a plain value — parsing is a pure function, and parsing the same
/// text twice yields an equal `ParseResult`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseResult {
    /// Segments in the order their blocks appeared in the input. Declared
    /// indices are never re-sorted or renumbered.
    pub segments: Vec<Segment>,

    /// Number of blocks that could not be parsed into a segment.
    pub skipped: usize,
}

/// Parse SRT text with the default tolerance policy.
pub fn parse(raw: &str) -> ParseResult {
    parse_with(raw, &ParseOpts::default())
}

/// Parse SRT text with an explicit tolerance policy.
///
/// Never fails: the worst malformed input yields an empty segment list and a
/// skip count. Input must already be decoded text; see `decode` for bytes.
pub fn parse_with(raw: &str, opts: &ParseOpts) -> ParseResult {
    // A UTF-8 BOM survives decoding as U+FEFF and would otherwise corrupt the
    // first block's index line.
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");

    let mut result = ParseResult::default();
    let mut block: Vec<&str> = Vec::new();

    for line in normalized.split('\n') {
        let line = line.trim_end();
        if line.trim().is_empty() {
            flush_block(&mut block, opts, &mut result);
        } else {
            block.push(line);
        }
    }
    flush_block(&mut block, opts, &mut result);

    result
}

/// Classify one completed block into a segment or a skip. No-op for an empty
/// buffer, so runs of blank lines never count as skipped blocks.
fn flush_block(block: &mut Vec<&str>, opts: &ParseOpts, result: &mut ParseResult) {
    if block.is_empty() {
        return;
    }
    // Synthesized index for recovered blocks: one past the number of segments
    // emitted so far. Declared indices are untouched.
    let fallback_index = result.segments.len() as u32 + 1;
    match parse_block(block, opts, fallback_index) {
        Some(segment) => result.segments.push(segment),
        None => {
            debug!(lines = block.len(), first = ?block.first(), "skipping malformed block");
            result.skipped += 1;
        }
    }
    block.clear();
}

fn parse_block(lines: &[&str], opts: &ParseOpts, fallback_index: u32) -> Option<Segment> {
    // A segment needs at least a timecode line plus either an index line or a
    // text line; a lone line can never be one.
    if lines.len() < 2 {
        return None;
    }

    let (declared, timecode_line, text_lines) = match parse_index_line(lines[0]) {
        Some(index) => (Some(index), lines[1], &lines[2..]),
        // Recovery: the file may be missing its index lines entirely. If the
        // first line turns out not to be a timecode either, the timecode
        // parse below rejects the block.
        None if opts.allow_missing_index => (None, lines[0], &lines[1..]),
        None => return None,
    };

    let (start, end) = parse_timecode_line(timecode_line, opts.allow_dot_separator)?;

    Some(Segment {
        index: declared.unwrap_or(fallback_index),
        start,
        end,
        // An empty caption (index + timecode only) is a valid segment.
        text: text_lines.join("\n"),
    })
}

fn parse_index_line(line: &str) -> Option<u32> {
    line.trim().parse().ok()
}

/// Parse `START --> END`, tolerating arbitrary whitespace around the arrow and
/// ignoring any cue-settings suffix after the end timecode.
fn parse_timecode_line(line: &str, allow_dot: bool) -> Option<(Timecode, Timecode)> {
    let (start, rest) = line.split_once("-->")?;
    let start = Timecode::parse(start, allow_dot)?;

    let end_token = rest.split_whitespace().next()?;
    let end = Timecode::parse(end_token, allow_dot)?;

    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tc(s: &str) -> Timecode {
        Timecode::parse(s, false).unwrap()
    }

    #[test]
    fn parses_two_well_formed_blocks() {
        let srt = "1\n00:00:01,000 --> 00:00:03,500\nHello world.\n\n2\n00:00:04,000 --> 00:00:06,000\nSecond line.\n";
        let result = parse(srt);

        assert_eq!(result.skipped, 0);
        assert_eq!(result.segments.len(), 2);
        assert_eq!(
            result.segments[0],
            Segment {
                index: 1,
                start: tc("00:00:01,000"),
                end: tc("00:00:03,500"),
                text: "Hello world.".to_string(),
            }
        );
        assert_eq!(result.segments[1].index, 2);
        assert_eq!(result.segments[1].text, "Second line.");
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let result = parse("");
        assert_eq!(result.segments, Vec::new());
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn whitespace_only_input_yields_empty_result() {
        let result = parse("\n\n   \n\t\n\n");
        assert!(result.segments.is_empty());
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn malformed_timecode_skips_only_that_block() {
        let srt = "1\n00:00:01,000 --> 00:00:02,000\nfirst\n\n2\n00:00:01 --> 00:00:03\nmissing millis\n\n3\n00:00:05,000 --> 00:00:06,000\nthird\n";
        let result = parse(srt);

        assert_eq!(result.segments.len(), 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.segments[0].text, "first");
        assert_eq!(result.segments[1].text, "third");
    }

    #[test]
    fn non_timecode_second_line_skips_block() {
        let srt = "1\nThis is not a timecode line\nText\n\n2\n00:00:01,000 --> 00:00:02,000\nValid block\n";
        let result = parse(srt);

        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.skipped, 1);
        assert!(result.segments[0].text.starts_with("Valid"));
    }

    #[test]
    fn recovers_block_missing_its_index_line() {
        let srt = "00:00:00,000 --> 00:00:01,000\nNo index line\n\n99\n00:00:01,000 --> 00:00:02,000\nWith index\n";
        let result = parse(srt);

        assert_eq!(result.skipped, 0);
        assert_eq!(result.segments.len(), 2);
        // The recovered block gets a synthesized index; the declared one is
        // kept verbatim.
        assert_eq!(result.segments[0].index, 1);
        assert_eq!(result.segments[1].index, 99);
    }

    #[test]
    fn missing_index_recovery_can_be_disabled() {
        let srt = "00:00:00,000 --> 00:00:01,000\nNo index line\n";
        let result = parse_with(srt, &ParseOpts::strict());

        assert!(result.segments.is_empty());
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn dot_millisecond_separator_is_tolerated_by_default() {
        let srt = "1\n00:00:01.000 --> 00:00:04.000\nHello world\n";

        let result = parse(srt);
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].start, tc("00:00:01,000"));

        let strict = parse_with(srt, &ParseOpts::strict());
        assert!(strict.segments.is_empty());
        assert_eq!(strict.skipped, 1);
    }

    #[test]
    fn cue_settings_after_end_timecode_are_ignored() {
        let srt = "1\n00:00:01,000 --> 00:00:02,000 X1:40 X2:600\ncue settings\n";
        let result = parse(srt);

        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].end, tc("00:00:02,000"));
        assert_eq!(result.segments[0].text, "cue settings");
    }

    #[test]
    fn empty_caption_is_accepted() {
        let srt = "1\n00:00:01,000 --> 00:00:04,000\n\n2\n00:00:05,000 --> 00:00:08,000\nNext subtitle\n";
        let result = parse(srt);

        assert_eq!(result.skipped, 0);
        assert_eq!(result.segments.len(), 2);
        assert_eq!(result.segments[0].text, "");
        assert_eq!(result.segments[1].text, "Next subtitle");
    }

    #[test]
    fn single_line_block_is_skipped() {
        let srt = "just one line\n\n1\n00:00:01,000 --> 00:00:02,000\nok\n";
        let result = parse(srt);

        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn multiline_captions_preserve_internal_breaks() {
        let srt = "3\n00:00:08,000 --> 00:00:10,000\nThird subtitle line 1.\nThird subtitle line 2.\n";
        let result = parse(srt);

        assert_eq!(
            result.segments[0].text,
            "Third subtitle line 1.\nThird subtitle line 2."
        );
    }

    #[test]
    fn indices_are_kept_verbatim_and_in_block_order() {
        let srt = "7\n00:00:01,000 --> 00:00:02,000\na\n\n7\n00:00:03,000 --> 00:00:04,000\nb\n\n2\n00:00:05,000 --> 00:00:06,000\nc\n";
        let result = parse(srt);

        let indices: Vec<u32> = result.segments.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![7, 7, 2]);
        let texts: Vec<&str> = result.segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn crlf_and_bare_cr_line_endings_are_normalized() {
        let crlf = "1\r\n00:00:01,000 --> 00:00:02,000\r\nwindows\r\n\r\n2\r00:00:03,000 --> 00:00:04,000\rold mac\r";
        let result = parse(crlf);

        assert_eq!(result.skipped, 0);
        assert_eq!(result.segments.len(), 2);
        assert_eq!(result.segments[0].text, "windows");
        assert_eq!(result.segments[1].text, "old mac");
    }

    #[test]
    fn leading_bom_does_not_break_the_first_block() {
        let srt = "\u{feff}1\n00:00:01,000 --> 00:00:02,000\nbom\n";
        let result = parse(srt);

        assert_eq!(result.skipped, 0);
        assert_eq!(result.segments.len(), 1);
        assert_eq!(result.segments[0].index, 1);
    }

    #[test]
    fn multiple_blank_lines_between_blocks_collapse() {
        let srt = "1\n00:00:01,000 --> 00:00:02,000\na\n\n\n\n2\n00:00:03,000 --> 00:00:04,000\nb\n";
        let result = parse(srt);

        assert_eq!(result.segments.len(), 2);
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn missing_arrow_skips_block() {
        let srt = "1\n00:00:01,000 00:00:04,000\nHello world\n";
        let result = parse(srt);
        assert!(result.segments.is_empty());
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn incomplete_end_timecode_skips_block() {
        let srt = "1\n00:00:01,000 -->\nHello world\n";
        let result = parse(srt);
        assert!(result.segments.is_empty());
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn parsing_is_idempotent() {
        let srt = "1\n00:00:01,000 --> 00:00:03,500\nHello world.\n\nnot a block\n\n2\n00:00:04,000 --> 00:00:06,000\nSecond.\n";
        assert_eq!(parse(srt), parse(srt));
    }
}
