use serde::{Deserialize, Serialize};

use crate::timecode::Timecode;

/// One parsed subtitle entry.
///
/// The serde representation is the per-file JSON contract: exactly the keys
/// `index` (integer), `start`/`end` (canonical `HH:MM:SS,mmm` strings) and
/// `text` (string).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The sequence number declared in the source block, taken verbatim.
    /// Not required to be unique, contiguous, or to start at 1.
    pub index: u32,

    pub start: Timecode,
    pub end: Timecode,

    /// Caption lines joined by `\n`. Leading/trailing blank lines are trimmed,
    /// internal line breaks preserved. May be empty.
    pub text: String,
}
