use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A subtitle timecode: a duration since the start of the media, with
/// millisecond resolution.
///
/// Stored as a flat millisecond count so arithmetic and comparison are trivial;
/// the canonical SRT string form (`HH:MM:SS,mmm`) is reconstructed on display
/// and is the serde representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timecode(u64);

impl Timecode {
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Parse a strict SRT timecode: `HH:MM:SS,mmm`.
    ///
    /// Time fields must be exactly two digits and milliseconds exactly three.
    /// When `allow_dot` is set, `.` is accepted in place of `,` as the
    /// millisecond separator (a common defect in files exported by other
    /// tools). Values like `99` minutes are not range-checked; semantic
    /// validation is out of scope.
    pub fn parse(s: &str, allow_dot: bool) -> Option<Self> {
        let s = s.trim();

        let mut parts = s.split(':');
        let hours = parts.next()?;
        let minutes = parts.next()?;
        let rest = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let (seconds, millis) = match rest.split_once(',') {
            Some(pair) => pair,
            None if allow_dot => rest.split_once('.')?,
            None => return None,
        };

        let hours = fixed_width_field(hours, 2)?;
        let minutes = fixed_width_field(minutes, 2)?;
        let seconds = fixed_width_field(seconds, 2)?;
        let millis = fixed_width_field(millis, 3)?;

        Some(Self(
            hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis,
        ))
    }
}

/// Parse a timecode component that must be exactly `width` ASCII digits.
fn fixed_width_field(s: &str, width: usize) -> Option<u64> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Timecode {
    /// Format as the canonical `HH:MM:SS,mmm` form, zero-padding each
    /// component. Hours past 99 widen rather than truncate.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.0 % 1000;
        let total_s = self.0 / 1000;

        let s = total_s % 60;
        let total_m = total_s / 60;

        let m = total_m % 60;
        let h = total_m / 60;

        write!(f, "{h:02}:{m:02}:{s:02},{ms:03}")
    }
}

impl Serialize for Timecode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timecode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Timecode::parse(&s, true)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timecode '{s}'")))
    }
}
