use std::io::Write;

use crate::Result;
use crate::segment_encoder::SegmentEncoder;
use crate::segment::Segment;

/// A `SegmentEncoder` that writes segments as a single JSON array.
///
/// This is the per-file serialization contract: one array per input file,
/// each element an object with exactly the keys `index`, `start`, `end`,
/// `text` (timecodes as canonical `HH:MM:SS,mmm` strings).
///
/// Design:
/// - We stream output directly to a `Write` implementation so a large
///   subtitle file never needs its serialized form buffered in memory.
/// - The encoder is stateful so we can emit a well-formed JSON array
///   incrementally.
///
/// Example output:
/// ```json
/// [
///   { "index": 1, "start": "00:00:01,000", "end": "00:00:03,500", "text": "Hello world." }
/// ]
/// ```
pub struct JsonArrayEncoder<W: Write> {
    /// The underlying writer we stream JSON into.
    w: W,

    /// Whether we have written the opening `[` of the JSON array.
    started: bool,

    /// Whether the next element will be the first element in the array.
    /// This lets us correctly place commas between elements.
    first: bool,

    /// Whether the encoder has been closed.
    /// Once closed, no further writes are allowed.
    closed: bool,
}

impl<W: Write> JsonArrayEncoder<W> {
    /// Create a new JSON array encoder that writes to the given writer.
    ///
    /// The array is opened lazily on the first write or on close, so empty
    /// output still results in valid JSON (`[]`).
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            first: true,
            closed: false,
        }
    }

    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            self.w.write_all(b"[")?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> SegmentEncoder for JsonArrayEncoder<W> {
    /// Serialize a single segment and append it to the JSON array.
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write segment: encoder is already closed",
            ));
        }

        self.start_if_needed()?;

        // Write a comma before every element except the first.
        if !self.first {
            self.w.write_all(b",")?;
        }
        self.first = false;

        serde_json::to_writer(&mut self.w, seg)?;

        Ok(())
    }

    /// Finalize the JSON array and flush the underlying writer.
    ///
    /// This method is idempotent:
    /// - Calling `close()` multiple times is safe.
    /// - After closing, no further segments may be written.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        // Ensure we still output a valid JSON array even if no segments were written.
        self.start_if_needed()?;

        self.w.write_all(b"]")?;
        self.w.flush()?;

        self.closed = true;
        Ok(())
    }
}
