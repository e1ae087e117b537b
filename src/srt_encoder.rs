use std::io::Write;

use crate::Result;
use crate::segment_encoder::SegmentEncoder;
use crate::segment::Segment;

/// A `SegmentEncoder` that re-emits segments as canonical SRT.
///
/// Parsing a defective file and writing it back through this encoder is the
/// normalization path: line endings become `\n`, timecodes are zero-padded
/// with the comma millisecond separator, cue settings are gone, and blocks
/// are separated by exactly one blank line.
///
/// Indices are written exactly as parsed; we do not renumber.
pub struct SrtEncoder<W: Write> {
    /// The underlying writer we stream SRT into.
    w: W,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> SrtEncoder<W> {
    /// Create a new SRT encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self { w, closed: false }
    }
}

impl<W: Write> SegmentEncoder for SrtEncoder<W> {
    /// Write a single subtitle block in canonical SRT form.
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(crate::Error::msg(
                "cannot write segment: encoder is already closed",
            ));
        }

        writeln!(&mut self.w, "{}", seg.index)?;
        writeln!(&mut self.w, "{} --> {}", seg.start, seg.end)?;
        writeln!(&mut self.w, "{}", seg.text)?;

        // Blank line separates blocks.
        writeln!(&mut self.w)?;

        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}
