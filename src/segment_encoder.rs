use crate::Result;
use crate::segment::Segment;

/// A streaming sink for parsed segments.
///
/// Encoders receive segments one at a time, in input order, and must be
/// `close`d to finalize their output. Each variant of `OutputType` maps to a
/// concrete implementation.
pub trait SegmentEncoder {
    fn write_segment(&mut self, seg: &Segment) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
