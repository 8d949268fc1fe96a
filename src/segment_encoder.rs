use crate::Result;
use crate::segments::Segment;

/// A streaming serializer for transcription segments.
///
/// Lifecycle contract (shared by all encoders):
/// - `write_segment` may be called zero or more times, in segment order.
/// - `close` finalizes the output and is idempotent.
/// - Writing after `close` is an error.
pub trait SegmentEncoder {
    fn write_segment(&mut self, seg: &Segment) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
